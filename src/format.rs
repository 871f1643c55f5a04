use crate::location::{DegAxis, DmAxis, DmsAxis, Hemisphere, Location};
use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Decimal places for the degree, minute, and second fields respectively.
///
/// Each notation only consults the precision of its final (floating) field:
/// decimal degrees use `degrees`, degrees-and-minutes use `minutes`,
/// degrees-minutes-seconds use `seconds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Precision {
    pub degrees: usize,
    pub minutes: usize,
    pub seconds: usize,
}

impl Default for Precision {
    fn default() -> Self {
        Self {
            degrees: 5,
            minutes: 3,
            seconds: 1,
        }
    }
}

/// How the latitude and longitude halves are joined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Separator {
    /// `51°N, 0°W` — an explicit comma between the axes.
    #[default]
    Comma,
    /// `51°N 0°W` — the hemisphere letter alone delimits the axes. Only
    /// meaningful for the lettered notations; decimal degrees carry no
    /// letters and always use the comma.
    Letter,
}

/// The degree, minute, and second marks to write after each field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Delimiters {
    pub degree: &'static str,
    pub minute: &'static str,
    pub second: &'static str,
}

impl Delimiters {
    /// Degree sign with the keyboard apostrophe and double quote:
    /// `51°30'26.0"N`.
    pub const ASCII: Delimiters = Delimiters {
        degree: "\u{b0}",
        minute: "'",
        second: "\"",
    };

    /// Degree sign with the typographic prime and double prime:
    /// `51°30′26.0″N`.
    pub const PRIME: Delimiters = Delimiters {
        degree: "\u{b0}",
        minute: "\u{2032}",
        second: "\u{2033}",
    };

    /// Masculine ordinal indicator with smart quotes: `51º30’26.0”N`. Seen
    /// in the wild wherever word processors have been.
    pub const QUOTE: Delimiters = Delimiters {
        degree: "\u{ba}",
        minute: "\u{2019}",
        second: "\u{201d}",
    };
}

/// Options for [`Location::format`].
///
/// The default formats with five/three/one decimal places, a comma between
/// the axes, and the ASCII marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FormatOptions {
    pub precision: Precision,
    pub separator: Separator,
    /// `None` leaves the degree/minute/second marks out entirely; the
    /// fields are then space-separated.
    pub delimiters: Option<Delimiters>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            precision: Precision::default(),
            separator: Separator::default(),
            delimiters: Some(Delimiters::ASCII),
        }
    }
}

fn deg_axis<H: Hemisphere>(
    axis: &DegAxis<H>,
    precision: usize,
    delimiters: Option<&Delimiters>,
) -> String {
    let letter = axis.hemisphere.letter();
    match delimiters {
        Some(marks) => format!(
            "{:.precision$}{}{letter}",
            axis.degrees, marks.degree
        ),
        None => format!("{:.precision$}{letter}", axis.degrees),
    }
}

fn dm_axis<H: Hemisphere>(
    axis: &DmAxis<H>,
    precision: usize,
    delimiters: Option<&Delimiters>,
) -> String {
    let letter = axis.hemisphere.letter();
    match delimiters {
        Some(marks) => format!(
            "{}{}{:.precision$}{}{letter}",
            axis.degrees, marks.degree, axis.minutes, marks.minute
        ),
        None => format!("{} {:.precision$}{letter}", axis.degrees, axis.minutes),
    }
}

fn dms_axis<H: Hemisphere>(
    axis: &DmsAxis<H>,
    precision: usize,
    delimiters: Option<&Delimiters>,
) -> String {
    let letter = axis.hemisphere.letter();
    match delimiters {
        Some(marks) => format!(
            "{}{}{}{}{:.precision$}{}{letter}",
            axis.degrees, marks.degree, axis.minutes, marks.minute, axis.seconds, marks.second
        ),
        None => format!(
            "{} {} {:.precision$}{letter}",
            axis.degrees, axis.minutes, axis.seconds
        ),
    }
}

impl Location {
    /// Renders this location in its own notation.
    ///
    /// Signed decimal degrees carry their sign as a leading minus and
    /// always join the axes with a comma; the lettered notations write
    /// unsigned magnitudes with an `N`/`S`/`E`/`W` suffix and join per
    /// [`Separator`]. The output parses back via [`str::parse`] for every
    /// option combination.
    ///
    /// ```
    /// use graticule::{FormatOptions, Location, Separator};
    ///
    /// let sydney = Location::dd(-33.865, 151.209_444)?;
    /// assert_eq!(sydney.format(&FormatOptions::default()), "-33.86500°, 151.20944°");
    ///
    /// let mut spaced = FormatOptions::default();
    /// spaced.separator = Separator::Letter;
    /// spaced.delimiters = None;
    /// assert_eq!(
    ///     Location::Dms(sydney.to_dms()).format(&spaced),
    ///     "33 51 54.0S 151 12 34.0E",
    /// );
    /// # Ok::<(), graticule::Error>(())
    /// ```
    #[must_use]
    pub fn format(&self, options: &FormatOptions) -> String {
        let delimiters = options.delimiters.as_ref();
        let separator = match options.separator {
            Separator::Comma => ", ",
            Separator::Letter => " ",
        };
        match self {
            Location::Dd(dd) => {
                // no letters to lean on, so the comma is not optional here
                let mark = delimiters.map_or("", |marks| marks.degree);
                format!(
                    "{:.precision$}{mark}, {:.precision$}{mark}",
                    dd.latitude,
                    dd.longitude,
                    precision = options.precision.degrees,
                )
            }
            Location::Deg(deg) => format!(
                "{}{separator}{}",
                deg_axis(&deg.latitude, options.precision.degrees, delimiters),
                deg_axis(&deg.longitude, options.precision.degrees, delimiters),
            ),
            Location::Dm(dm) => format!(
                "{}{separator}{}",
                dm_axis(&dm.latitude, options.precision.minutes, delimiters),
                dm_axis(&dm.longitude, options.precision.minutes, delimiters),
            ),
            Location::Dms(dms) => format!(
                "{}{separator}{}",
                dms_axis(&dms.latitude, options.precision.seconds, delimiters),
                dms_axis(&dms.longitude, options.precision.seconds, delimiters),
            ),
        }
    }
}

/// Formats with [`FormatOptions::default`].
impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(&FormatOptions::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{DmsAxis, Ew, Ns};
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    fn london_dms() -> Location {
        Location::dms(
            DmsAxis::new(51, 30, 26.0, Ns::North).unwrap(),
            DmsAxis::new(0, 7, 39.0, Ew::West).unwrap(),
        )
    }

    #[test]
    fn default_rendering_of_every_notation() {
        let base = london_dms();
        insta::assert_snapshot!(
            Location::Dd(base.to_dd()).to_string(),
            @"51.50722°, -0.12750°"
        );
        insta::assert_snapshot!(
            Location::Deg(base.to_deg()).to_string(),
            @"51.50722°N, 0.12750°W"
        );
        insta::assert_snapshot!(
            Location::Dm(base.to_dm()).to_string(),
            @"51°30.433'N, 0°7.650'W"
        );
        insta::assert_snapshot!(base.to_string(), @r#"51°30'26.0"N, 0°7'39.0"W"#);
    }

    #[test]
    fn letter_separator_and_unicode_marks() {
        let mut options = FormatOptions::default();
        options.separator = Separator::Letter;
        options.delimiters = Some(Delimiters::PRIME);
        insta::assert_snapshot!(
            london_dms().format(&options),
            @"51°30′26.0″N 0°7′39.0″W"
        );

        options.delimiters = Some(Delimiters::QUOTE);
        insta::assert_snapshot!(
            london_dms().format(&options),
            @"51º30’26.0”N 0º7’39.0”W"
        );
    }

    #[test]
    fn decimal_degrees_ignore_the_letter_separator() {
        let mut options = FormatOptions::default();
        options.separator = Separator::Letter;
        let dd = Location::dd(-33.865, 151.209_444).unwrap();
        assert_eq!(dd.format(&options), "-33.86500°, 151.20944°");
    }

    #[rstest]
    #[case(Separator::Comma, None)]
    #[case(Separator::Comma, Some(Delimiters::ASCII))]
    #[case(Separator::Comma, Some(Delimiters::PRIME))]
    #[case(Separator::Comma, Some(Delimiters::QUOTE))]
    #[case(Separator::Letter, None)]
    #[case(Separator::Letter, Some(Delimiters::ASCII))]
    #[case(Separator::Letter, Some(Delimiters::PRIME))]
    #[case(Separator::Letter, Some(Delimiters::QUOTE))]
    fn every_option_combination_parses_back(
        #[case] separator: Separator,
        #[case] delimiters: Option<Delimiters>,
    ) {
        let options = FormatOptions {
            precision: Precision {
                degrees: 6,
                minutes: 4,
                seconds: 2,
            },
            separator,
            delimiters,
        };
        let base = Location::dd(-33.865, 151.209_444).unwrap();
        for notation in [
            base,
            Location::Deg(base.to_deg()),
            Location::Dm(base.to_dm()),
            Location::Dms(base.to_dms()),
        ] {
            let rendered = notation.format(&options);
            let parsed: Location = rendered
                .parse()
                .unwrap_or_else(|error| panic!("{rendered:?} failed to parse: {error}"));
            let (got, want) = (parsed.to_dd(), notation.to_dd());
            assert_abs_diff_eq!(got.latitude, want.latitude, epsilon = 1e-4);
            assert_abs_diff_eq!(got.longitude, want.longitude, epsilon = 1e-4);
        }
    }

    #[test]
    fn precision_zero_drops_the_decimal_point() {
        let options = FormatOptions {
            precision: Precision {
                degrees: 0,
                minutes: 0,
                seconds: 0,
            },
            separator: Separator::Comma,
            delimiters: None,
        };
        // 51.75 and 120.25 decompose exactly, so the rendering is stable
        let base = Location::dd(51.75, 120.25).unwrap();
        assert_eq!(base.format(&options), "52, 120");
        assert_eq!(
            Location::Dms(base.to_dms()).format(&options),
            "51 45 0N, 120 15 0E"
        );
    }
}
