use crate::angle;
use std::fmt::{self, Display, Formatter};
use std::ops::Add;
use uom::si::angle::degree;
use uom::si::f64::Angle;

#[cfg(any(feature = "approx", test))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the 16 named compass points, each 22.5° apart, clockwise from
/// north.
///
/// Compass points convert exactly to a [`Bearing`]. The reverse conversion
/// does not exist: most bearings lie on none of the named points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CompassPoint {
    North,
    NorthNortheast,
    Northeast,
    EastNortheast,
    East,
    EastSoutheast,
    Southeast,
    SouthSoutheast,
    South,
    SouthSouthwest,
    Southwest,
    WestSouthwest,
    West,
    WestNorthwest,
    Northwest,
    NorthNorthwest,
}

impl CompassPoint {
    /// All 16 points in clockwise order starting at [`CompassPoint::North`].
    pub const ALL: [CompassPoint; 16] = [
        CompassPoint::North,
        CompassPoint::NorthNortheast,
        CompassPoint::Northeast,
        CompassPoint::EastNortheast,
        CompassPoint::East,
        CompassPoint::EastSoutheast,
        CompassPoint::Southeast,
        CompassPoint::SouthSoutheast,
        CompassPoint::South,
        CompassPoint::SouthSouthwest,
        CompassPoint::Southwest,
        CompassPoint::WestSouthwest,
        CompassPoint::West,
        CompassPoint::WestNorthwest,
        CompassPoint::Northwest,
        CompassPoint::NorthNorthwest,
    ];

    /// The conventional abbreviation, eg `"NNE"`.
    #[must_use]
    pub fn abbreviation(self) -> &'static str {
        match self {
            CompassPoint::North => "N",
            CompassPoint::NorthNortheast => "NNE",
            CompassPoint::Northeast => "NE",
            CompassPoint::EastNortheast => "ENE",
            CompassPoint::East => "E",
            CompassPoint::EastSoutheast => "ESE",
            CompassPoint::Southeast => "SE",
            CompassPoint::SouthSoutheast => "SSE",
            CompassPoint::South => "S",
            CompassPoint::SouthSouthwest => "SSW",
            CompassPoint::Southwest => "SW",
            CompassPoint::WestSouthwest => "WSW",
            CompassPoint::West => "W",
            CompassPoint::WestNorthwest => "WNW",
            CompassPoint::Northwest => "NW",
            CompassPoint::NorthNorthwest => "NNW",
        }
    }

    /// The bearing of this point in degrees clockwise from north.
    #[must_use]
    pub fn degrees(self) -> f64 {
        let index = Self::ALL
            .iter()
            .position(|point| *point == self)
            .expect("ALL lists every variant");
        index as f64 * 22.5
    }
}

impl Display for CompassPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// A direction angle in degrees clockwise from north, always normalized
/// into [0°, 360°).
///
/// Stored as degrees so that normalization identities hold exactly; the
/// [`Angle`] view is built on demand.
///
/// ```
/// use graticule::Bearing;
///
/// assert_eq!(Bearing::from_degrees(-100.0).degrees(), 260.0);
/// assert_eq!(Bearing::from_degrees(360.0).degrees(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bearing {
    degrees: f64,
}

impl Bearing {
    /// Constructs a bearing from any angle, normalizing it into [0°, 360°).
    #[must_use]
    pub fn new(angle: impl Into<Angle>) -> Self {
        Self::from_degrees(angle.into().get::<degree>())
    }

    /// Constructs a bearing from degrees clockwise from north, normalizing
    /// into [0°, 360°).
    #[must_use]
    pub fn from_degrees(degrees: f64) -> Self {
        Self {
            degrees: angle::normalize_bearing(degrees),
        }
    }

    /// Returns the normalized angle.
    #[must_use]
    pub fn angle(&self) -> Angle {
        Angle::new::<degree>(self.degrees)
    }

    /// Returns the normalized angle in degrees, in [0, 360).
    #[must_use]
    pub fn degrees(&self) -> f64 {
        self.degrees
    }
}

impl Display for Bearing {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

impl From<CompassPoint> for Bearing {
    fn from(point: CompassPoint) -> Self {
        Self::from_degrees(point.degrees())
    }
}

impl From<Angle> for Bearing {
    fn from(angle: Angle) -> Self {
        Self::new(angle)
    }
}

impl Add for Bearing {
    type Output = Bearing;

    fn add(self, other: Bearing) -> Bearing {
        Bearing::from_degrees(self.degrees() + other.degrees())
    }
}

impl Add<Angle> for Bearing {
    type Output = Bearing;

    fn add(self, other: Angle) -> Bearing {
        self + Bearing::new(other)
    }
}

/// Either a named compass point or a numeric bearing.
///
/// Navigation entry points like [`Location::travel`](crate::Location::travel)
/// take `impl Into<Direction>` so that a [`CompassPoint`], a [`Bearing`], or
/// a raw [`Angle`] all work.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    Compass(CompassPoint),
    Bearing(Bearing),
}

impl Direction {
    /// Resolves this direction to its bearing.
    #[must_use]
    pub fn bearing(self) -> Bearing {
        match self {
            Direction::Compass(point) => point.into(),
            Direction::Bearing(bearing) => bearing,
        }
    }
}

impl From<CompassPoint> for Direction {
    fn from(point: CompassPoint) -> Self {
        Direction::Compass(point)
    }
}

impl From<Bearing> for Direction {
    fn from(bearing: Bearing) -> Self {
        Direction::Bearing(bearing)
    }
}

impl From<Angle> for Direction {
    fn from(angle: Angle) -> Self {
        Direction::Bearing(Bearing::new(angle))
    }
}

impl Add for Direction {
    type Output = Bearing;

    fn add(self, other: Direction) -> Bearing {
        self.bearing() + other.bearing()
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Compass(point) => Display::fmt(point, f),
            Direction::Bearing(bearing) => Display::fmt(bearing, f),
        }
    }
}

#[cfg(any(feature = "approx", test))]
impl AbsDiffEq<Self> for Bearing {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        1e-6
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        // 359.9999999° and 0° are the same direction, so compare around the
        // wrap as well.
        let difference = angle::normalize_bearing(self.degrees() - other.degrees());
        difference.min(360.0 - difference) <= epsilon
    }
}

#[cfg(any(feature = "approx", test))]
impl RelativeEq for Bearing {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.abs_diff_eq(other, epsilon)
            || f64::relative_eq(&self.degrees(), &other.degrees(), epsilon, max_relative)
    }
}

#[cfg(any(feature = "approx", test))]
impl AbsDiffEq<Self> for Direction {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        Bearing::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        match (self, other) {
            // two named points compare exactly
            (Direction::Compass(a), Direction::Compass(b)) => a == b,
            _ => self.bearing().abs_diff_eq(&other.bearing(), epsilon),
        }
    }
}
