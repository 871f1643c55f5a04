//! Lexer and grammar walker for human-written coordinate strings.
//!
//! Parsing runs in two stages: [`tokenize`] turns the input into a flat
//! token sequence (accepting the common Unicode look-alikes for the
//! degree/minute/second marks), then [`walk`] matches the tokens against
//! the four coordinate notations. A comma or the latitude hemisphere
//! letter must separate the two axes.

use crate::error::{Error, ParseError};
use crate::location::{Dd, DegAxis, DmAxis, DmsAxis, Ew, Hemisphere, Location, Ns};
use std::str::FromStr;

/// Degree sign, masculine ordinal indicator, ring above.
const DEGREE_MARKS: &[char] = &['\u{b0}', '\u{ba}', '\u{2da}'];
/// Apostrophe, prime, modifier-letter prime, right single quotation mark.
const MINUTE_MARKS: &[char] = &['\'', '\u{2032}', '\u{2b9}', '\u{2019}'];
/// Double quote, double prime, modifier-letter double prime, right double
/// quotation mark.
const SECOND_MARKS: &[char] = &['"', '\u{2033}', '\u{2ba}', '\u{201d}'];

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Integer(i64),
    Float(f64),
    Letter(char),
    DegreeMark,
    MinuteMark,
    SecondMark,
    Comma,
}

fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let unexpected = |character: char, offset: usize| ParseError::UnexpectedCharacter {
        character,
        offset,
        input: input.to_owned(),
    };

    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();
    while let Some(&(offset, character)) = chars.peek() {
        match character {
            c if c.is_whitespace() => {
                chars.next();
            }
            ',' => {
                tokens.push(Token::Comma);
                chars.next();
            }
            'N' | 'S' | 'E' | 'W' => {
                tokens.push(Token::Letter(character));
                chars.next();
            }
            c if DEGREE_MARKS.contains(&c) => {
                tokens.push(Token::DegreeMark);
                chars.next();
            }
            c if MINUTE_MARKS.contains(&c) => {
                tokens.push(Token::MinuteMark);
                chars.next();
            }
            c if SECOND_MARKS.contains(&c) => {
                tokens.push(Token::SecondMark);
                chars.next();
            }
            c if c == '-' || c.is_ascii_digit() => {
                let mut buffer = String::new();
                let mut is_float = false;
                let mut digits = 0;
                if c == '-' {
                    buffer.push('-');
                    chars.next();
                }
                while let Some(&(_, next)) = chars.peek() {
                    if next.is_ascii_digit() {
                        buffer.push(next);
                        digits += 1;
                        chars.next();
                    } else if next == '.' && !is_float {
                        buffer.push('.');
                        is_float = true;
                        chars.next();
                    } else {
                        break;
                    }
                }
                if digits == 0 {
                    return Err(unexpected(character, offset));
                }
                if is_float {
                    tokens.push(Token::Float(
                        buffer.parse().expect("lexed digits with one dot"),
                    ));
                } else {
                    // digit runs too long for i64 still lex; the range
                    // checks reject them further down
                    match buffer.parse::<i64>() {
                        Ok(value) => tokens.push(Token::Integer(value)),
                        Err(_) => tokens.push(Token::Float(
                            buffer.parse().expect("lexed digits"),
                        )),
                    }
                }
            }
            other => return Err(unexpected(other, offset)),
        }
    }
    Ok(tokens)
}

#[derive(Debug, Clone, Copy)]
enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    fn value(self) -> f64 {
        match self {
            Number::Integer(value) => value as f64,
            Number::Float(value) => value,
        }
    }
}

struct Tokens<'a> {
    tokens: &'a [Token],
    position: usize,
}

impl Tokens<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.position).copied()
    }

    fn eat(&mut self, token: Token) -> bool {
        if self.peek() == Some(token) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn number(&mut self) -> Option<Number> {
        let number = match self.peek()? {
            Token::Integer(value) => Number::Integer(value),
            Token::Float(value) => Number::Float(value),
            _ => return None,
        };
        self.position += 1;
        Some(number)
    }

    fn letter(&mut self, allowed: [char; 2]) -> Option<char> {
        match self.peek() {
            Some(Token::Letter(c)) if allowed.contains(&c) => {
                self.position += 1;
                Some(c)
            }
            _ => None,
        }
    }
}

/// One axis as the grammar saw it, before range validation.
#[derive(Debug, Clone, Copy)]
enum RawAxis {
    Decimal {
        value: f64,
        letter: Option<char>,
    },
    DegreesMinutes {
        degrees: i64,
        minutes: f64,
        letter: Option<char>,
    },
    DegreesMinutesSeconds {
        degrees: i64,
        minutes: i64,
        seconds: f64,
        letter: Option<char>,
    },
}

impl RawAxis {
    fn letter(&self) -> Option<char> {
        match *self {
            RawAxis::Decimal { letter, .. }
            | RawAxis::DegreesMinutes { letter, .. }
            | RawAxis::DegreesMinutesSeconds { letter, .. } => letter,
        }
    }
}

fn axis(tokens: &mut Tokens<'_>, letters: [char; 2]) -> Result<RawAxis, &'static str> {
    let first = tokens.number().ok_or("expected a number")?;
    tokens.eat(Token::DegreeMark);

    let Some(second) = tokens.number() else {
        let letter = tokens.letter(letters);
        return Ok(RawAxis::Decimal {
            value: first.value(),
            letter,
        });
    };
    let Number::Integer(degrees) = first else {
        return Err("fractional degrees cannot be followed by minutes");
    };
    tokens.eat(Token::MinuteMark);

    let Some(third) = tokens.number() else {
        let letter = tokens.letter(letters);
        return Ok(RawAxis::DegreesMinutes {
            degrees,
            minutes: second.value(),
            letter,
        });
    };
    let Number::Integer(minutes) = second else {
        return Err("fractional minutes cannot be followed by seconds");
    };
    tokens.eat(Token::SecondMark);

    let letter = tokens.letter(letters);
    Ok(RawAxis::DegreesMinutesSeconds {
        degrees,
        minutes,
        seconds: third.value(),
        letter,
    })
}

fn walk(tokens: &[Token]) -> Result<(RawAxis, RawAxis), &'static str> {
    let mut tokens = Tokens {
        tokens,
        position: 0,
    };
    let latitude = axis(&mut tokens, ['N', 'S'])?;
    // the axes must be separated by a comma or the latitude hemisphere
    // letter; a comma right after the letter is tolerated
    let comma = tokens.eat(Token::Comma);
    if latitude.letter().is_none() && !comma {
        return Err("expected a comma or hemisphere letter after the latitude");
    }
    let longitude = axis(&mut tokens, ['E', 'W'])?;
    if tokens.peek().is_some() {
        return Err("unexpected trailing input after the longitude");
    }
    Ok((latitude, longitude))
}

/// Resolves an integer degree field and optional letter into an unsigned
/// degree count and hemisphere; without a letter the sign decides.
fn resolve<H: Hemisphere>(degrees: i64, letter: Option<char>) -> Result<(u16, H), Error> {
    let (magnitude, hemisphere) = match letter {
        Some(c) => {
            if degrees < 0 {
                return Err(H::range_error(degrees as f64));
            }
            (
                degrees,
                H::from_letter(c).expect("the walker only passes matching letters"),
            )
        }
        None => (degrees.abs(), crate::location::hemisphere_of(degrees as f64)),
    };
    u16::try_from(magnitude)
        .map_err(|_| H::range_error(magnitude as f64))
        .map(|degrees| (degrees, hemisphere))
}

fn lettered_degrees<H: Hemisphere>(value: f64, letter: Option<char>) -> Result<DegAxis<H>, Error> {
    match letter {
        Some(c) => DegAxis::new(
            value,
            H::from_letter(c).expect("the walker only passes matching letters"),
        ),
        None => DegAxis::new(value.abs(), crate::location::hemisphere_of(value)),
    }
}

fn assemble(latitude: RawAxis, longitude: RawAxis, input: &str) -> Result<Location, ParseError> {
    let range = |source: Error| ParseError::Range {
        source,
        input: input.to_owned(),
    };
    match (latitude, longitude) {
        (
            RawAxis::Decimal {
                value: lat,
                letter: lat_letter,
            },
            RawAxis::Decimal {
                value: lon,
                letter: lon_letter,
            },
        ) => {
            if lat_letter.is_none() && lon_letter.is_none() {
                return Dd::new(lat, lon).map(Location::Dd).map_err(range);
            }
            Ok(Location::deg(
                lettered_degrees::<Ns>(lat, lat_letter).map_err(range)?,
                lettered_degrees::<Ew>(lon, lon_letter).map_err(range)?,
            ))
        }
        (
            RawAxis::DegreesMinutes {
                degrees: lat_degrees,
                minutes: lat_minutes,
                letter: lat_letter,
            },
            RawAxis::DegreesMinutes {
                degrees: lon_degrees,
                minutes: lon_minutes,
                letter: lon_letter,
            },
        ) => {
            let (lat_degrees, ns) = resolve::<Ns>(lat_degrees, lat_letter).map_err(range)?;
            let (lon_degrees, ew) = resolve::<Ew>(lon_degrees, lon_letter).map_err(range)?;
            Ok(Location::dm(
                DmAxis::new(lat_degrees, lat_minutes, ns).map_err(range)?,
                DmAxis::new(lon_degrees, lon_minutes, ew).map_err(range)?,
            ))
        }
        (
            RawAxis::DegreesMinutesSeconds {
                degrees: lat_degrees,
                minutes: lat_minutes,
                seconds: lat_seconds,
                letter: lat_letter,
            },
            RawAxis::DegreesMinutesSeconds {
                degrees: lon_degrees,
                minutes: lon_minutes,
                seconds: lon_seconds,
                letter: lon_letter,
            },
        ) => {
            let (lat_degrees, ns) = resolve::<Ns>(lat_degrees, lat_letter).map_err(range)?;
            let (lon_degrees, ew) = resolve::<Ew>(lon_degrees, lon_letter).map_err(range)?;
            let minutes = |value: i64| {
                u8::try_from(value).map_err(|_| Error::MinutesRange(value as f64))
            };
            Ok(Location::dms(
                DmsAxis::new(
                    lat_degrees,
                    minutes(lat_minutes).map_err(range)?,
                    lat_seconds,
                    ns,
                )
                .map_err(range)?,
                DmsAxis::new(
                    lon_degrees,
                    minutes(lon_minutes).map_err(range)?,
                    lon_seconds,
                    ew,
                )
                .map_err(range)?,
            ))
        }
        _ => Err(ParseError::Grammar {
            reason: "latitude and longitude use different notations",
            input: input.to_owned(),
        }),
    }
}

pub(crate) fn parse_location(input: &str) -> Result<Location, ParseError> {
    let tokens = tokenize(input)?;
    let (latitude, longitude) = walk(&tokens).map_err(|reason| ParseError::Grammar {
        reason,
        input: input.to_owned(),
    })?;
    assemble(latitude, longitude, input)
}

/// Parses any of the four coordinate notations.
///
/// Failures are logged at warning level and returned as a [`ParseError`]
/// naming the input. For the never-fails variant used in field-parser
/// chains, see [`parse_field`].
///
/// ```
/// use graticule::Location;
///
/// let fuji: Location = "35°21′39″N, 138°43′39″E".parse()?;
/// assert!("garbage".parse::<Location>().is_err());
/// # Ok::<(), graticule::ParseError>(())
/// ```
impl FromStr for Location {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        parse_location(input).map_err(|error| {
            tracing::warn!(input, %error, "could not parse coordinate");
            error
        })
    }
}

/// One scalar field as seen by a tabular reader: absent, plain text, or a
/// coordinate.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// The field was absent.
    Null,
    /// The field did not read as a coordinate; the original text, passed
    /// through unchanged.
    Text(&'a str),
    /// The field read as a coordinate.
    Location(Location),
}

/// Coordinate stage for a scalar field-parser chain.
///
/// Readers that try a priority chain of null/bool/number/date parsers per
/// cell can slot this in: it never fails, returning the input unchanged
/// when it is not a coordinate and passing absent input through as
/// [`FieldValue::Null`].
#[must_use]
pub fn parse_field(input: Option<&str>) -> FieldValue<'_> {
    match input {
        None => FieldValue::Null,
        Some(text) => match parse_location(text) {
            Ok(location) => FieldValue::Location(location),
            Err(_) => FieldValue::Text(text),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{Dm, Dms};
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    fn parsed(input: &str) -> Location {
        input
            .parse()
            .unwrap_or_else(|error| panic!("{input:?} should parse: {error}"))
    }

    #[rstest]
    #[case("51.5072, -0.1275")]
    #[case("51.5072,-0.1275")]
    #[case(" 51.5072 , -0.1275 ")]
    fn plain_decimal_degrees(#[case] input: &str) {
        let Location::Dd(dd) = parsed(input) else {
            panic!("expected the decimal-degrees notation");
        };
        assert_abs_diff_eq!(dd.latitude, 51.5072);
        assert_abs_diff_eq!(dd.longitude, -0.1275);
    }

    #[test]
    fn decimal_degrees_with_letters() {
        let Location::Deg(deg) = parsed("51.5072N, 0.1275W") else {
            panic!("expected the lettered notation");
        };
        assert_abs_diff_eq!(deg.latitude.degrees, 51.5072);
        assert_eq!(deg.latitude.hemisphere, Ns::North);
        assert_abs_diff_eq!(deg.longitude.degrees, 0.1275);
        assert_eq!(deg.longitude.hemisphere, Ew::West);
    }

    #[rstest]
    #[case("51°30.433'N, 0°7.65'W")]
    #[case("51 30.433 N, 0 7.65 W")]
    #[case("51° 30.433′ N 0° 7.65′ W")]
    fn degrees_and_decimal_minutes(#[case] input: &str) {
        let Location::Dm(Dm {
            latitude,
            longitude,
        }) = parsed(input)
        else {
            panic!("expected the degree-minute notation");
        };
        assert_eq!(latitude.degrees, 51);
        assert_abs_diff_eq!(latitude.minutes, 30.433);
        assert_eq!(latitude.hemisphere, Ns::North);
        assert_eq!(longitude.degrees, 0);
        assert_abs_diff_eq!(longitude.minutes, 7.65);
        assert_eq!(longitude.hemisphere, Ew::West);
    }

    #[rstest]
    // every accepted mark set, including the word-processor look-alikes
    #[case("51°30'26\"N, 0°7'39\"W")]
    #[case("51°30′26″N, 0°7′39″W")]
    #[case("51º30ʹ26ʺN, 0º7ʹ39ʺW")]
    #[case("51˚30’26”N, 0˚7’39”W")]
    #[case("51 30 26N, 0 7 39W")]
    #[case("51°30′26″N 0°7′39″W")]
    fn degrees_minutes_seconds(#[case] input: &str) {
        let Location::Dms(Dms {
            latitude,
            longitude,
        }) = parsed(input)
        else {
            panic!("expected the degree-minute-second notation");
        };
        assert_eq!(
            (latitude.degrees, latitude.minutes, latitude.hemisphere),
            (51, 30, Ns::North)
        );
        assert_abs_diff_eq!(latitude.seconds, 26.0);
        assert_eq!(
            (longitude.degrees, longitude.minutes, longitude.hemisphere),
            (0, 7, Ew::West)
        );
        assert_abs_diff_eq!(longitude.seconds, 39.0);
    }

    #[test]
    fn unlettered_forms_take_the_hemisphere_from_the_sign() {
        let Location::Dms(dms) = parsed("-51 30 26, 0 7 39") else {
            panic!("expected the degree-minute-second notation");
        };
        assert_eq!(dms.latitude.hemisphere, Ns::South);
        assert_eq!(dms.latitude.degrees, 51);
        assert_eq!(dms.longitude.hemisphere, Ew::East);
    }

    #[test]
    fn fractional_seconds_survive() {
        let location = parsed("51°28′40.4″N, 0°0′5.4″W");
        let dd = location.to_dd();
        assert_abs_diff_eq!(dd.latitude, 51.477_888_89, epsilon = 1e-8);
        assert_abs_diff_eq!(dd.longitude, -0.0015, epsilon = 1e-9);
    }

    #[test]
    fn comma_after_latitude_letter_is_tolerated() {
        let with = parsed("51.5072N, 0.1275W");
        let without = parsed("51.5072N 0.1275W");
        assert_eq!(with, without);
    }

    #[rstest]
    #[case("", "expected a number")]
    #[case("N, 0.5", "expected a number")]
    #[case("51.5 0.5", "expected a comma or hemisphere letter")]
    #[case("51.5, 0.5, 7", "unexpected trailing input")]
    #[case("51.5.5, 2", "unexpected character")]
    #[case("fish", "unexpected character")]
    #[case("51.5N, 0°7′39″W", "different notations")]
    #[case("12.5 30′N, 0.5W", "fractional degrees")]
    #[case("12 30.5 7N, 0 1 2W", "fractional minutes")]
    fn malformed_input_is_described(#[case] input: &str, #[case] fragment: &str) {
        let error = input.parse::<Location>().unwrap_err();
        let message = error.to_string();
        assert!(
            message.contains(fragment),
            "{message:?} should mention {fragment:?}"
        );
        if !input.is_empty() {
            assert!(message.contains(input), "{message:?} should name the input");
        }
    }

    #[rstest]
    #[case("91N, 0E")]
    #[case("0N, 181E")]
    #[case("12°61′N, 0°1′E")]
    #[case("12°5′61″N, 0°1′2″E")]
    #[case("-91.5, 0")]
    #[case("0, -180")]
    fn out_of_range_values_are_rejected(#[case] input: &str) {
        assert!(matches!(
            input.parse::<Location>().unwrap_err(),
            ParseError::Range { .. }
        ));
    }

    #[test]
    fn field_parser_stage_never_fails() {
        assert_eq!(parse_field(None), FieldValue::Null);
        assert_eq!(
            parse_field(Some("not a coordinate")),
            FieldValue::Text("not a coordinate")
        );
        let FieldValue::Location(location) = parse_field(Some("35.6895, 139.6917")) else {
            panic!("expected a coordinate");
        };
        assert_abs_diff_eq!(location.to_dd().latitude, 35.6895);
    }
}
