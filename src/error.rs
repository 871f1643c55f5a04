use thiserror::Error;

/// Errors produced by the validated constructors and the navigation,
/// interpolation, and projection entry points.
///
/// Every variant carries the offending value so callers can report what was
/// actually rejected rather than just that something was.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// Latitude degrees outside [-90°, 90°] (or [0°, 90°] for the
    /// hemisphere-lettered notations).
    #[error("latitude {0}° is outside the [-90°, 90°] range")]
    LatitudeRange(f64),

    /// Longitude degrees outside (-180°, 180°] (or [0°, 180°] for the
    /// hemisphere-lettered notations). Note that -180° itself is never
    /// valid; the antimeridian is always +180°.
    #[error("longitude {0}° is outside the (-180°, 180°] range")]
    LongitudeRange(f64),

    /// Minutes outside [0, 60).
    #[error("minutes value {0} is outside the [0, 60) range")]
    MinutesRange(f64),

    /// Seconds outside [0, 60).
    #[error("seconds value {0} is outside the [0, 60) range")]
    SecondsRange(f64),

    /// A geodesic polyline needs at least two points.
    #[error("a geodesic needs at least 2 points, got {0}")]
    TooFewPoints(usize),

    /// Interpolation point counts below two are meaningless: there is no
    /// polyline with fewer than two vertices.
    #[error("interpolation needs a point count of at least 2, got {0}")]
    InterpolationCount(usize),

    /// Step-bounded interpolation needs a strictly positive step.
    #[error("interpolation step must be positive, got {0} m")]
    NonPositiveStep(f64),

    /// Projection half-extents must be strictly positive.
    #[error("projection half-extent must be positive, got {0} m")]
    NonPositiveExtent(f64),

    /// Map-link zoom levels are 1 through 20.
    #[error("map zoom level must be in 1..=20, got {0}")]
    ZoomRange(u8),
}

/// Errors produced by the coordinate-string parser.
///
/// The failing input is carried verbatim so the error message can name it,
/// which matters when the string came out of the middle of a larger
/// document.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The lexer hit a character that cannot start any token.
    #[error("unexpected character {character:?} at byte {offset} of {input:?}")]
    UnexpectedCharacter {
        character: char,
        offset: usize,
        input: String,
    },

    /// The token stream does not match any of the four coordinate
    /// notations.
    #[error("{reason} in {input:?}")]
    Grammar {
        reason: &'static str,
        input: String,
    },

    /// The tokens formed a coordinate whose numeric fields are out of
    /// range (for example `91°N`).
    #[error("out-of-range coordinate in {input:?}: {source}")]
    Range {
        #[source]
        source: Error,
        input: String,
    },
}

impl ParseError {
    /// The input string that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        match self {
            Self::UnexpectedCharacter { input, .. }
            | Self::Grammar { input, .. }
            | Self::Range { input, .. } => input,
        }
    }
}
