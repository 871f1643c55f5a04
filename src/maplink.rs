use crate::error::Error;
use crate::format::FormatOptions;
use crate::location::Location;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Everything but the characters Google's own place links leave bare.
const PLACE_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'.')
    .remove(b',')
    .remove(b'-')
    .remove(b'/')
    .remove(b'@');

/// URL scheme for [`place_link`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Scheme {
    Http,
    #[default]
    Https,
}

impl Scheme {
    fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http:",
            Scheme::Https => "https:",
        }
    }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds a Google Maps place link for the location.
///
/// The path names the place in degrees-minutes-seconds and centers the
/// viewport on the decimal-degrees form at the given zoom; zoom levels run
/// from 1 (whole planet) to 20 (rooftops). Fetching the link is the
/// caller's business — this just builds the URL.
///
/// ```
/// use graticule::{maplink::place_link, Location, Scheme};
///
/// let sydney = Location::dd(-33.865, 151.209_444)?;
/// let link = place_link(&sydney, 12, Scheme::Https)?;
/// assert!(link.starts_with("https://www.google.com/maps/place/"));
/// assert!(link.ends_with(",12z"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn place_link(location: &Location, zoom: u8, scheme: Scheme) -> Result<String, Error> {
    if !(1..=20).contains(&zoom) {
        return Err(Error::ZoomRange(zoom));
    }
    let options = FormatOptions::default();
    let place = Location::Dms(location.to_dms()).format(&options);
    let viewport = Location::Dd(location.to_dd()).format(&FormatOptions {
        delimiters: None,
        ..options
    });
    let path = format!("{place}/@{viewport},{zoom}z");
    Ok(format!(
        "{}//www.google.com/maps/place/{}",
        scheme.as_str(),
        utf8_percent_encode(&path, PLACE_SEGMENT),
    ))
}
