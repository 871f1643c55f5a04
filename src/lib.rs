//! Geographic-coordinate handling for the rest of a GIS stack to build on:
//! parsing and formatting of human-written latitude/longitude strings,
//! conversion between the four common coordinate notations, spherical
//! distance/bearing/navigation math, great-circle interpolation, and a
//! simple equirectangular projection for rendering.
//!
//! The heart of the crate is the [`Location`] sum type with one case per
//! notation — signed decimal degrees ([`Dd`]), degrees plus hemisphere
//! letters ([`Deg`]), degrees and decimal minutes ([`Dm`]), and degrees,
//! minutes, and decimal seconds ([`Dms`]). Every case converts into every
//! other, and all of the navigation math first normalizes to decimal
//! degrees. Everything is an immutable value; every function is pure and
//! freely usable from any thread.
//!
//! # Examples
//!
//! Parsing, converting, and measuring:
//!
//! ```
//! use graticule::{DistanceAlgorithm, Location};
//! use uom::si::length::kilometer;
//!
//! let london: Location = "51°30′26″N, 0°7′39″W".parse()?;
//! let paris: Location = "48°51′24″N, 2°21′8″E".parse()?;
//!
//! // all four notations convert into each other; the math always runs on
//! // signed decimal degrees
//! let dd = london.to_dd();
//! assert!((dd.latitude - 51.5072).abs() < 1e-3);
//!
//! let distance = london.distance_to(&paris);
//! assert!((distance.get::<kilometer>() - 343.5).abs() < 0.5);
//!
//! // the cheap planar approximation stays within a fraction of a percent
//! // over spans like this
//! let planar = london.distance_with(DistanceAlgorithm::Equirectangular, &paris);
//! assert!((planar.get::<kilometer>() - distance.get::<kilometer>()).abs() < 0.2);
//! # Ok::<(), graticule::ParseError>(())
//! ```
//!
//! Navigating, interpolating, and projecting:
//!
//! ```
//! use graticule::{Clip, CompassPoint, Equirectangular, GeoLine, Location};
//! use uom::si::f64::Length;
//! use uom::si::length::meter;
//!
//! let start = Location::dd(51.0, 7.0)?;
//! let destination = start.travel(CompassPoint::Northeast, Length::new::<meter>(10_000.0));
//!
//! // break the chord into steps of at most a kilometer
//! let line = GeoLine::new(&start, &destination);
//! let polyline = line.interpolate_by_step(Length::new::<meter>(1_000.0))?;
//! assert!(polyline.points().len() >= 11);
//!
//! // and project it onto a plane for drawing
//! let frame = Equirectangular::new(
//!     &start,
//!     Length::new::<meter>(20_000.0),
//!     Length::new::<meter>(20_000.0),
//! )?;
//! let projected = frame.project_geodesic(&polyline);
//! assert_eq!(projected.clip, Clip::Accepted);
//! assert_eq!(projected.position.len(), polyline.points().len());
//! # Ok::<(), graticule::Error>(())
//! ```

mod angle;
mod compass;
mod error;
mod format;
mod line;
mod location;
mod parse;
mod projection;

pub mod maplink;

#[cfg(feature = "serde")]
pub mod geojson;

pub(crate) type Point2 = nalgebra::Point2<f64>;
pub(crate) type Vector3 = nalgebra::Vector3<f64>;

pub use compass::{Bearing, CompassPoint, Direction};
pub use error::{Error, ParseError};
pub use format::{Delimiters, FormatOptions, Precision, Separator};
pub use line::{Geodesic, GeoLine};
pub use location::{
    Dd, Deg, DegAxis, DistanceAlgorithm, Dm, DmAxis, Dms, DmsAxis, Ew, Hemisphere, Location, Ns,
};
pub use maplink::{place_link, Scheme};
pub use parse::{parse_field, FieldValue};
pub use projection::{Clip, Equirectangular, Projected};
