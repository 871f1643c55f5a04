use crate::error::Error;
use crate::line::{GeoLine, Geodesic};
use crate::location::{self, Dd, Location};
use crate::Point2;
use uom::si::f64::Length;
use uom::si::length::meter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Whether a projected point landed inside the projection's bounding
/// rectangle.
///
/// Clipping is advisory: the projected position is returned either way, and
/// the caller decides what to do with out-of-frame points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Clip {
    /// Inside the bounds, or exactly on them.
    Accepted,
    /// Outside the bounds.
    Clipped,
}

/// A projected position (or ordered positions, for lines and polylines)
/// together with its clip classification.
///
/// An aggregate is [`Clip::Clipped`] as soon as any member point is.
#[derive(Debug, Clone, PartialEq)]
pub struct Projected<T> {
    pub position: T,
    pub clip: Clip,
}

/// Equirectangular projection of lat/lon onto a plane tangent at `center`.
///
/// Positions come out in meters east (x) and north (y) of the center,
/// using the same per-degree scale factors as
/// [`DistanceAlgorithm::Equirectangular`](crate::DistanceAlgorithm). Like
/// that distance, the projection assumes its inputs stay in the center's
/// hemisphere and off the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Equirectangular {
    center: Dd,
    meters_per_degree_latitude: f64,
    meters_per_degree_longitude: f64,
    half_width: f64,
    half_height: f64,
}

impl Equirectangular {
    /// Builds a projection centered on `center` with a symmetric bounding
    /// rectangle of `[-half_width, half_width] × [-half_height,
    /// half_height]` in projected meters. Both half-extents must be
    /// strictly positive.
    pub fn new(center: &Location, half_width: Length, half_height: Length) -> Result<Self, Error> {
        let half_width = half_width.get::<meter>();
        let half_height = half_height.get::<meter>();
        if half_width <= 0.0 {
            return Err(Error::NonPositiveExtent(half_width));
        }
        if half_height <= 0.0 {
            return Err(Error::NonPositiveExtent(half_height));
        }
        let center = center.to_dd();
        Ok(Self {
            center,
            meters_per_degree_latitude: location::meters_per_degree_latitude(center.latitude),
            meters_per_degree_longitude: location::meters_per_degree_longitude(center.latitude),
            half_width,
            half_height,
        })
    }

    /// The projection center.
    #[must_use]
    pub fn center(&self) -> Dd {
        self.center
    }

    /// The bounding rectangle's half extents, east-west then north-south.
    #[must_use]
    pub fn bounds(&self) -> (Length, Length) {
        (
            Length::new::<meter>(self.half_width),
            Length::new::<meter>(self.half_height),
        )
    }

    /// Projects a single location.
    #[must_use]
    pub fn project(&self, location: &Location) -> Projected<Point2> {
        let dd = location.to_dd();
        let east = self.meters_per_degree_longitude * (dd.longitude - self.center.longitude);
        let north = self.meters_per_degree_latitude * (dd.latitude - self.center.latitude);
        let clip = if east.abs() <= self.half_width && north.abs() <= self.half_height {
            Clip::Accepted
        } else {
            Clip::Clipped
        };
        Projected {
            position: Point2::new(east, north),
            clip,
        }
    }

    /// Projects both endpoints of a line.
    #[must_use]
    pub fn project_line(&self, line: &GeoLine) -> Projected<Vec<Point2>> {
        self.project_all([line.start(), line.end()].into_iter())
    }

    /// Projects every point of a polyline, in order.
    #[must_use]
    pub fn project_geodesic(&self, geodesic: &Geodesic) -> Projected<Vec<Point2>> {
        self.project_all(geodesic.points().iter().copied())
    }

    fn project_all(&self, points: impl Iterator<Item = Dd>) -> Projected<Vec<Point2>> {
        let mut clip = Clip::Accepted;
        let position = points
            .map(|point| {
                let projected = self.project(&Location::Dd(point));
                if projected.clip == Clip::Clipped {
                    clip = Clip::Clipped;
                }
                projected.position
            })
            .collect();
        Projected { position, clip }
    }
}
