use crate::angle;
use crate::error::Error;
use crate::location::{self, Dd, DistanceAlgorithm, Location};
use crate::Vector3;
use uom::si::f64::Length;
use uom::si::length::meter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unit vector from the sphere center towards the location.
fn unit_vector(dd: &Dd) -> Vector3 {
    let latitude = dd.latitude.to_radians();
    let longitude = dd.longitude.to_radians();
    Vector3::new(
        latitude.cos() * longitude.cos(),
        latitude.cos() * longitude.sin(),
        latitude.sin(),
    )
}

/// Inverse of [`unit_vector`]; tolerates non-unit lengths since only the
/// direction matters.
fn to_location(vector: &Vector3) -> Dd {
    let latitude = vector.z.atan2(vector.x.hypot(vector.y)).to_degrees();
    let longitude = vector.y.atan2(vector.x).to_degrees();
    Dd {
        latitude,
        longitude: angle::wrap_longitude(longitude),
    }
}

/// The great-circle chord between two locations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoLine {
    start: Dd,
    end: Dd,
}

impl GeoLine {
    /// Builds a line between two locations, normalized to decimal degrees.
    #[must_use]
    pub fn new(start: &Location, end: &Location) -> Self {
        Self {
            start: start.to_dd(),
            end: end.to_dd(),
        }
    }

    /// The line between a polyline's first and last points.
    #[must_use]
    pub fn from_geodesic(geodesic: &Geodesic) -> Self {
        Self {
            start: geodesic.start(),
            end: geodesic.end(),
        }
    }

    #[must_use]
    pub fn start(&self) -> Dd {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Dd {
        self.end
    }

    /// Great-circle length by the default (haversine) algorithm.
    #[must_use]
    pub fn length(&self) -> Length {
        self.length_with(DistanceAlgorithm::default())
    }

    /// Length by the chosen algorithm.
    #[must_use]
    pub fn length_with(&self, algorithm: DistanceAlgorithm) -> Length {
        Location::Dd(self.start).distance_with(algorithm, &Location::Dd(self.end))
    }

    /// The point halfway along the great circle.
    #[must_use]
    pub fn midpoint(&self) -> Dd {
        self.interpolate(3)
            .expect("3 points is a valid interpolation count")
            .points()[1]
    }

    /// Interpolates `count` evenly-spaced points along the great circle.
    ///
    /// The first and last points are the endpoints themselves, bit for
    /// bit. `count` of 2 returns just the endpoints; below 2 there is no
    /// polyline, so the count is rejected.
    ///
    /// The endpoint trigonometry is computed once and reused for every
    /// intermediate point.
    pub fn interpolate(&self, count: usize) -> Result<Geodesic, Error> {
        if count < 2 {
            return Err(Error::InterpolationCount(count));
        }
        let mut points = Vec::with_capacity(count);
        points.push(self.start);
        if count > 2 {
            let delta = location::central_angle(
                self.start.latitude.to_radians(),
                self.start.longitude.to_radians(),
                self.end.latitude.to_radians(),
                self.end.longitude.to_radians(),
            );
            let sin_delta = delta.sin();
            if sin_delta == 0.0 {
                // coincident (or antipodal) endpoints leave no unique
                // great circle to walk along
                points.resize(count - 1, self.start);
            } else {
                let from = unit_vector(&self.start);
                let to = unit_vector(&self.end);
                for index in 1..count - 1 {
                    let t = index as f64 / (count - 1) as f64;
                    let a = ((1.0 - t) * delta).sin() / sin_delta;
                    let b = (t * delta).sin() / sin_delta;
                    points.push(to_location(&(from * a + to * b)));
                }
            }
        }
        points.push(self.end);
        Ok(Geodesic { points })
    }

    /// Interpolates with however many equal segments it takes to keep each
    /// one at or under `max_step`.
    pub fn interpolate_by_step(&self, max_step: Length) -> Result<Geodesic, Error> {
        let step = max_step.get::<meter>();
        if step <= 0.0 {
            return Err(Error::NonPositiveStep(step));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let segments = ((self.length().get::<meter>() / step).ceil() as usize).max(1);
        self.interpolate(segments + 1)
    }
}

/// A polyline of at least two points approximating a great-circle path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Geodesic {
    points: Vec<Dd>,
}

impl Geodesic {
    /// Builds a polyline from at least two locations, each normalized to
    /// decimal degrees.
    pub fn new(locations: &[Location]) -> Result<Self, Error> {
        if locations.len() < 2 {
            return Err(Error::TooFewPoints(locations.len()));
        }
        Ok(Self {
            points: locations.iter().map(Location::to_dd).collect(),
        })
    }

    #[must_use]
    pub fn points(&self) -> &[Dd] {
        &self.points
    }

    #[must_use]
    pub fn start(&self) -> Dd {
        self.points[0]
    }

    #[must_use]
    pub fn end(&self) -> Dd {
        *self.points.last().expect("a geodesic has at least 2 points")
    }

    /// Sum of the segment lengths by the default (haversine) algorithm.
    #[must_use]
    pub fn length(&self) -> Length {
        self.length_with(DistanceAlgorithm::default())
    }

    /// Sum of the segment lengths by the chosen algorithm.
    #[must_use]
    pub fn length_with(&self, algorithm: DistanceAlgorithm) -> Length {
        self.points
            .windows(2)
            .map(|pair| Location::Dd(pair[0]).distance_with(algorithm, &Location::Dd(pair[1])))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    fn london() -> Location {
        Location::dd(51.507_222, -0.127_5).unwrap()
    }
    fn paris() -> Location {
        Location::dd(48.856_667, 2.352_222).unwrap()
    }

    #[rstest]
    #[case(2)]
    #[case(3)]
    #[case(7)]
    #[case(100)]
    fn interpolation_returns_exactly_count_points_with_exact_endpoints(#[case] count: usize) {
        let line = GeoLine::new(&london(), &paris());
        let geodesic = line.interpolate(count).unwrap();
        assert_eq!(geodesic.points().len(), count);
        assert_eq!(geodesic.start(), line.start());
        assert_eq!(geodesic.end(), line.end());
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn interpolation_counts_below_two_are_rejected(#[case] count: usize) {
        let line = GeoLine::new(&london(), &paris());
        assert_eq!(
            line.interpolate(count).unwrap_err(),
            Error::InterpolationCount(count)
        );
    }

    #[test]
    fn interpolated_segments_are_equal_length() {
        let line = GeoLine::new(&london(), &paris());
        let geodesic = line.interpolate(9).unwrap();
        let lengths: Vec<f64> = geodesic
            .points()
            .windows(2)
            .map(|pair| {
                Location::Dd(pair[0])
                    .distance_to(&Location::Dd(pair[1]))
                    .get::<meter>()
            })
            .collect();
        let expected = line.length().get::<meter>() / 8.0;
        for length in &lengths {
            assert_abs_diff_eq!(*length, expected, epsilon = 1e-3);
        }
        // and they sum back to the whole
        assert_abs_diff_eq!(
            geodesic.length().get::<meter>(),
            line.length().get::<meter>(),
            epsilon = 1e-3
        );
    }

    #[test]
    fn step_interpolation_respects_the_bound() {
        let line = GeoLine::new(&london(), &paris());
        let step = 50_000.0;
        let geodesic = line
            .interpolate_by_step(Length::new::<meter>(step))
            .unwrap();
        for pair in geodesic.points().windows(2) {
            let length = Location::Dd(pair[0])
                .distance_to(&Location::Dd(pair[1]))
                .get::<meter>();
            assert!(length <= step, "segment of {length} m exceeds {step} m");
        }
        assert_eq!(geodesic.start(), line.start());
        assert_eq!(geodesic.end(), line.end());
    }

    #[test]
    fn step_larger_than_the_line_returns_just_the_endpoints() {
        let line = GeoLine::new(&london(), &paris());
        let geodesic = line
            .interpolate_by_step(Length::new::<meter>(1e9))
            .unwrap();
        assert_eq!(geodesic.points().len(), 2);
    }

    #[test]
    fn non_positive_steps_are_rejected() {
        let line = GeoLine::new(&london(), &paris());
        assert_eq!(
            line.interpolate_by_step(Length::new::<meter>(0.0))
                .unwrap_err(),
            Error::NonPositiveStep(0.0)
        );
        assert_eq!(
            line.interpolate_by_step(Length::new::<meter>(-5.0))
                .unwrap_err(),
            Error::NonPositiveStep(-5.0)
        );
    }

    #[test]
    fn midpoint_sits_halfway() {
        let line = GeoLine::new(&london(), &paris());
        let midpoint = Location::Dd(line.midpoint());
        let to_start = Location::Dd(line.start()).distance_to(&midpoint);
        let to_end = Location::Dd(line.end()).distance_to(&midpoint);
        assert_abs_diff_eq!(
            to_start.get::<meter>(),
            to_end.get::<meter>(),
            epsilon = 1e-3
        );
        assert_abs_diff_eq!(
            to_start.get::<meter>(),
            line.length().get::<meter>() / 2.0,
            epsilon = 1e-3
        );
    }

    #[test]
    fn coincident_endpoints_interpolate_to_copies() {
        let line = GeoLine::new(&london(), &london());
        let geodesic = line.interpolate(5).unwrap();
        assert_eq!(geodesic.points().len(), 5);
        for point in geodesic.points() {
            assert_eq!(*point, line.start());
        }
    }

    #[test]
    fn geodesic_needs_two_points() {
        assert_eq!(
            Geodesic::new(&[london()]).unwrap_err(),
            Error::TooFewPoints(1)
        );
        assert_eq!(Geodesic::new(&[]).unwrap_err(), Error::TooFewPoints(0));
    }

    #[test]
    fn geodesic_length_sums_the_segments() {
        let dover = Location::dd(51.129_4, 1.313_9).unwrap();
        let geodesic = Geodesic::new(&[london(), dover, paris()]).unwrap();
        let via = london().distance_to(&dover).get::<meter>()
            + dover.distance_to(&paris()).get::<meter>();
        assert_abs_diff_eq!(geodesic.length().get::<meter>(), via, epsilon = 1e-6);
        // the detour is longer than the straight line
        assert!(geodesic.length() > GeoLine::from_geodesic(&geodesic).length());
    }

    #[test]
    fn line_from_geodesic_takes_the_ends() {
        let geodesic = Geodesic::new(&[london(), paris()]).unwrap();
        let line = GeoLine::from_geodesic(&geodesic);
        assert_eq!(line.start(), london().to_dd());
        assert_eq!(line.end(), paris().to_dd());
    }
}
