use crate::angle;
use crate::compass::{Bearing, Direction};
use crate::error::Error;
use uom::si::f64::{Angle, Length};
use uom::si::{angle::degree, length::meter};

#[cfg(any(feature = "approx", test))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters, as used by the spherical formulas.
pub(crate) const MEAN_EARTH_RADIUS: f64 = 6_371_000.0;

// Per-degree surface distances for the equirectangular approximation. One
// degree of latitude spans 110 574 m at the equator and 1 124 m more at the
// poles; one degree of longitude spans 111 320 m at the equator and shrinks
// with cos(latitude).
const METERS_PER_DEGREE_LATITUDE_EQUATOR: f64 = 110_574.0;
const METERS_PER_DEGREE_LATITUDE_POLE_DELTA: f64 = 1_124.0;
const METERS_PER_DEGREE_LONGITUDE_EQUATOR: f64 = 111_320.0;

/// Meters per degree of latitude at the given latitude, interpolated
/// linearly between the equator and pole values.
pub(crate) fn meters_per_degree_latitude(latitude: f64) -> f64 {
    METERS_PER_DEGREE_LATITUDE_EQUATOR
        + METERS_PER_DEGREE_LATITUDE_POLE_DELTA * latitude.abs() / 90.0
}

/// Meters per degree of longitude at the given latitude.
pub(crate) fn meters_per_degree_longitude(latitude: f64) -> f64 {
    METERS_PER_DEGREE_LONGITUDE_EQUATOR * latitude.to_radians().cos()
}

/// Central angle between two points in radians, by the inverse haversine.
///
/// Multiply by the sphere radius to get great-circle distance. All inputs
/// are in radians.
pub(crate) fn central_angle(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> f64 {
    let delta_lat = lat_b - lat_a;
    let delta_lon = lon_b - lon_a;
    let a = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lon / 2.0).sin().powi(2);
    2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Which side of its axis a coordinate component lies on.
///
/// Implemented by [`Ns`] for latitude and [`Ew`] for longitude; the
/// hemisphere-lettered notations are generic over this so the
/// accumulation and decomposition arithmetic is written once per notation
/// rather than once per axis.
pub trait Hemisphere: Copy {
    /// Largest magnitude the axis allows: 90° for latitude, 180° for
    /// longitude.
    const AXIS_BOUND: f64;

    /// The hemisphere of nonnegative signed values (N or E).
    fn positive() -> Self;

    /// The hemisphere of negative signed values (S or W).
    fn negative() -> Self;

    fn is_negative(self) -> bool;

    /// The direction letter, one of `N`, `S`, `E`, `W`.
    fn letter(self) -> char;

    /// Looks a direction letter up, eg during parsing.
    fn from_letter(letter: char) -> Option<Self>;

    /// The range error for this axis, carrying the rejected value.
    fn range_error(degrees: f64) -> Error;
}

/// Latitude hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Ns {
    North,
    South,
}

/// Longitude hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Ew {
    East,
    West,
}

impl Hemisphere for Ns {
    const AXIS_BOUND: f64 = 90.0;

    fn positive() -> Self {
        Ns::North
    }

    fn negative() -> Self {
        Ns::South
    }

    fn is_negative(self) -> bool {
        self == Ns::South
    }

    fn letter(self) -> char {
        match self {
            Ns::North => 'N',
            Ns::South => 'S',
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'N' => Some(Ns::North),
            'S' => Some(Ns::South),
            _ => None,
        }
    }

    fn range_error(degrees: f64) -> Error {
        Error::LatitudeRange(degrees)
    }
}

impl Hemisphere for Ew {
    const AXIS_BOUND: f64 = 180.0;

    fn positive() -> Self {
        Ew::East
    }

    fn negative() -> Self {
        Ew::West
    }

    fn is_negative(self) -> bool {
        self == Ew::West
    }

    fn letter(self) -> char {
        match self {
            Ew::East => 'E',
            Ew::West => 'W',
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'E' => Some(Ew::East),
            'W' => Some(Ew::West),
            _ => None,
        }
    }

    fn range_error(degrees: f64) -> Error {
        Error::LongitudeRange(degrees)
    }
}

pub(crate) fn hemisphere_of<H: Hemisphere>(signed: f64) -> H {
    if signed < 0.0 {
        H::negative()
    } else {
        H::positive()
    }
}

/// One axis of the degrees-plus-direction notation: an unsigned degree
/// value and its hemisphere letter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DegAxis<H> {
    pub degrees: f64,
    pub hemisphere: H,
}

impl<H: Hemisphere> DegAxis<H> {
    /// Validates `degrees` against [0°, axis bound].
    pub fn new(degrees: f64, hemisphere: H) -> Result<Self, Error> {
        if !(0.0..=H::AXIS_BOUND).contains(&degrees) {
            return Err(H::range_error(degrees));
        }
        Ok(Self {
            degrees,
            hemisphere,
        })
    }

    pub(crate) fn from_signed(signed: f64) -> Self {
        Self {
            degrees: signed.abs(),
            hemisphere: hemisphere_of(signed),
        }
    }

    pub(crate) fn magnitude(&self) -> f64 {
        self.degrees
    }

    pub(crate) fn signed(&self) -> f64 {
        if self.hemisphere.is_negative() {
            -self.degrees
        } else {
            self.degrees
        }
    }
}

/// One axis of the degrees-and-decimal-minutes notation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DmAxis<H> {
    pub degrees: u16,
    pub minutes: f64,
    pub hemisphere: H,
}

impl<H: Hemisphere> DmAxis<H> {
    /// Validates the integer degrees against the axis bound, the minutes
    /// against [0, 60), and the accumulated total against the axis bound.
    pub fn new(degrees: u16, minutes: f64, hemisphere: H) -> Result<Self, Error> {
        if !(0.0..60.0).contains(&minutes) {
            return Err(Error::MinutesRange(minutes));
        }
        let axis = Self {
            degrees,
            minutes,
            hemisphere,
        };
        if f64::from(degrees) > H::AXIS_BOUND || axis.magnitude() > H::AXIS_BOUND {
            return Err(H::range_error(axis.magnitude()));
        }
        Ok(axis)
    }

    pub(crate) fn from_parts(magnitude: f64, hemisphere: H) -> Self {
        let degrees = magnitude.trunc();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Self {
            degrees: degrees as u16,
            minutes: (magnitude - degrees) * 60.0,
            hemisphere,
        }
    }

    pub(crate) fn from_signed(signed: f64) -> Self {
        Self::from_parts(signed.abs(), hemisphere_of(signed))
    }

    pub(crate) fn magnitude(&self) -> f64 {
        f64::from(self.degrees) + self.minutes / 60.0
    }

    pub(crate) fn signed(&self) -> f64 {
        if self.hemisphere.is_negative() {
            -self.magnitude()
        } else {
            self.magnitude()
        }
    }
}

/// One axis of the degrees-minutes-decimal-seconds notation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DmsAxis<H> {
    pub degrees: u16,
    pub minutes: u8,
    pub seconds: f64,
    pub hemisphere: H,
}

impl<H: Hemisphere> DmsAxis<H> {
    /// Validates degrees against the axis bound, minutes and seconds
    /// against [0, 60), and the accumulated total against the axis bound.
    pub fn new(degrees: u16, minutes: u8, seconds: f64, hemisphere: H) -> Result<Self, Error> {
        if minutes >= 60 {
            return Err(Error::MinutesRange(f64::from(minutes)));
        }
        if !(0.0..60.0).contains(&seconds) {
            return Err(Error::SecondsRange(seconds));
        }
        let axis = Self {
            degrees,
            minutes,
            seconds,
            hemisphere,
        };
        if f64::from(degrees) > H::AXIS_BOUND || axis.magnitude() > H::AXIS_BOUND {
            return Err(H::range_error(axis.magnitude()));
        }
        Ok(axis)
    }

    pub(crate) fn from_parts(magnitude: f64, hemisphere: H) -> Self {
        let degrees = magnitude.trunc();
        let minutes_total = (magnitude - degrees) * 60.0;
        let minutes = minutes_total.trunc();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Self {
            degrees: degrees as u16,
            minutes: minutes as u8,
            seconds: (minutes_total - minutes) * 60.0,
            hemisphere,
        }
    }

    pub(crate) fn from_signed(signed: f64) -> Self {
        Self::from_parts(signed.abs(), hemisphere_of(signed))
    }

    pub(crate) fn magnitude(&self) -> f64 {
        f64::from(self.degrees) + f64::from(self.minutes) / 60.0 + self.seconds / 3600.0
    }

    pub(crate) fn signed(&self) -> f64 {
        if self.hemisphere.is_negative() {
            -self.magnitude()
        } else {
            self.magnitude()
        }
    }
}

/// Signed decimal degrees, the canonical form all navigation math runs on.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dd {
    pub latitude: f64,
    pub longitude: f64,
}

impl Dd {
    /// Validates latitude against [-90°, 90°] and longitude against
    /// (-180°, 180°].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, Error> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::LatitudeRange(latitude));
        }
        if !(longitude > -180.0 && longitude <= 180.0) {
            return Err(Error::LongitudeRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Unsigned degrees plus hemisphere letters on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Deg {
    pub latitude: DegAxis<Ns>,
    pub longitude: DegAxis<Ew>,
}

/// Integer degrees and decimal minutes plus hemisphere letters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dm {
    pub latitude: DmAxis<Ns>,
    pub longitude: DmAxis<Ew>,
}

/// Integer degrees, integer minutes, and decimal seconds plus hemisphere
/// letters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dms {
    pub latitude: DmsAxis<Ns>,
    pub longitude: DmsAxis<Ew>,
}

/// An Earth-bound location in one of the four common lat/lon notations.
///
/// The cases convert into each other without loss beyond float rounding;
/// all navigation math first normalizes to [`Dd`]. Construct a value with
/// the validated constructors ([`Location::dd`] and friends, or the axis
/// `new` functions), with [`str::parse`], or by pattern-building the cases
/// directly — the fields are public, and keeping directly-built values
/// inside the documented ranges is the caller's responsibility.
///
/// ```
/// use graticule::Location;
///
/// let royal_observatory = Location::dd(51.4779, -0.0015)?;
/// let same: Location = "51°28′40.4″N, 0°0′5.4″W".parse()?;
/// # use approx::assert_abs_diff_eq;
/// assert_abs_diff_eq!(royal_observatory, same, epsilon = 1e-4);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Location {
    Dd(Dd),
    Deg(Deg),
    Dm(Dm),
    Dms(Dms),
}

impl Location {
    /// Builds the decimal-degrees case; latitude in [-90°, 90°], longitude
    /// in (-180°, 180°].
    pub fn dd(latitude: f64, longitude: f64) -> Result<Self, Error> {
        Dd::new(latitude, longitude).map(Location::Dd)
    }

    /// Builds the degrees-plus-direction case from validated axes.
    #[must_use]
    pub fn deg(latitude: DegAxis<Ns>, longitude: DegAxis<Ew>) -> Self {
        Location::Deg(Deg {
            latitude,
            longitude,
        })
    }

    /// Builds the degrees-decimal-minutes case from validated axes.
    #[must_use]
    pub fn dm(latitude: DmAxis<Ns>, longitude: DmAxis<Ew>) -> Self {
        Location::Dm(Dm {
            latitude,
            longitude,
        })
    }

    /// Builds the degrees-minutes-seconds case from validated axes.
    #[must_use]
    pub fn dms(latitude: DmsAxis<Ns>, longitude: DmsAxis<Ew>) -> Self {
        Location::Dms(Dms {
            latitude,
            longitude,
        })
    }

    /// Converts to signed decimal degrees by accumulating
    /// `degrees + minutes/60 + seconds/3600` with the sign taken from the
    /// hemisphere letter.
    #[must_use]
    pub fn to_dd(&self) -> Dd {
        match self {
            Location::Dd(dd) => *dd,
            Location::Deg(deg) => Dd {
                latitude: deg.latitude.signed(),
                longitude: deg.longitude.signed(),
            },
            Location::Dm(dm) => Dd {
                latitude: dm.latitude.signed(),
                longitude: dm.longitude.signed(),
            },
            Location::Dms(dms) => Dd {
                latitude: dms.latitude.signed(),
                longitude: dms.longitude.signed(),
            },
        }
    }

    /// Converts to degrees plus direction letters. Conversions between the
    /// lettered notations keep the letters as they are, so `0°S` stays
    /// south.
    #[must_use]
    pub fn to_deg(&self) -> Deg {
        match self {
            Location::Dd(dd) => Deg {
                latitude: DegAxis::from_signed(dd.latitude),
                longitude: DegAxis::from_signed(dd.longitude),
            },
            Location::Deg(deg) => *deg,
            Location::Dm(dm) => Deg {
                latitude: DegAxis {
                    degrees: dm.latitude.magnitude(),
                    hemisphere: dm.latitude.hemisphere,
                },
                longitude: DegAxis {
                    degrees: dm.longitude.magnitude(),
                    hemisphere: dm.longitude.hemisphere,
                },
            },
            Location::Dms(dms) => Deg {
                latitude: DegAxis {
                    degrees: dms.latitude.magnitude(),
                    hemisphere: dms.latitude.hemisphere,
                },
                longitude: DegAxis {
                    degrees: dms.longitude.magnitude(),
                    hemisphere: dms.longitude.hemisphere,
                },
            },
        }
    }

    /// Converts to integer degrees and decimal minutes: the integer degree
    /// is truncated off, the remaining fraction times 60 becomes the
    /// minutes.
    #[must_use]
    pub fn to_dm(&self) -> Dm {
        match self {
            Location::Dd(dd) => Dm {
                latitude: DmAxis::from_signed(dd.latitude),
                longitude: DmAxis::from_signed(dd.longitude),
            },
            Location::Deg(deg) => Dm {
                latitude: DmAxis::from_parts(deg.latitude.magnitude(), deg.latitude.hemisphere),
                longitude: DmAxis::from_parts(deg.longitude.magnitude(), deg.longitude.hemisphere),
            },
            Location::Dm(dm) => *dm,
            Location::Dms(dms) => Dm {
                latitude: DmAxis::from_parts(dms.latitude.magnitude(), dms.latitude.hemisphere),
                longitude: DmAxis::from_parts(dms.longitude.magnitude(), dms.longitude.hemisphere),
            },
        }
    }

    /// Converts to integer degrees, integer minutes, and decimal seconds
    /// by truncating twice and multiplying the remainder by 60 each time.
    #[must_use]
    pub fn to_dms(&self) -> Dms {
        match self {
            Location::Dd(dd) => Dms {
                latitude: DmsAxis::from_signed(dd.latitude),
                longitude: DmsAxis::from_signed(dd.longitude),
            },
            Location::Deg(deg) => Dms {
                latitude: DmsAxis::from_parts(deg.latitude.magnitude(), deg.latitude.hemisphere),
                longitude: DmsAxis::from_parts(
                    deg.longitude.magnitude(),
                    deg.longitude.hemisphere,
                ),
            },
            Location::Dm(dm) => Dms {
                latitude: DmsAxis::from_parts(dm.latitude.magnitude(), dm.latitude.hemisphere),
                longitude: DmsAxis::from_parts(dm.longitude.magnitude(), dm.longitude.hemisphere),
            },
            Location::Dms(dms) => *dms,
        }
    }

    /// The signed latitude.
    #[must_use]
    pub fn latitude(&self) -> Angle {
        Angle::new::<degree>(self.to_dd().latitude)
    }

    /// The signed longitude.
    #[must_use]
    pub fn longitude(&self) -> Angle {
        Angle::new::<degree>(self.to_dd().longitude)
    }

    /// Whether this location sits exactly on a pole, where longitude is
    /// physically undefined.
    #[must_use]
    pub fn is_pole(&self) -> bool {
        self.to_dd().latitude.abs() == 90.0
    }

    /// Great-circle distance to `other` by the default (haversine)
    /// algorithm.
    #[must_use]
    pub fn distance_to(&self, other: &Location) -> Length {
        self.distance_with(DistanceAlgorithm::default(), other)
    }

    /// Distance to `other` by the chosen algorithm.
    ///
    /// The equirectangular algorithm assumes both points lie within one
    /// hemisphere and that the span does not cross the antimeridian or a
    /// pole; such spans are a precondition, not detected. Haversine has no
    /// such restriction.
    #[must_use]
    pub fn distance_with(&self, algorithm: DistanceAlgorithm, other: &Location) -> Length {
        let a = self.to_dd();
        let b = other.to_dd();
        let meters = match algorithm {
            DistanceAlgorithm::Haversine => {
                MEAN_EARTH_RADIUS
                    * central_angle(
                        a.latitude.to_radians(),
                        a.longitude.to_radians(),
                        b.latitude.to_radians(),
                        b.longitude.to_radians(),
                    )
            }
            DistanceAlgorithm::Equirectangular => {
                let average_latitude = (a.latitude + b.latitude) / 2.0;
                let north = meters_per_degree_latitude(average_latitude)
                    * (b.latitude - a.latitude);
                let east = meters_per_degree_longitude(average_latitude)
                    * (b.longitude - a.longitude);
                north.hypot(east)
            }
        };
        Length::new::<meter>(meters)
    }

    /// Solves the forward geodetic problem on the sphere: the location
    /// reached by moving `distance` along the initial `direction`.
    #[must_use]
    pub fn travel(&self, direction: impl Into<Direction>, distance: Length) -> Location {
        let bearing = direction.into().bearing().degrees().to_radians();
        let here = self.to_dd();
        let lat = here.latitude.to_radians();
        let delta = distance.get::<meter>() / MEAN_EARTH_RADIUS;

        let destination_lat =
            (lat.sin() * delta.cos() + lat.cos() * delta.sin() * bearing.cos()).asin();
        let delta_lon = (bearing.sin() * delta.sin() * lat.cos())
            .atan2(delta.cos() - lat.sin() * destination_lat.sin());

        Location::Dd(Dd {
            latitude: destination_lat.to_degrees(),
            longitude: angle::wrap_longitude(here.longitude + delta_lon.to_degrees()),
        })
    }

    /// Solves the inverse problem: the initial bearing of the great circle
    /// from here towards `other`.
    #[must_use]
    pub fn heading_to(&self, other: &Location) -> Bearing {
        let a = self.to_dd();
        let b = other.to_dd();
        let lat_a = a.latitude.to_radians();
        let lat_b = b.latitude.to_radians();
        let delta_lon = (b.longitude - a.longitude).to_radians();

        let east = lat_b.cos() * delta_lon.sin();
        let north = lat_a.cos() * lat_b.sin() - lat_a.sin() * lat_b.cos() * delta_lon.cos();
        Bearing::from_degrees(east.atan2(north).to_degrees())
    }

    /// Shifts the location by the given coordinate deltas.
    ///
    /// The longitude wraps into (-180°, 180°]. The latitude mirror-folds at
    /// the poles instead of wrapping, and a fold that passes over a pole
    /// flips the longitude by 180° — walking 100° north from the equator
    /// leaves you 80° up on the far side of the globe.
    #[must_use]
    pub fn offset_by(&self, delta_latitude: Angle, delta_longitude: Angle) -> Location {
        let here = self.to_dd();
        let delta_lat = delta_latitude.get::<degree>();
        let delta_lon = delta_longitude.get::<degree>();

        if delta_lat == 0.0 {
            return Location::Dd(Dd {
                latitude: here.latitude,
                longitude: angle::wrap_longitude(here.longitude + delta_lon),
            });
        }

        let (latitude, crossed_pole) = angle::fold_latitude(here.latitude + delta_lat);
        let flip = if crossed_pole { 180.0 } else { 0.0 };
        Location::Dd(Dd {
            latitude,
            longitude: angle::wrap_longitude(here.longitude + delta_lon + flip),
        })
    }
}

impl From<Dd> for Location {
    fn from(dd: Dd) -> Self {
        Location::Dd(dd)
    }
}

impl From<Deg> for Location {
    fn from(deg: Deg) -> Self {
        Location::Deg(deg)
    }
}

impl From<Dm> for Location {
    fn from(dm: Dm) -> Self {
        Location::Dm(dm)
    }
}

impl From<Dms> for Location {
    fn from(dms: Dms) -> Self {
        Location::Dms(dms)
    }
}

/// Distance formula selector; haversine unless you have a reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DistanceAlgorithm {
    /// Planar Pythagorean distance on a tangent plane, cheap and accurate
    /// to a fraction of a percent over a few hundred kilometers. Assumes
    /// the span stays within one hemisphere and off the antimeridian.
    Equirectangular,
    /// Spherical great-circle distance.
    #[default]
    Haversine,
}

#[cfg(any(feature = "approx", test))]
fn close(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= epsilon
}

#[cfg(any(feature = "approx", test))]
impl<H: Hemisphere + PartialEq> AbsDiffEq<Self> for DegAxis<H> {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        1e-6
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.hemisphere == other.hemisphere && close(self.degrees, other.degrees, epsilon)
    }
}

#[cfg(any(feature = "approx", test))]
impl<H: Hemisphere + PartialEq> AbsDiffEq<Self> for DmAxis<H> {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        1e-6
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.hemisphere == other.hemisphere
            && self.degrees == other.degrees
            && close(self.minutes, other.minutes, epsilon)
    }
}

#[cfg(any(feature = "approx", test))]
impl<H: Hemisphere + PartialEq> AbsDiffEq<Self> for DmsAxis<H> {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        1e-6
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.hemisphere == other.hemisphere
            && self.degrees == other.degrees
            && self.minutes == other.minutes
            && close(self.seconds, other.seconds, epsilon)
    }
}

#[cfg(any(feature = "approx", test))]
impl AbsDiffEq<Self> for Location {
    type Epsilon = f64;

    /// About 0.1 m at degree scale.
    fn default_epsilon() -> Self::Epsilon {
        1e-6
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        let a = self.to_dd();
        let b = other.to_dd();

        // longitude is undefined at the poles, so two locations at the
        // same pole are the same place no matter their longitude
        if a.latitude.abs() == 90.0 && a.latitude == b.latitude {
            return true;
        }

        // same-notation comparisons are component-wise: integer fields
        // exact, the final float field within epsilon
        match (self, other) {
            (Location::Deg(x), Location::Deg(y)) => {
                x.latitude.abs_diff_eq(&y.latitude, epsilon)
                    && x.longitude.abs_diff_eq(&y.longitude, epsilon)
            }
            (Location::Dm(x), Location::Dm(y)) => {
                x.latitude.abs_diff_eq(&y.latitude, epsilon)
                    && x.longitude.abs_diff_eq(&y.longitude, epsilon)
            }
            (Location::Dms(x), Location::Dms(y)) => {
                x.latitude.abs_diff_eq(&y.latitude, epsilon)
                    && x.longitude.abs_diff_eq(&y.longitude, epsilon)
            }
            _ => close(a.latitude, b.latitude, epsilon) && close(a.longitude, b.longitude, epsilon),
        }
    }
}

#[cfg(any(feature = "approx", test))]
impl RelativeEq for Location {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        let a = self.to_dd();
        let b = other.to_dd();
        if a.latitude.abs() == 90.0 && a.latitude == b.latitude {
            return true;
        }
        f64::relative_eq(&a.latitude, &b.latitude, epsilon, max_relative)
            && f64::relative_eq(&a.longitude, &b.longitude, epsilon, max_relative)
    }
}
