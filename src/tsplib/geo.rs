//! Geographical places and the TSPLIB `GEO` distance.

use crate::distance::{Cost, Gene};

// TSPLIB fixes pi at six decimals; distances depend on it.
#[allow(clippy::approx_constant)]
const PI: f64 = 3.141592;
// Single precision, widened at use; whole-km results depend on it.
const EARTH_RADIUS_KM: f32 = 6378.388;

/// A place given by latitude and longitude in TSPLIB `DDD.MM` notation
/// (integer degrees, fractional part in minutes).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPlace {
    id: Gene,
    latitude: f32,
    longitude: f32,
    radians_latitude: f64,
    radians_longitude: f64,
}

impl GeoPlace {
    pub fn new(id: Gene, latitude: f32, longitude: f32) -> Self {
        Self {
            id,
            latitude,
            longitude,
            radians_latitude: to_radians(latitude),
            radians_longitude: to_radians(longitude),
        }
    }

    pub fn id(&self) -> Gene {
        self.id
    }

    pub fn latitude(&self) -> f32 {
        self.latitude
    }

    pub fn longitude(&self) -> f32 {
        self.longitude
    }

    pub fn radians_latitude(&self) -> f64 {
        self.radians_latitude
    }

    pub fn radians_longitude(&self) -> f64 {
        self.radians_longitude
    }

    /// Great-circle distance in whole kilometres.
    ///
    /// The TSPLIB formula adds one before truncating, so two distinct
    /// places at the same coordinates are 1 apart. A place is 0 from itself.
    pub fn distance_to(&self, other: &GeoPlace) -> Cost {
        if self.id == other.id {
            return 0;
        }
        let q1 = (self.radians_longitude - other.radians_longitude).cos();
        let q2 = (self.radians_latitude - other.radians_latitude).cos();
        let q3 = (self.radians_latitude + other.radians_latitude).cos();
        let arc = (0.5 * ((1.0 + q1) * q2 - (1.0 - q1) * q3)).clamp(-1.0, 1.0);
        (f64::from(EARTH_RADIUS_KM) * arc.acos() + 1.0) as Cost
    }
}

/// Degrees are rounded half up, the remainder is read as minutes.
fn to_radians(coordinate: f32) -> f64 {
    let degrees = (coordinate + 0.5).floor();
    let minutes = coordinate - degrees;
    PI * (f64::from(degrees) + 5.0 * f64::from(minutes) / 3.0) / 180.0
}
