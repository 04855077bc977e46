//! Great-circle distances and geographic search.
//!
//! Distances use the haversine formula on a sphere of radius
//! [`EARTH_RADIUS_KM`] and are expressed in kilometres. An unknown location
//! propagates as `None` instead of failing, so batch computations over
//! partially geocoded data degrade gracefully.
//!
//! The search operations ([`Store::find_near`](crate::store::Store::find_near),
//! [`Store::find_closest`](crate::store::Store::find_closest),
//! [`Store::find_with`](crate::store::Store::find_with)) live in [`search`].

mod search;

pub use search::{Condition, Neighbor, Origin};

use std::f64::consts::PI;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Radius used when a search does not specify one.
pub const DEFAULT_RADIUS_KM: f64 = 50.0;

const DEG_TO_RAD: f64 = PI / 180.0;

/// A position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// Haversine distance between two known positions, in kilometres.
///
/// ```
/// use neobase::geo::{haversine_km, LatLng};
///
/// // Paris -> Nice
/// let d = haversine_km(LatLng::new(48.84, 2.367), LatLng::new(43.70, 7.26));
/// assert!((d - 683.856).abs() < 1e-3);
/// ```
pub fn haversine_km(from: LatLng, to: LatLng) -> f64 {
    let lat0 = from.lat * DEG_TO_RAD;
    let lat1 = to.lat * DEG_TO_RAD;
    let delta_lat = lat0 - lat1;
    let delta_lng = (from.lng - to.lng) * DEG_TO_RAD;

    let a = (0.5 * delta_lat).sin().powi(2)
        + lat0.cos() * lat1.cos() * (0.5 * delta_lng).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// Distance between two possibly unknown positions.
///
/// Returns `None` if either side is `None`.
pub fn distance_between(from: Option<LatLng>, to: Option<LatLng>) -> Option<f64> {
    Some(haversine_km(from?, to?))
}
