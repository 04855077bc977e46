//! Location lookup, path distances and searches over a [`Store`].

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::{distance_between, haversine_km, LatLng};
use crate::record::FieldValue;
use crate::store::{Store, StoreError};

/// Where a search is centred.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Origin<'a> {
    /// The location of a point of reference. An unknown key (or one without
    /// a usable geocode) makes the search return nothing.
    Key(&'a str),
    /// A raw position.
    Location(LatLng),
}

impl<'a> From<&'a str> for Origin<'a> {
    fn from(key: &'a str) -> Self {
        Origin::Key(key)
    }
}

impl From<LatLng> for Origin<'_> {
    fn from(location: LatLng) -> Self {
        Origin::Location(location)
    }
}

impl From<(f64, f64)> for Origin<'_> {
    fn from(location: (f64, f64)) -> Self {
        Origin::Location(location.into())
    }
}

/// An origin held by a lazy search until its first candidate is polled.
enum PendingOrigin {
    Key(String),
    Location(LatLng),
}

impl From<Origin<'_>> for PendingOrigin {
    fn from(origin: Origin<'_>) -> Self {
        match origin {
            Origin::Key(key) => PendingOrigin::Key(key.to_string()),
            Origin::Location(location) => PendingOrigin::Location(location),
        }
    }
}

/// A search hit: a key and its distance to the origin in kilometres.
///
/// Ordered by distance, then by key.
#[derive(Debug, Clone)]
pub struct Neighbor {
    pub distance: f64,
    pub key: String,
}

impl PartialEq for Neighbor {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Neighbor {}

impl PartialOrd for Neighbor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Neighbor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.key.cmp(&other.key))
    }
}

/// A `field == value` test used by [`Store::find_with`].
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: String,
    pub value: FieldValue,
}

impl Condition {
    pub fn new(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl Store {
    /// Location of a key from its `lat`/`lng` fields.
    ///
    /// Fails only if the key is unknown. A missing or unparseable geocode
    /// gives `Ok(None)`.
    pub fn location_of(&self, key: &str) -> Result<Option<LatLng>, StoreError> {
        self.location_with(key, "lat", "lng")
    }

    /// Location of a key from custom latitude/longitude fields.
    pub fn location_with(
        &self,
        key: &str,
        lat_field: &str,
        lng_field: &str,
    ) -> Result<Option<LatLng>, StoreError> {
        let record = self.get(key)?;
        let lat = record.get(lat_field).and_then(FieldValue::to_coordinate);
        let lng = record.get(lng_field).and_then(FieldValue::to_coordinate);
        Ok(lat.zip(lng).map(|(lat, lng)| LatLng::new(lat, lng)))
    }

    /// Length of the path through the given keys, in kilometres.
    ///
    /// Sums the legs `k0→k1`, `k1→k2`, ...; two keys give a plain distance,
    /// fewer than two give `0.0`. Any unknown key fails the whole call; any
    /// key without a geocode makes the result `None`.
    ///
    /// ```
    /// use neobase::loader::{Loader, ReferenceDate};
    /// use neobase::schema::Schema;
    ///
    /// let store = Loader::new(Schema::optd_por(), ReferenceDate::parse("2026-10-19")?)
    ///     .load_bundled()?;
    /// let d = store.distance(&["ORY", "CDG"])?.unwrap();
    /// assert!((d - 34.8748).abs() < 1e-3);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn distance<K: AsRef<str>>(&self, keys: &[K]) -> Result<Option<f64>, StoreError> {
        let locations = keys
            .iter()
            .map(|key| self.location_of(key.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(locations
            .windows(2)
            .map(|leg| distance_between(leg[0], leg[1]))
            .sum())
    }

    /// Candidates within `radius` km (inclusive) of the origin.
    ///
    /// Lazy and unordered. Candidates that are unknown or lack a geocode are
    /// skipped.
    pub fn find_near<'s, I>(
        &'s self,
        origin: Origin<'_>,
        radius: f64,
        candidates: I,
    ) -> impl Iterator<Item = Neighbor> + 's
    where
        I: IntoIterator + 's,
        I::Item: AsRef<str>,
        I::IntoIter: 's,
    {
        self.distances_from(origin, candidates)
            .filter(move |neighbor| neighbor.distance <= radius)
    }

    /// The `n` candidates closest to the origin, nearest first.
    ///
    /// Ties on distance are broken by key.
    pub fn find_closest<I>(&self, origin: Origin<'_>, n: usize, candidates: I) -> Vec<Neighbor>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        if n == 0 {
            return Vec::new();
        }

        // Max-heap of the best n so far; the root is the worst of them.
        // Never sized past the store, whatever n the caller asks for.
        let capacity = n.min(self.len()).saturating_add(1);
        let mut best: BinaryHeap<Neighbor> = BinaryHeap::with_capacity(capacity);
        for neighbor in self.distances_from(origin, candidates) {
            if best.len() < n {
                best.push(neighbor);
            } else if best.peek().is_some_and(|worst| neighbor < *worst) {
                best.pop();
                best.push(neighbor);
            }
        }

        best.into_sorted_vec()
    }

    /// Candidates whose fields all equal the given values.
    ///
    /// With `invert`, every field must differ instead. Condition fields are
    /// checked against the schema up front. Keys are yielded in candidate
    /// order.
    ///
    /// A candidate that is unknown, or a record that lacks a condition field
    /// (an ad-hoc record added with [`Store::set`]), yields the lookup error
    /// in its place: `UnknownKey` or `UnknownField`.
    pub fn find_with<'s, I>(
        &'s self,
        conditions: Vec<Condition>,
        candidates: I,
        invert: bool,
    ) -> Result<impl Iterator<Item = Result<String, StoreError>> + 's, StoreError>
    where
        I: IntoIterator + 's,
        I::Item: AsRef<str>,
        I::IntoIter: 's,
    {
        if let Some(unknown) = conditions
            .iter()
            .find(|c| !self.schema().contains_field(&c.field))
        {
            return Err(StoreError::FieldNotInSchema(unknown.field.clone()));
        }

        Ok(candidates.into_iter().filter_map(move |key| {
            let key = key.as_ref();
            for condition in &conditions {
                match self.get_field(key, &condition.field) {
                    Ok(value) if (*value == condition.value) == invert => return None,
                    Ok(_) => {}
                    Err(e) => return Some(Err(e)),
                }
            }
            Some(Ok(key.to_string()))
        }))
    }

    /// Resolve the origin of a search to a position.
    fn origin_location(&self, origin: &PendingOrigin) -> Option<LatLng> {
        match origin {
            PendingOrigin::Location(location) => Some(*location),
            PendingOrigin::Key(key) => match self.location_of(key) {
                Ok(location) => location,
                Err(_) => {
                    tracing::warn!(key = key.as_str(), "Search origin not found");
                    None
                }
            },
        }
    }

    /// Distance from the origin to every candidate with a usable geocode.
    ///
    /// The origin is resolved when the first candidate is polled.
    fn distances_from<'s, I>(
        &'s self,
        origin: Origin<'_>,
        candidates: I,
    ) -> impl Iterator<Item = Neighbor> + 's
    where
        I: IntoIterator + 's,
        I::Item: AsRef<str>,
        I::IntoIter: 's,
    {
        let mut pending = Some(PendingOrigin::from(origin));
        let mut reference = None;

        candidates.into_iter().filter_map(move |key| {
            if let Some(origin) = pending.take() {
                reference = self.origin_location(&origin);
            }
            let reference = reference?;
            let key = key.as_ref();
            let location = self.location_of(key).ok().flatten()?;
            Some(Neighbor {
                distance: haversine_km(reference, location),
                key: key.to_string(),
            })
        })
    }
}
