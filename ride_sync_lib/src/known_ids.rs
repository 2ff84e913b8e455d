use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use crate::ride::{RideId, RideRecord};

/// Ride ids already present in the spreadsheet.
///
/// Parsed from any JSON list. Entries that cannot be a ride id (blank cells
/// come back as `null`, stray bools) are dropped.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<Value>")]
pub struct KnownIdSet {
    ids: HashSet<RideId>,
}

impl KnownIdSet {
    pub fn contains(&self, id: &RideId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Rides whose id is not known yet, sorted by ride id.
    /// A ride repeated in the input is kept once, first occurrence wins.
    pub fn unseen(&self, rides: Vec<RideRecord>) -> Vec<RideRecord> {
        let mut taken = HashSet::new();
        let mut new_rides: Vec<RideRecord> = rides
            .into_iter()
            .filter(|ride| !self.contains(ride.ride_id()) && taken.insert(ride.ride_id().clone()))
            .collect();

        new_rides.sort_by(|a, b| a.ride_id().cmp(b.ride_id()));
        new_rides
    }
}

impl From<Vec<Value>> for KnownIdSet {
    fn from(values: Vec<Value>) -> Self {
        values
            .iter()
            .filter_map(|value| {
                let id = RideId::from_value(value);
                if id.is_none() {
                    tracing::debug!("Ignoring sheet entry {value} that is not a ride id");
                }
                id
            })
            .collect()
    }
}

impl FromIterator<RideId> for KnownIdSet {
    fn from_iter<T: IntoIterator<Item = RideId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
