use std::collections::HashMap;

use crate::models::{HubId, HubRecord};

/// In-memory lookup table of hubs, keyed by hub id.
///
/// A directory is never edited in place: every successful refresh builds a
/// new one and the caller swaps it in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HubDirectory {
    hubs: HashMap<HubId, HubRecord>,
}

impl HubDirectory {
    /// Build a directory from sheet rows. Later rows win on duplicate ids.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = HubRecord>,
    {
        let mut hubs = HashMap::new();
        for record in records {
            hubs.insert(record.hub_id, record);
        }
        Self { hubs }
    }

    pub fn get(&self, id: HubId) -> Option<&HubRecord> {
        self.hubs.get(&id)
    }

    pub fn len(&self) -> usize {
        self.hubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hubs.is_empty()
    }

    /// All records ordered by hub id.
    pub fn iter(&self) -> impl Iterator<Item = &HubRecord> {
        let mut records: Vec<&HubRecord> = self.hubs.values().collect();
        records.sort_by_key(|r| r.hub_id);
        records.into_iter()
    }
}

impl FromIterator<HubRecord> for HubDirectory {
    fn from_iter<T: IntoIterator<Item = HubRecord>>(iter: T) -> Self {
        Self::from_records(iter)
    }
}
