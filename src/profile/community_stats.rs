//! Community stats: per-kind activity counters built up from events.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::model::ActivityEvent;

/// Activity kind → accumulated count.
///
/// Counters only grow through [`map_community_state`]; there is no other
/// way to insert into the map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommunityStats(BTreeMap<String, u64>);

impl CommunityStats {
    /// Counter for `kind`, zero if never seen.
    pub fn get(&self, kind: &str) -> u64 {
        self.0.get(kind).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(kind, count)| (kind.as_str(), *count))
    }
}

/// Fold `event` into `current`, returning the new aggregate.
pub fn map_community_state(event: &ActivityEvent, current: &CommunityStats) -> CommunityStats {
    let mut next = current.0.clone();
    let counter = next.entry(event.kind.clone()).or_insert(0);
    *counter = counter.saturating_add(event.magnitude.unwrap_or(1));
    CommunityStats(next)
}
