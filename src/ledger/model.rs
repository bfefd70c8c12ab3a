use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;

/// Per-item count of incorrect answers, keyed by item identity.
/// Serialized as a flat JSON object: `{"猫": 2}`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct MistakeLedger {
    counts: BTreeMap<String, u32>,
}

impl MistakeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, identity: &str) -> u32 {
        self.counts.get(identity).copied().unwrap_or(0)
    }

    /// Record one more miss for `identity`, returning the new count.
    pub fn increment(&mut self, identity: &str) -> u32 {
        let count = self.counts.entry(identity.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Selection weight: 1 for never-missed items, +2 per recorded miss.
    pub fn weight(&self, identity: &str) -> f64 {
        1.0 + 2.0 * f64::from(self.count(identity))
    }

    /// Number of distinct items with at least one recorded miss.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Most-missed items first, ties broken by identity.
    pub fn most_missed(&self, n: usize) -> Vec<(String, u32)> {
        let mut entries: Vec<(String, u32)> = self.counts
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(n);
        entries
    }
}
