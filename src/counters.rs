//! Interest counters persisted across sessions as a single JSON record.
//!
//! Counts are floored at zero and the whole record is rewritten on every
//! mutation so the persisted blob never holds a partial update.

use std::collections::BTreeMap;

use tracing::debug;

use crate::catalog::ProductKey;
use crate::storage::{KeyValueStore, COUNTERS_KEY};

/// Which way an adjust moves a counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Per-product interest counts. All values are non-negative by construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InterestCounters {
    counts: [u32; 3],
}

impl InterestCounters {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn slot(key: ProductKey) -> usize {
        match key {
            ProductKey::Ring => 0,
            ProductKey::Necklace => 1,
            ProductKey::Earrings => 2,
        }
    }

    /// Current count for a product.
    #[must_use]
    pub fn get(&self, key: ProductKey) -> u32 {
        self.counts[Self::slot(key)]
    }

    /// Apply an increment or a floored decrement.
    /// Returns `true` when the count actually changed.
    pub fn adjust(&mut self, key: ProductKey, direction: Direction) -> bool {
        let count = &mut self.counts[Self::slot(key)];
        match direction {
            Direction::Up => {
                *count += 1;
                true
            }
            Direction::Down if *count > 0 => {
                *count -= 1;
                true
            }
            Direction::Down => false,
        }
    }

    /// Encode the record as the persisted JSON object.
    #[must_use]
    pub fn encode(&self) -> String {
        let map: BTreeMap<&str, u32> = ProductKey::ALL
            .iter()
            .map(|key| (key.storage_name(), self.get(*key)))
            .collect();
        serde_json::to_string(&map).unwrap_or_else(|_| "{}".to_string())
    }

    /// Decode a persisted record. Unknown keys are ignored so older
    /// binaries keep working against newer blobs; a malformed blob reads
    /// as an empty record.
    #[must_use]
    pub fn decode(raw: &str) -> Self {
        let mut counters = Self::new();
        let map: BTreeMap<String, u32> = match serde_json::from_str(raw) {
            Ok(map) => map,
            Err(err) => {
                debug!(%err, "counters: malformed persisted record, starting fresh");
                return counters;
            }
        };
        for (name, value) in map {
            match ProductKey::from_name(&name) {
                Some(key) => counters.counts[Self::slot(key)] = value,
                None => {} // Ignore unknown products for forward compatibility
            }
        }
        counters
    }

    /// Load the record from the store, defaulting every count to zero.
    #[must_use]
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(COUNTERS_KEY) {
            Some(raw) => Self::decode(&raw),
            None => Self::new(),
        }
    }

    /// Overwrite the persisted record with the in-memory counts.
    pub fn persist(&self, store: &mut dyn KeyValueStore) {
        store.set(COUNTERS_KEY, &self.encode());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn counts_start_at_zero() {
        let counters = InterestCounters::new();
        for key in ProductKey::ALL {
            assert_eq!(counters.get(key), 0);
        }
    }

    #[test]
    fn increment_is_unconditional() {
        let mut counters = InterestCounters::new();
        assert!(counters.adjust(ProductKey::Ring, Direction::Up));
        assert!(counters.adjust(ProductKey::Ring, Direction::Up));
        assert_eq!(counters.get(ProductKey::Ring), 2);
        assert_eq!(counters.get(ProductKey::Necklace), 0);
    }

    #[test]
    fn decrement_floors_at_zero() {
        let mut counters = InterestCounters::new();
        for key in ProductKey::ALL {
            assert!(!counters.adjust(key, Direction::Down));
            assert_eq!(counters.get(key), 0);
        }

        counters.adjust(ProductKey::Earrings, Direction::Up);
        assert!(counters.adjust(ProductKey::Earrings, Direction::Down));
        assert!(!counters.adjust(ProductKey::Earrings, Direction::Down));
        assert_eq!(counters.get(ProductKey::Earrings), 0);
    }

    #[test]
    fn persist_then_load_round_trips() {
        let mut store = MemoryStore::new();
        let mut counters = InterestCounters::new();
        counters.adjust(ProductKey::Ring, Direction::Up);
        counters.adjust(ProductKey::Ring, Direction::Up);
        counters.adjust(ProductKey::Necklace, Direction::Up);
        counters.persist(&mut store);

        let reloaded = InterestCounters::load(&store);
        assert_eq!(reloaded, counters);
    }

    #[test]
    fn round_trip_survives_adjust_sequences() {
        let mut store = MemoryStore::new();
        let mut counters = InterestCounters::new();
        let moves = [
            (ProductKey::Ring, Direction::Up),
            (ProductKey::Ring, Direction::Down),
            (ProductKey::Ring, Direction::Down),
            (ProductKey::Earrings, Direction::Up),
            (ProductKey::Earrings, Direction::Up),
            (ProductKey::Necklace, Direction::Down),
            (ProductKey::Earrings, Direction::Down),
        ];
        for (key, direction) in moves {
            counters.adjust(key, direction);
            counters.persist(&mut store);
        }
        assert_eq!(InterestCounters::load(&store), counters);
        assert_eq!(counters.get(ProductKey::Ring), 0);
        assert_eq!(counters.get(ProductKey::Earrings), 1);
    }

    #[test]
    fn decode_ignores_unknown_keys() {
        let counters = InterestCounters::decode(r#"{"ring":4,"tiara":9,"earrings":1}"#);
        assert_eq!(counters.get(ProductKey::Ring), 4);
        assert_eq!(counters.get(ProductKey::Necklace), 0);
        assert_eq!(counters.get(ProductKey::Earrings), 1);
    }

    #[test]
    fn decode_malformed_record_is_empty() {
        assert_eq!(InterestCounters::decode("not json"), InterestCounters::new());
        assert_eq!(InterestCounters::decode("[1,2,3]"), InterestCounters::new());
    }

    #[test]
    fn load_defaults_when_store_is_empty() {
        let store = MemoryStore::new();
        assert_eq!(InterestCounters::load(&store), InterestCounters::new());
    }

    #[test]
    fn encode_emits_every_known_key() {
        let encoded = InterestCounters::new().encode();
        for key in ProductKey::ALL {
            assert!(encoded.contains(key.storage_name()));
        }
    }
}
