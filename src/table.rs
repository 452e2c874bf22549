use crate::builder::{ChdBuilder, ChdConfig};
use crate::error::BuildError;
use crate::hasher::{AhashSeeded, SeededHasher, FIRST_LEVEL_SEED};
use crate::params::ChdParams;

/// An immutable perfect hash table: CHD parameters plus the slot-ordered
/// key/value array.
///
/// Every lookup probes exactly one slot. There is no chaining and no second
/// probe; a stored-key mismatch is conclusive proof the key was never in the
/// table. Lookups take `&self` and are safe for any number of concurrent
/// readers.
pub struct ChdTable<K, V, H = AhashSeeded> {
    params: ChdParams,
    slots: Vec<Option<(K, V)>>,
    hasher: H,
    len: usize,
}

impl<K: AsRef<[u8]>, V> ChdTable<K, V, AhashSeeded> {
    /// Builds a table over `pairs` with the default ahash primitive.
    pub fn new(pairs: Vec<(K, V)>, config: &ChdConfig) -> Result<Self, BuildError> {
        Self::with_hasher(pairs, config, AhashSeeded)
    }
}

impl<K: AsRef<[u8]>, V, H: SeededHasher> ChdTable<K, V, H> {
    /// Builds a table over `pairs` with an injected hash primitive.
    pub fn with_hasher(
        pairs: Vec<(K, V)>,
        config: &ChdConfig,
        hasher: H,
    ) -> Result<Self, BuildError> {
        let builder = {
            let keys: Vec<&[u8]> = pairs.iter().map(|(k, _)| k.as_ref()).collect();
            ChdBuilder::with_hasher(&keys, config, hasher)?
        };
        Ok(builder.into_table(pairs))
    }

    /// Wraps previously built parts, e.g. state reloaded by an external
    /// serialization layer. The hasher must be the one the table was built
    /// with or lookups are garbage.
    ///
    /// # Panics
    ///
    /// If `slots.len() != params.m()`.
    pub fn from_parts(params: ChdParams, slots: Vec<Option<(K, V)>>, hasher: H) -> Self {
        assert_eq!(slots.len(), params.m(), "slot array length must equal m");
        let len = slots.iter().filter(|s| s.is_some()).count();
        ChdTable {
            params,
            slots,
            hasher,
            len,
        }
    }

    /// Hands the parts back, e.g. to persist them externally.
    pub fn into_parts(self) -> (ChdParams, Vec<Option<(K, V)>>, H) {
        (self.params, self.slots, self.hasher)
    }

    /// Looks up the value stored for `key` with a single probe.
    pub fn get<Q: AsRef<[u8]> + ?Sized>(&self, key: &Q) -> Option<&V> {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Like [`get`](ChdTable::get) but also returns the stored key.
    pub fn get_key_value<Q: AsRef<[u8]> + ?Sized>(&self, key: &Q) -> Option<(&K, &V)> {
        let key = key.as_ref();
        if self.params.r() == 0 {
            return None;
        }
        let b = self.hasher.hash(FIRST_LEVEL_SEED, key, self.params.r() as u64) as usize;
        let seed = self.params.seeds()[b];
        let idx = self.hasher.hash(seed, key, self.params.m() as u64) as usize;
        match &self.slots[idx] {
            // The stored key, not slot occupancy, decides: a foreign key can
            // land on an occupied slot.
            Some((k, v)) if k.as_ref() == key => Some((k, v)),
            _ => None,
        }
    }

    /// Whether `key` was in the built set.
    pub fn contains_key<Q: AsRef<[u8]> + ?Sized>(&self, key: &Q) -> bool {
        self.get_key_value(key).is_some()
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The parameters the table answers with.
    pub fn params(&self) -> &ChdParams {
        &self.params
    }

    /// Occupied slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.slots
            .iter()
            .filter_map(|s| s.as_ref().map(|(k, v)| (k, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(n: usize) -> Vec<(String, usize)> {
        (0..n).map(|v| (format!("item{}", v), v)).collect()
    }

    #[test]
    fn test_round_trip() {
        let table = ChdTable::new(pairs(1000), &ChdConfig::default()).unwrap();
        assert_eq!(table.len(), 1000);
        for v in 0..1000 {
            let key = format!("item{}", v);
            assert_eq!(table.get(key.as_str()), Some(&v));
        }
    }

    #[test]
    fn test_scenario_lookup() {
        let config = ChdConfig {
            load_factor: 1.0,
            keys_per_bucket: 1,
            ..ChdConfig::default()
        };
        let table =
            ChdTable::new(vec![("a", 1), ("b", 2), ("c", 3), ("d", 4)], &config).unwrap();

        assert_eq!(table.params().r(), 4);
        assert_eq!(table.params().m(), 4);
        assert_eq!(table.get("a"), Some(&1));
        assert_eq!(table.get("b"), Some(&2));
        assert_eq!(table.get("c"), Some(&3));
        assert_eq!(table.get("d"), Some(&4));
        assert_eq!(table.get("z"), None);
    }

    #[test]
    fn test_absent_keys() {
        let table = ChdTable::new(pairs(100), &ChdConfig::default()).unwrap();
        // Foreign keys land on some slot; the stored-key comparison must
        // reject them regardless.
        for v in 0..100 {
            assert_eq!(table.get(format!("other{}", v).as_str()), None);
        }
        assert_eq!(table.get("ballynamoney"), None);
        assert_eq!(table.get(""), None);
    }

    #[test]
    fn test_lookup_idempotent() {
        let table = ChdTable::new(pairs(50), &ChdConfig::default()).unwrap();
        for _ in 0..10 {
            assert_eq!(table.get("item7"), Some(&7));
            assert_eq!(table.get("lane"), None);
        }
    }

    #[test]
    fn test_empty_table() {
        let table = ChdTable::new(Vec::<(&str, u32)>::new(), &ChdConfig::default()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.get("anything"), None);
    }

    #[test]
    fn test_get_key_value_and_contains() {
        let table = ChdTable::new(vec![("hello".to_string(), 7u32)], &ChdConfig::default())
            .unwrap();
        let (k, v) = table.get_key_value("hello").unwrap();
        assert_eq!(k, "hello");
        assert_eq!(*v, 7);
        assert!(table.contains_key("hello"));
        assert!(!table.contains_key("world"));
    }

    #[test]
    fn test_parts_round_trip() {
        // Simulates an external serialization layer: tear the table apart,
        // reassemble from the raw triple plus slots, and look up again.
        let table = ChdTable::new(pairs(200), &ChdConfig::default()).unwrap();
        let (params, slots, hasher) = table.into_parts();

        let reloaded = ChdTable::from_parts(
            ChdParams::new(params.seeds().to_vec(), params.m(), params.r()),
            slots,
            hasher,
        );
        assert_eq!(reloaded.len(), 200);
        assert_eq!(reloaded.get("item42"), Some(&42));
        assert_eq!(reloaded.get("item201"), None);
    }

    #[test]
    fn test_iter_yields_every_pair_once() {
        let table = ChdTable::new(pairs(64), &ChdConfig::default()).unwrap();
        let mut seen: Vec<usize> = table.iter().map(|(_, v)| *v).collect();
        assert_eq!(seen.len(), 64);
        seen.sort_unstable();
        assert_eq!(seen, (0..64).collect::<Vec<_>>());
    }

    #[test]
    fn test_byte_keys() {
        let table = ChdTable::new(
            vec![(b"\x00\x01\x02".to_vec(), 1u8), (b"\xff\xfe".to_vec(), 2u8)],
            &ChdConfig::default(),
        )
        .unwrap();
        assert_eq!(table.get(&b"\x00\x01\x02"[..]), Some(&1));
        assert_eq!(table.get(&b"\xff\xfe"[..]), Some(&2));
        assert_eq!(table.get(&b"\xff"[..]), None);
    }
}
