use std::cmp::Reverse;
use std::collections::HashSet;
use std::fmt;

use ahash::RandomState;

use crate::error::BuildError;
use crate::hasher::{AhashSeeded, SeededHasher, FIRST_LEVEL_SEED};
use crate::params::ChdParams;
use crate::table::ChdTable;

/// Construction knobs. `..ChdConfig::default()` fills in the reference
/// values.
#[derive(Debug, Clone, Copy)]
pub struct ChdConfig {
    /// Target occupancy of the slot array; `m = floor(n / load_factor)`.
    /// Values below 1.0 leave spare slots and speed up the seed search.
    pub load_factor: f64,
    /// Bucket granularity; `r = floor(n / keys_per_bucket)`. Smaller values
    /// ease the search at the cost of more stored seeds.
    pub keys_per_bucket: usize,
    /// The seed search for one bucket gives up after this many candidates.
    pub max_seed: u64,
}

impl Default for ChdConfig {
    fn default() -> Self {
        ChdConfig {
            load_factor: 1.0,
            keys_per_bucket: 4,
            max_seed: 1_000_000,
        }
    }
}

impl ChdConfig {
    fn validate(&self) -> Result<(), BuildError> {
        if !self.load_factor.is_finite() || self.load_factor <= 0.0 {
            return Err(BuildError::Config {
                reason: "load_factor must be positive and finite",
            });
        }
        if self.keys_per_bucket == 0 {
            return Err(BuildError::Config {
                reason: "keys_per_bucket must be at least 1",
            });
        }
        if self.max_seed == 0 {
            return Err(BuildError::Config {
                reason: "max_seed must be at least 1",
            });
        }
        Ok(())
    }
}

/// Computes CHD parameters for a fixed key set.
///
/// Keys are partitioned into `r` buckets by the first-level hash, then each
/// bucket greedily searches the smallest seed that displaces all of its keys
/// into still-free slots of the `m`-slot array. Once every bucket has a
/// seed, [`arrange`](ChdBuilder::arrange) lays key/value pairs out in slot
/// order and [`ChdTable`] answers point lookups against that layout.
pub struct ChdBuilder<H = AhashSeeded> {
    params: ChdParams,
    hasher: H,
}

impl ChdBuilder<AhashSeeded> {
    /// Builds parameters for `keys` with the default ahash primitive.
    pub fn new<K: AsRef<[u8]>>(keys: &[K], config: &ChdConfig) -> Result<Self, BuildError> {
        Self::with_hasher(keys, config, AhashSeeded)
    }
}

impl<H: SeededHasher> ChdBuilder<H> {
    /// Builds parameters for `keys` with an injected hash primitive.
    ///
    /// Fails on duplicate keys, on a rejected configuration, and when some
    /// bucket exhausts the seed search. No partial result is ever returned;
    /// retrying with adjusted configuration is the caller's policy.
    pub fn with_hasher<K: AsRef<[u8]>>(
        keys: &[K],
        config: &ChdConfig,
        hasher: H,
    ) -> Result<Self, BuildError> {
        config.validate()?;
        reject_duplicates(keys)?;

        let n = keys.len();
        if n == 0 {
            let params = ChdParams::new(Vec::new(), 0, 0);
            return Ok(ChdBuilder { params, hasher });
        }

        // Clamped to 1 so key sets smaller than keys_per_bucket still build.
        let m = ((n as f64 / config.load_factor).floor() as usize).max(1);
        let r = (n / config.keys_per_bucket).max(1);

        let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); r];
        for (i, key) in keys.iter().enumerate() {
            let b = hasher.hash(FIRST_LEVEL_SEED, key.as_ref(), r as u64) as usize;
            buckets[b].push(i);
        }

        // Largest buckets claim slots while the table is emptiest; smaller
        // buckets have more free slots to fall into later. The sort is
        // stable, so equal-sized buckets keep index order and rebuilds
        // reproduce identical seeds.
        let mut order: Vec<usize> = (0..r).collect();
        order.sort_by_key(|&b| Reverse(buckets[b].len()));

        let mut seeds = vec![0u64; r];
        let mut occupied = vec![false; m];
        let mut claimed: Vec<usize> = Vec::new();

        for &b in &order {
            let bucket = &buckets[b];
            if bucket.is_empty() {
                continue;
            }

            let mut placed = false;
            'seeds: for seed in 0..config.max_seed {
                claimed.clear();
                for &i in bucket {
                    let h = hasher.hash(seed, keys[i].as_ref(), m as u64) as usize;
                    if occupied[h] || claimed.contains(&h) {
                        continue 'seeds;
                    }
                    claimed.push(h);
                }
                seeds[b] = seed;
                for &h in &claimed {
                    occupied[h] = true;
                }
                placed = true;
                break;
            }
            if !placed {
                return Err(BuildError::SeedsExhausted {
                    bucket_size: bucket.len(),
                    max_seed: config.max_seed,
                });
            }
        }

        let params = ChdParams::new(seeds, m, r);
        Ok(ChdBuilder { params, hasher })
    }

    /// Final slot index of `key` under the computed parameters.
    ///
    /// Only meaningful for keys from the built set; any other key still maps
    /// to some slot. Must not be called on an empty build (`r == 0`).
    pub fn slot_of(&self, key: &[u8]) -> usize {
        let b = self.hasher.hash(FIRST_LEVEL_SEED, key, self.params.r() as u64) as usize;
        let seed = self.params.seeds()[b];
        self.hasher.hash(seed, key, self.params.m() as u64) as usize
    }

    /// Rearranges `pairs` into the slot order fixed by the seeds. `pairs`
    /// must carry exactly the key set the builder was constructed over.
    ///
    /// # Panics
    ///
    /// If two pairs resolve to the same slot. That cannot happen for the
    /// original key set; it firing means the hasher broke its purity or
    /// range contract between build and arrange.
    pub fn arrange<K: AsRef<[u8]>, V>(&self, pairs: Vec<(K, V)>) -> Vec<Option<(K, V)>> {
        let mut slots: Vec<Option<(K, V)>> = Vec::with_capacity(self.params.m());
        slots.resize_with(self.params.m(), || None);
        for (k, v) in pairs {
            let idx = self.slot_of(k.as_ref());
            let slot = &mut slots[idx];
            assert!(slot.is_none(), "two keys resolved to slot {}", idx);
            *slot = Some((k, v));
        }
        slots
    }

    /// Arranges `pairs` and wraps the result into a lookup table, reusing
    /// this builder's hasher.
    pub fn into_table<K: AsRef<[u8]>, V>(self, pairs: Vec<(K, V)>) -> ChdTable<K, V, H> {
        let slots = self.arrange(pairs);
        ChdTable::from_parts(self.params, slots, self.hasher)
    }

    /// The computed parameters.
    pub fn params(&self) -> &ChdParams {
        &self.params
    }

    /// Consumes the builder, handing out the parameters alone.
    pub fn into_params(self) -> ChdParams {
        self.params
    }
}

// Hand-written so injected hashers are not required to implement Debug.
impl<H> fmt::Debug for ChdBuilder<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChdBuilder")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

fn reject_duplicates<K: AsRef<[u8]>>(keys: &[K]) -> Result<(), BuildError> {
    let mut seen: HashSet<&[u8], RandomState> =
        HashSet::with_capacity_and_hasher(keys.len(), RandomState::new());
    for (index, key) in keys.iter().enumerate() {
        if !seen.insert(key.as_ref()) {
            return Err(BuildError::DuplicateKey { index });
        }
    }
    Ok(())
}
