use ahash::RandomState;

#[cfg(test)]
use mockall::automock;

/// Seed used for the first-level bucket hash. It is fixed by the scheme and
/// never searched; per-bucket seeds start from 0 independently.
pub(crate) const FIRST_LEVEL_SEED: u64 = 0;

/// The hash primitive shared by construction and lookup.
///
/// Implementations must be pure: the same `(seed, key, modulo)` triple
/// produces the same index on every call, and the result is always below
/// `modulo`. A table only answers correctly when probed through the same
/// hasher it was built with.
#[cfg_attr(test, automock)]
pub trait SeededHasher {
    /// Maps `key` to an index in `[0, modulo)` under `seed`.
    ///
    /// Callers never pass `modulo == 0`.
    fn hash(&self, seed: u64, key: &[u8], modulo: u64) -> u64;
}

/// Default primitive: 64-bit ahash keyed from the per-call seed, reduced
/// modulo the target range.
#[derive(Clone, Copy, Debug, Default)]
pub struct AhashSeeded;

// Fixed keys (digits of pi) so separate processes agree on every hash;
// ahash's randomly keyed `RandomState` would not.
const K0: u64 = 0x243f_6a88_85a3_08d3;
const K1: u64 = 0x1319_8a2e_0370_7344;
const K2: u64 = 0xa409_3822_299f_31d0;
const K3: u64 = 0x082e_fa98_ec4e_6c89;

impl SeededHasher for AhashSeeded {
    #[inline]
    fn hash(&self, seed: u64, key: &[u8], modulo: u64) -> u64 {
        let state = RandomState::with_seeds(K0 ^ seed, K1.wrapping_add(seed), K2, K3);
        state.hash_one(key) % modulo
    }
}
