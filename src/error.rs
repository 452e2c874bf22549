use thiserror::Error;

/// Errors surfaced by table construction.
///
/// A failed build never yields a partial table. Lookup misses are not
/// errors; they come back as `None`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Rejected configuration value.
    #[error("invalid configuration: {reason}")]
    Config { reason: &'static str },

    /// The key at `index` already appeared earlier in the input.
    #[error("duplicate key at input index {index}")]
    DuplicateKey { index: usize },

    /// No seed below `max_seed` placed some bucket without collision.
    /// Retrying with a smaller `keys_per_bucket`, a smaller `load_factor`
    /// or a larger `max_seed` is the caller's call.
    #[error("no seed below {max_seed} places a bucket of {bucket_size} keys without collision")]
    SeedsExhausted { bucket_size: usize, max_seed: u64 },
}
