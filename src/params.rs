/// Parameters of a built table: one seed per bucket plus the two moduli.
///
/// Produced once by [`ChdBuilder`](crate::ChdBuilder) and immutable
/// afterwards. The crate defines no wire format; callers that persist a
/// table write out the three fields however they like and reassemble with
/// [`ChdParams::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChdParams {
    seeds: Vec<u64>,
    m: usize,
    r: usize,
}

impl ChdParams {
    /// Reassembles params from externally stored parts.
    ///
    /// # Panics
    ///
    /// If `seeds.len() != r`.
    pub fn new(seeds: Vec<u64>, m: usize, r: usize) -> Self {
        assert_eq!(seeds.len(), r, "seed array length must equal bucket count");
        Self { seeds, m, r }
    }

    /// Per-bucket displacement seeds, indexed by the first-level hash.
    pub fn seeds(&self) -> &[u64] {
        &self.seeds
    }

    /// Slot count, the second-level modulo.
    pub fn m(&self) -> usize {
        self.m
    }

    /// Bucket count, the first-level modulo.
    pub fn r(&self) -> usize {
        self.r
    }
}
