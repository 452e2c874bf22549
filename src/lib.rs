//! Minimal perfect hash tables built offline with the CHD (compress, hash,
//! displace) algorithm.
//!
//! CHD hashes every key twice: a fixed first-level hash picks one of `r`
//! buckets, and a per-bucket seed chosen at build time displaces the
//! bucket's keys into unique cells of an `m`-slot array. Buckets are placed
//! largest first against a shared occupied set, so lookups need exactly one
//! probe and no collision resolution.
//!
//! This implementation follows the construction described by Belazzougui,
//! Botelho and Dietzfelbinger in "Hash, displace, and compress" (ESA 2009).

mod builder;
mod error;
mod hasher;
mod params;
mod table;

pub use builder::{ChdBuilder, ChdConfig};
pub use error::BuildError;
pub use hasher::{AhashSeeded, SeededHasher};
pub use params::ChdParams;
pub use table::ChdTable;
