/*!

Fast non-cryptographic hashing. The maps in this crate are keyed by small integers or short
region names, so `FxHash` is used throughout instead of the default SipHash.

*/

use std::hash::Hasher;

pub use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet, FxHasher};

/// Hashes a string deterministically. Used to derive per-generator seeds, so the value for a
/// given string must not change between runs.
pub fn hash_str(data: &str) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(data.as_bytes());
    hasher.finish()
}
