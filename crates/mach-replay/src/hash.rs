//! FNV-1a digests of simulation state.
//!
//! FNV-1a is fast and fully deterministic across runs and platforms of
//! the same endianness, unlike `std`'s randomly seeded `DefaultHasher`.
//! It is not cryptographically secure; digests are only used for quick
//! equality checks.

use std::hash::{Hash, Hasher};

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

/// A [`Hasher`] implementing 64-bit FNV-1a.
#[derive(Clone, Copy, Debug)]
pub struct FnvHasher(u64);

impl FnvHasher {
    /// A hasher at the FNV offset basis.
    pub fn new() -> Self {
        Self(FNV_OFFSET)
    }
}

impl Default for FnvHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for FnvHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = (self.0 ^ b as u64).wrapping_mul(FNV_PRIME);
        }
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }
}

/// Digest of any hashable value.
pub fn state_digest<S: Hash + ?Sized>(state: &S) -> u64 {
    let mut hasher = FnvHasher::new();
    state.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_offset_basis() {
        let hasher = FnvHasher::new();
        assert_eq!(hasher.finish(), FNV_OFFSET);
    }

    #[test]
    fn known_vector() {
        // FNV-1a 64 of "a".
        let mut hasher = FnvHasher::new();
        hasher.write(b"a");
        assert_eq!(hasher.finish(), 0xaf63dc4c8601ec8c);
    }

    #[test]
    fn same_value_same_digest() {
        let a = vec![(1u32, "x".to_string()), (2, "y".to_string())];
        let b = a.clone();
        assert_eq!(state_digest(&a), state_digest(&b));
    }

    #[test]
    fn order_matters() {
        assert_ne!(state_digest(&[1u32, 2]), state_digest(&[2u32, 1]));
    }

    #[test]
    fn different_values_differ() {
        assert_ne!(state_digest(&104i64), state_digest(&1104i64));
    }
}
