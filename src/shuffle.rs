//! Fisher-Yates shuffling
//!
//! Prefers OS/browser entropy (`crypto.getRandomValues` on the web). If that is
//! not available we fall back to a PCG generator seeded from the clock.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// Random source used for ordering
#[derive(Debug, Clone)]
pub enum RandomSource {
    /// Seeded from OS entropy (ChaCha based, cryptographically strong)
    Secure(StdRng),
    /// Clock-seeded PCG, used when no entropy source is present
    Fallback(Pcg32),
}

impl RandomSource {
    /// Best available source for this environment
    pub fn new() -> Self {
        match StdRng::try_from_os_rng() {
            Ok(rng) => Self::Secure(rng),
            Err(e) => {
                log::warn!("No secure entropy ({}), using pseudo-random fallback", e);
                Self::Fallback(Pcg32::seed_from_u64(clock_seed()))
            }
        }
    }

    /// Deterministic source, for tests and reproducible layouts
    pub fn seeded(seed: u64) -> Self {
        Self::Fallback(Pcg32::seed_from_u64(seed))
    }

    pub fn is_secure(&self) -> bool {
        matches!(self, Self::Secure(_))
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RngCore for RandomSource {
    fn next_u32(&mut self) -> u32 {
        match self {
            Self::Secure(rng) => rng.next_u32(),
            Self::Fallback(rng) => rng.next_u32(),
        }
    }

    fn next_u64(&mut self) -> u64 {
        match self {
            Self::Secure(rng) => rng.next_u64(),
            Self::Fallback(rng) => rng.next_u64(),
        }
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        match self {
            Self::Secure(rng) => rng.fill_bytes(dst),
            Self::Fallback(rng) => rng.fill_bytes(dst),
        }
    }
}

/// Uniformly permute `items` in place
pub fn shuffle_in_place<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(target_arch = "wasm32")]
fn clock_seed() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_seeded_is_deterministic() {
        let mut a: Vec<usize> = (0..50).collect();
        let mut b = a.clone();
        shuffle_in_place(&mut a, &mut RandomSource::seeded(7));
        shuffle_in_place(&mut b, &mut RandomSource::seeded(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_small_inputs_untouched() {
        let mut empty: Vec<usize> = Vec::new();
        shuffle_in_place(&mut empty, &mut RandomSource::seeded(1));
        assert!(empty.is_empty());

        let mut one = vec![42];
        shuffle_in_place(&mut one, &mut RandomSource::seeded(1));
        assert_eq!(one, vec![42]);
    }

    #[test]
    fn test_every_position_reachable() {
        // Each of 3 values should land first at least once over many shuffles
        let mut seen = [false; 3];
        let mut rng = RandomSource::seeded(2024);
        for _ in 0..200 {
            let mut v = vec![0usize, 1, 2];
            shuffle_in_place(&mut v, &mut rng);
            seen[v[0]] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_native_has_secure_source() {
        assert!(RandomSource::new().is_secure());
    }

    proptest! {
        #[test]
        fn shuffle_preserves_elements(mut v in proptest::collection::vec(0usize..1000, 0..64), seed: u64) {
            let mut expected = v.clone();
            shuffle_in_place(&mut v, &mut RandomSource::seeded(seed));
            v.sort_unstable();
            expected.sort_unstable();
            prop_assert_eq!(v, expected);
        }
    }
}
