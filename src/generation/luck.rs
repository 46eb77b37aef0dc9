//! # Luck Oracle
//!
//! Deterministic pseudo-random numbers keyed by strings.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hash::Hasher;
use xxhash_rust::xxh3::Xxh3;

/// Maps a seed string to a number in `[0, 1)`.
///
/// Implementations must be deterministic: the same seed always yields the
/// same number. Any `Fn(&str) -> f64` closure is an oracle, which keeps
/// scripted oracles in tests short.
pub trait Luck {
    /// Returns the number for `seed`.
    fn luck(&self, seed: &str) -> f64;
}

impl<F> Luck for F
where
    F: Fn(&str) -> f64,
{
    fn luck(&self, seed: &str) -> f64 {
        self(seed)
    }
}

/// Default oracle: a stable string hash seeds a [`StdRng`] whose first sample
/// is the result.
///
/// The salt selects a different (but equally deterministic) world.
///
/// # Examples
///
/// ```
/// use gridmerge::{Luck, SeededLuck};
///
/// let luck = SeededLuck::new(42);
/// let roll = luck.luck("0,0");
/// assert!((0.0..1.0).contains(&roll));
/// assert_eq!(roll, luck.luck("0,0"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeededLuck {
    /// World selector mixed into every hash
    pub salt: u64,
}

impl SeededLuck {
    /// Creates an oracle for the world identified by `salt`.
    pub fn new(salt: u64) -> Self {
        Self { salt }
    }

    /// XXH3 over the salt followed by the seed bytes.
    fn hash(&self, seed: &str) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.salt);
        hasher.write(seed.as_bytes());
        hasher.finish()
    }
}

impl Luck for SeededLuck {
    fn luck(&self, seed: &str) -> f64 {
        let mut rng = StdRng::seed_from_u64(self.hash(seed));
        rng.gen::<f64>()
    }
}
