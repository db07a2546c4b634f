// ABOUTME: Injectable random source for picking notification message templates
// ABOUTME: Thread-local, seeded (ChaCha8), and fixed implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::{Mutex, PoisonError};

/// Picks one of `len` templates
///
/// Implementations should return an index in `0..len`; callers clamp the result
/// anyway, so an out-of-range index selects the last template.
pub trait TemplateChooser: Send + Sync {
    /// Choose a template index for a list of `len` templates
    fn choose(&self, len: usize) -> usize;
}

/// Uniform choice using the thread-local generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngChooser;

impl TemplateChooser for ThreadRngChooser {
    fn choose(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..len)
    }
}

/// Uniform choice from a seeded generator, reproducible across runs
#[derive(Debug)]
pub struct SeededChooser {
    rng: Mutex<ChaCha8Rng>,
}

impl SeededChooser {
    /// Create a chooser whose sequence is fully determined by `seed`
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl TemplateChooser for SeededChooser {
    fn choose(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        // A poisoned generator is still a valid generator
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(0..len)
    }
}

/// Always picks the same index
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedChooser(pub usize);

impl TemplateChooser for FixedChooser {
    fn choose(&self, _len: usize) -> usize {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_rng_chooser_stays_in_range() {
        let chooser = ThreadRngChooser;
        for _ in 0..200 {
            assert!(chooser.choose(3) < 3);
        }
        assert_eq!(chooser.choose(0), 0);
    }

    #[test]
    fn test_seeded_chooser_is_reproducible() {
        let first = SeededChooser::new(42);
        let second = SeededChooser::new(42);

        let a: Vec<usize> = (0..32).map(|_| first.choose(3)).collect();
        let b: Vec<usize> = (0..32).map(|_| second.choose(3)).collect();

        assert_eq!(a, b);
        assert!(a.iter().all(|&i| i < 3));
    }

    #[test]
    fn test_fixed_chooser() {
        assert_eq!(FixedChooser(2).choose(3), 2);
    }
}
