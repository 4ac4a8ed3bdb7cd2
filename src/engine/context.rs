//! Explicit random generator context.
//!
//! One `GenContext` per patient generation, threaded through every
//! stochastic component (life arc, timeline, growth trajectory, messiness).
//! Two concurrent generations never share a context, so they never
//! interfere, and a fixed seed reproduces an identical patient.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

pub struct GenContext {
    rng: StdRng,
}

impl GenContext {
    /// Seeded context; `None` draws a seed from OS entropy.
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Gaussian draw. A degenerate standard deviation yields the mean.
    pub fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        match Normal::new(mean, std_dev) {
            Ok(dist) => dist.sample(&mut self.rng),
            Err(_) => mean,
        }
    }

    /// Uniform draw in [low, high).
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..high)
    }

    /// Uniform integer in [low, high], inclusive.
    pub fn int_between(&mut self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..=high)
    }

    /// Bernoulli trial.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen::<f64>() < probability
    }

    /// Uniform pick. Panics on an empty slice; callers pass static pools.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.gen_range(0..items.len())]
    }

    /// Weighted pick over (item, weight) pairs. Panics on an empty slice.
    pub fn pick_weighted<'a, T>(&mut self, items: &'a [(T, u32)]) -> &'a T {
        let total: u32 = items.iter().map(|(_, w)| w).sum();
        if total == 0 {
            return &items[0].0;
        }
        let mut roll = self.rng.gen_range(0..total);
        for (item, weight) in items {
            if roll < *weight {
                return item;
            }
            roll -= weight;
        }
        &items[items.len() - 1].0
    }

    /// Sample `n` distinct items without replacement.
    pub fn sample<T: Clone>(&mut self, items: &[T], n: usize) -> Vec<T> {
        items
            .choose_multiple(&mut self.rng, n.min(items.len()))
            .cloned()
            .collect()
    }
}
