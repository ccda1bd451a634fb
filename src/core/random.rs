//! Random source for every roll in the tournament
//!
//! The combat engine never touches a global RNG. Anything that rolls takes a
//! `&mut impl RandomSource`, so tests can replay fixed draws.

use rand::rngs::ThreadRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Source of uniform draws and uniform choices
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`
    fn uniform(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn choose_index(&mut self, len: usize) -> usize;

    /// Pick one element uniformly, `None` for an empty slice
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return None;
        }
        let index = self.choose_index(items.len());
        items.get(index)
    }
}

/// `RandomSource` backed by any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<ThreadRng> {
    /// Unseeded source drawing from the thread-local generator
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl RngSource<ChaCha8Rng> {
    /// Seeded source; handy for tests and reproducible runner sessions
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn choose_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Replays a fixed script of draws, then falls back to a constant
///
/// Choices are scripted separately from uniform draws so a test can pin the
/// opponent or catalog pick without disturbing the roll sequence.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    draws: VecDeque<f64>,
    choices: VecDeque<usize>,
    fallback: f64,
}

impl ScriptedRandom {
    /// Every draw and choice falls back to `fallback` / index 0
    pub fn constant(fallback: f64) -> Self {
        Self {
            draws: VecDeque::new(),
            choices: VecDeque::new(),
            fallback,
        }
    }

    /// Script uniform draws; once exhausted, draws return `fallback`
    pub fn new(draws: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            choices: VecDeque::new(),
            fallback,
        }
    }

    /// Script the indices returned by `choose_index` (clamped to `len - 1`)
    pub fn with_choices(mut self, choices: impl IntoIterator<Item = usize>) -> Self {
        self.choices = choices.into_iter().collect();
        self
    }

    /// Draws still waiting in the script
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform(&mut self) -> f64 {
        self.draws.pop_front().unwrap_or(self.fallback)
    }

    fn choose_index(&mut self, len: usize) -> usize {
        let index = self.choices.pop_front().unwrap_or(0);
        index.min(len.saturating_sub(1))
    }
}
