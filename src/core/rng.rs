//! The single source of randomness for quest logic.
//!
//! Quests never touch a platform RNG directly; they draw through
//! [`QuestRng`], which is backed by a real `rand` generator in play and by
//! [`ScriptedRng`] in tests.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::collections::VecDeque;

/// Uniform random draws used by outcome resolution.
pub trait QuestRng {
    /// Uniform draw in `[0, 1)`.
    fn draw(&mut self) -> f64;

    /// Uniform draw in `[min, max)`.
    fn draw_range(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.draw()
    }

    /// Bernoulli trial: true iff a fresh draw falls below `rate`.
    fn chance(&mut self, rate: f64) -> bool {
        self.draw() < rate
    }

    /// Pick one element uniformly. `None` only for an empty slice.
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = ((self.draw() * items.len() as f64) as usize).min(items.len() - 1);
        items.get(index)
    }
}

/// Adapter from any `rand` generator to [`QuestRng`].
#[derive(Debug, Clone)]
pub struct RngService<R> {
    inner: R,
}

/// The generator used during normal play.
pub type GameRng = RngService<StdRng>;

impl<R: RngCore> RngService<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl RngService<StdRng> {
    /// Seed from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Deterministic generator for replays and simulations.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> QuestRng for RngService<R> {
    fn draw(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }
}

/// Replays a fixed sequence of draws, then repeats `fallback` forever.
///
/// Lets tests force every roll: `0.0` succeeds against any positive rate,
/// `0.99` fails against any rate below it.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedRng {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
            fallback: 0.0,
        }
    }

    /// Every draw returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new([]).with_fallback(value)
    }

    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    /// Scripted draws not yet consumed.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl QuestRng for ScriptedRng {
    fn draw(&mut self) -> f64 {
        self.values.pop_front().unwrap_or(self.fallback)
    }
}
