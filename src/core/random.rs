/// Random source abstraction for the weighted draw and the die roll.
///
/// Every `rand::Rng` is a `RandomSource`, so seeded `StdRng`s and
/// `thread_rng()` plug in directly. `ScriptedSource` replays fixed draws.
use rand::Rng;
use std::collections::VecDeque;

/// A uniform integer generator.
pub trait RandomSource {
    /// Return a value uniformly distributed in `[0, bound)`.
    ///
    /// Callers never pass `bound == 0`.
    fn next_below(&mut self, bound: u64) -> u64;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_below(&mut self, bound: u64) -> u64 {
        self.gen_range(0..bound)
    }
}

/// Replays a fixed sequence of draws.
///
/// Each draw is reduced modulo the requested bound so any script stays in
/// range. Once the script runs out every draw is `0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    draws: VecDeque<u64>,
}

impl ScriptedSource {
    pub fn new(draws: impl IntoIterator<Item = u64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    /// Draws not yet consumed.
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedSource {
    fn next_below(&mut self, bound: u64) -> u64 {
        self.draws.pop_front().unwrap_or(0) % bound
    }
}
