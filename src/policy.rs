//! Victim selection strategies. One policy is chosen when the engine is built.

use serde::{Deserialize, Serialize};

pub trait PickPolicy {
    /// Index of the tile to remove. Only called with `pool_len > 0`.
    fn pick(&mut self, pool_len: usize) -> usize;

    fn name(&self) -> &'static str;
}

/// Removes tiles in the order they were supplied.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialPick;

impl PickPolicy for SequentialPick {
    fn pick(&mut self, _pool_len: usize) -> usize {
        0
    }

    fn name(&self) -> &'static str {
        "sequential"
    }
}

/// Uniform pick driven by a source of numbers in `[0, 1)`.
pub struct RandomPick {
    source: Box<dyn FnMut() -> f64>,
}

impl RandomPick {
    pub fn new(source: impl FnMut() -> f64 + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Backed by `Math.random()`, as the game grid generator does.
    pub fn browser() -> Self {
        Self::new(js_sys::Math::random)
    }
}

impl std::fmt::Debug for RandomPick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomPick").finish_non_exhaustive()
    }
}

impl PickPolicy for RandomPick {
    fn pick(&mut self, pool_len: usize) -> usize {
        let r = (self.source)();
        let idx = (r * pool_len as f64).floor() as usize;
        // r == 1.0 from a misbehaving source would land one past the end
        idx.min(pool_len.saturating_sub(1))
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    #[default]
    Random,
    Sequential,
}

impl PolicyKind {
    pub fn into_policy(self) -> Box<dyn PickPolicy> {
        match self {
            PolicyKind::Random => Box::new(RandomPick::browser()),
            PolicyKind::Sequential => Box::new(SequentialPick),
        }
    }
}
