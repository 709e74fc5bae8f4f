//! RNG module - tile color generation
//!
//! Board generation pulls colors from a [`ColorSource`]. The default source is
//! a small LCG so a seed reproduces the same board, which keeps tests and
//! benchmarks deterministic.

use crate::types::TileColor;

/// Supplies colors for freshly generated or refilled cells
///
/// Implementations must only return playable colors, never `TileColor::Empty`.
pub trait ColorSource {
    fn next_color(&mut self) -> TileColor;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Low LCG bits have short periods, so the range is taken from the high half.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max
    }

    /// Current internal state (reseeding with it continues the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl ColorSource for SimpleRng {
    fn next_color(&mut self) -> TileColor {
        let idx = self.next_range(TileColor::PLAYABLE.len() as u32) as usize;
        TileColor::PLAYABLE[idx]
    }
}

/// Cycles through a fixed list of colors; handy for hand-built scenarios
#[derive(Debug, Clone)]
pub struct CyclicColors {
    colors: Vec<TileColor>,
    next: usize,
}

impl CyclicColors {
    pub fn new(colors: Vec<TileColor>) -> Self {
        debug_assert!(!colors.is_empty());
        debug_assert!(colors.iter().all(|c| !c.is_empty()));
        Self { colors, next: 0 }
    }
}

impl ColorSource for CyclicColors {
    fn next_color(&mut self) -> TileColor {
        let color = self.colors[self.next % self.colors.len()];
        self.next = self.next.wrapping_add(1);
        color
    }
}
