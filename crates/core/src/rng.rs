//! RNG module - injectable randomness for board generation
//!
//! Generation never reaches for ambient global randomness. It draws from a
//! [`RandomSource`], so callers can pass a seeded [`SimpleRng`] for
//! reproducible boards or any other generator of their own.

/// A source of uniformly distributed `u32` values.
pub trait RandomSource {
    /// Generate next random u32
    fn next_u32(&mut self) -> u32;

    /// Generate random value in range [0, max)
    fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0, "next_range needs a non-empty range");
        self.next_u32() % max
    }
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

    /// Current internal state; feeding it back to [`SimpleRng::new`] resumes the sequence
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advance the LCG once and return the high 16 bits of the new state.
    fn step(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        // Low bits of a power-of-two LCG cycle quickly; only the high half is used.
        self.state >> 16
    }
}

impl RandomSource for SimpleRng {
    /// Two LCG steps, high halves concatenated into a full 32-bit word.
    fn next_u32(&mut self) -> u32 {
        let high = self.step();
        let low = self.step();
        (high << 16) | low
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
