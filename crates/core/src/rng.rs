//! RNG module - seeded pseudo-random state for deterministic sessions
//!
//! All randomness in the core (letter pool refills, random board letters,
//! twist selection) flows through an explicit [`SimpleRng`] instance owned
//! by the session. Server and client replicas construct their generators
//! from a shared seed and therefore draw identical sequences; there is no
//! global random state anywhere in the crate.

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

    /// Generate random value in range [0, max); returns 0 when max is 0
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Pick a uniformly random element of a slice
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            return None;
        }
        let index = self.next_range(slice.len() as u32) as usize;
        slice.get(index)
    }

    /// Get the current RNG state (for restarting a session with the same sequence)
    pub fn seed(&self) -> u32 {
        self.state
    }
}
