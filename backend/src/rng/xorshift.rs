//! xorshift64* random number generator
//!
//! Fast, high-quality PRNG with 64-bit state. Same seed, same sequence:
//! the messaging phase re-shuffles the roster every communication cycle,
//! and a seeded generator keeps those orderings reproducible for replay
//! and debugging.

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use credit_arena_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let order = rng.shuffled_indices(4);
/// assert_eq!(order.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct RngManager {
    state: u64,
}

impl RngManager {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        // xorshift state must never be zero
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate the next random u64 value
    pub fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Random value in `[0, bound)`
    ///
    /// # Panics
    /// Panics if `bound` is zero
    pub fn below(&mut self, bound: usize) -> usize {
        assert!(bound > 0, "bound must be positive");
        (self.next() % bound as u64) as usize
    }

    /// A fresh uniform permutation of `0..len` (Fisher-Yates)
    ///
    /// Independent each call; the generator state advances.
    pub fn shuffled_indices(&mut self, len: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..len).collect();
        for i in (1..len).rev() {
            let j = self.below(i + 1);
            indices.swap(i, j);
        }
        indices
    }

    /// Current generator state (for replay bookkeeping)
    pub fn get_state(&self) -> u64 {
        self.state
    }
}
