//! RNG module - deterministic dice for gate generation
//!
//! Gates are generated from a small seeded LCG so a run can be replayed
//! from its seed (tests and benchmarks rely on this).

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
    /// Uses the high bits; the low bits of a power-of-two LCG cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Roll a die with `sides` faces, returning 1..=sides
    pub fn roll(&mut self, sides: u8) -> u8 {
        (self.next_range(sides as u32) + 1) as u8
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_remapped() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn test_roll_stays_on_the_die() {
        let mut rng = SimpleRng::new(7);
        let mut seen = [false; 6];
        for _ in 0..600 {
            let face = rng.roll(6);
            assert!((1..=6).contains(&face), "rolled {}", face);
            seen[(face - 1) as usize] = true;
        }
        // Every face should come up in 600 rolls
        assert!(seen.iter().all(|&s| s), "faces seen: {:?}", seen);
    }

    #[test]
    fn test_next_range_covers_small_ranges() {
        let mut rng = SimpleRng::new(99);
        let mut seen = [false; 3];
        for _ in 0..100 {
            seen[rng.next_range(3) as usize] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }
}
