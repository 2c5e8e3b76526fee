//! Random sources for picking the next cell to carve
//!
//! The generator only ever asks for a uniform index into its list of
//! candidates, so any source implementing [`RandomSource`] can drive it.
//!
//! The default is a Park-Miller Linear Congruential Generator (MINSTD),
//! which makes a maze fully reproducible from a `u32` seed:
//! - Multiplier (a): 48271
//! - Modulus (m): 2^31 - 1 = 2147483647
//!
//! Reference: https://en.wikipedia.org/wiki/Lehmer_random_number_generator

/// Uniform choice among `len` candidates
pub trait RandomSource {
    /// Return an index in `0..len`. `len` is always at least 1.
    fn choice_index(&mut self, len: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn choice_index(&mut self, len: usize) -> usize {
        (**self).choice_index(len)
    }
}

/// Park-Miller Linear Congruential Generator
///
/// Generates a deterministic sequence of pseudo-random numbers from a seed.
/// Same seed always produces the same sequence.
#[derive(Debug, Clone)]
pub struct SimpleLCG {
    state: u32,
}

impl SimpleLCG {
    const A: u64 = 48271;
    const M: u64 = 2147483647; // 2^31 - 1

    /// Create a new LCG with the given seed
    ///
    /// Seeds are reduced modulo 2^31 - 1; a seed that reduces to 0 is
    /// replaced with 1 to avoid the degenerate all-zero sequence
    pub fn new(seed: u32) -> Self {
        let state = (seed as u64 % Self::M) as u32;
        Self {
            state: if state == 0 { 1 } else { state },
        }
    }

    /// Advance RNG state and return it, in `1..2^31 - 1`
    pub fn next_u32(&mut self) -> u32 {
        // Use u64 to avoid overflow during multiplication
        self.state = ((self.state as u64 * Self::A) % Self::M) as u32;
        self.state
    }
}

impl RandomSource for SimpleLCG {
    /// Computes `(state * len) / M` with pure integer arithmetic
    fn choice_index(&mut self, len: usize) -> usize {
        let scaled = (self.next_u32() as u64 * len as u64) / Self::M;
        scaled as usize
    }
}

/// Always picks the first candidate. Turns the generator into a fixed
/// walk, which is handy when a test needs to know the exact maze.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstCandidate;

impl RandomSource for FirstCandidate {
    fn choice_index(&mut self, _len: usize) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = SimpleLCG::new(12345);
        let mut rng2 = SimpleLCG::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32(), "RNG not deterministic");
        }
    }

    #[test]
    fn test_seed_zero() {
        let mut zero = SimpleLCG::new(0);
        let mut one = SimpleLCG::new(1);
        assert_eq!(zero.next_u32(), one.next_u32(), "Seed 0 should be replaced with 1");

        // 2^31 - 1 reduces to zero as well
        let mut modulus = SimpleLCG::new(2147483647);
        assert_ne!(modulus.next_u32(), 0);
    }

    #[test]
    fn test_known_sequence() {
        // MINSTD from seed 1: 48271, 182605794, 1291394886
        let mut rng = SimpleLCG::new(1);
        assert_eq!(rng.next_u32(), 48271);
        assert_eq!(rng.next_u32(), 182605794);
        assert_eq!(rng.next_u32(), 1291394886);
    }

    #[test]
    fn test_choice_index_range() {
        let mut rng = SimpleLCG::new(54321);

        for len in 1..=4 {
            for _ in 0..1000 {
                let idx = rng.choice_index(len);
                assert!(idx < len, "choice_index {} not in [0, {})", idx, len);
            }
        }
    }

    #[test]
    fn test_choice_index_covers_all_candidates() {
        let mut rng = SimpleLCG::new(2918957128);
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[rng.choice_index(4)] = true;
        }
        assert!(seen.iter().all(|&s| s), "some index never chosen: {:?}", seen);
    }

    #[test]
    fn test_mut_ref_source() {
        let mut rng = SimpleLCG::new(7);
        let mut copy = rng.clone();
        let expected = copy.choice_index(3);

        fn pick<R: RandomSource>(mut source: R) -> usize {
            source.choice_index(3)
        }
        assert_eq!(pick(&mut rng), expected);
        assert_eq!(FirstCandidate.choice_index(4), 0);
    }
}
