//! Deterministic random number generation for dice and board setup.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Forkable**: Derive independent generators (e.g. a fresh board on reset)
//! - **Context streams**: Independent sequences for different purposes,
//!   derived with a fixed mixing function so they are stable across builds
//!
//! ## Usage
//!
//! ```
//! use ludo_five::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let roll = rng.roll_die();
//! assert!((1..=6).contains(&roll));
//!
//! // Tile kinds come from their own stream, so dice never shift the board.
//! let mut board_rng = rng.for_context("board");
//! let _double_roll = board_rng.gen_bool(0.5);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::config::DIE_FACES;

/// Deterministic RNG with forking.
///
/// Uses ChaCha8 for speed while keeping a well-distributed stream.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// The seed this generator was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let context_seed = mix_context(self.seed, context);
        Self {
            inner: ChaCha8Rng::seed_from_u64(context_seed),
            seed: context_seed,
            fork_counter: 0,
        }
    }

    /// Roll one fair die.
    pub fn roll_die(&mut self) -> u8 {
        self.inner.gen_range(1..=DIE_FACES)
    }

    /// Generate a random boolean with given probability of true.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }
}

/// FNV-1a over the context bytes, folded into the seed with the SplitMix64
/// finalizer.
fn mix_context(seed: u64, context: &str) -> u64 {
    let hash = context.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
    });
    let mut z = (seed ^ hash).wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rolls(rng: &mut GameRng, n: usize) -> Vec<u8> {
        (0..n).map(|_| rng.roll_die()).collect()
    }

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        assert_eq!(rolls(&mut rng1, 100), rolls(&mut rng2, 100));
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        assert_ne!(rolls(&mut rng1, 32), rolls(&mut rng2, 32));
    }

    #[test]
    fn test_roll_die_covers_all_faces() {
        let mut rng = GameRng::new(7);
        let mut seen = [false; 6];

        for roll in rolls(&mut rng, 600) {
            assert!((1..=6).contains(&roll));
            seen[roll as usize - 1] = true;
        }

        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_fork_produces_different_sequence() {
        let mut rng = GameRng::new(42);
        let mut forked = rng.fork();

        assert_ne!(rolls(&mut rng, 32), rolls(&mut forked, 32));
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        let forked1 = rng1.fork();
        let forked2 = rng2.fork();

        assert_eq!(forked1.seed(), forked2.seed());
    }

    #[test]
    fn test_context_is_independent_and_deterministic() {
        let rng = GameRng::new(42);
        let mut board1 = rng.for_context("board");
        let mut board2 = GameRng::new(42).for_context("board");
        let mut other = rng.for_context("dice");

        let seq1 = rolls(&mut board1, 32);
        assert_eq!(seq1, rolls(&mut board2, 32));
        assert_ne!(seq1, rolls(&mut other, 32));
    }

    #[test]
    fn test_context_seed_is_pinned() {
        // Board layouts replay only if this value never changes.
        assert_eq!(mix_context(42, "board"), 11_853_611_798_893_220_646);
        assert_eq!(GameRng::new(42).for_context("board").seed(), 11_853_611_798_893_220_646);
        // Zero input gives the first SplitMix64 output.
        assert_eq!(mix_context(0xcbf2_9ce4_8422_2325, ""), 0xe220_a839_7b1d_cdaf);
    }
}
