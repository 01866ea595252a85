//! Deterministic chance rolls.
//!
//! Rolls are pure functions of a seed, so the same game seed and scheduler
//! history always produce the same enemy decisions.

/// Source of pseudo-random numbers keyed by an explicit seed.
pub trait RngOracle: Send + Sync {
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll in 1..=100.
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// True with `percent`% probability.
    fn chance(&self, seed: u64, percent: u8) -> bool {
        self.roll_d100(seed) <= u32::from(percent)
    }
}

/// PCG-XSH-RR step over a 64-bit state.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Mixes the game seed, a tick counter, the acting entity and a per-roll
/// context into a single seed.
///
/// Use distinct `context` values for independent rolls made by the same
/// entity within one tick (for example one per ability slot).
pub fn compute_seed(game_seed: u64, tick: u64, entity: u32, context: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= tick.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(entity).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}
