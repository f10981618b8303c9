//! Deterministic random source for the simulation.
//!
//! Every random draw in a battle (action choice, target choice, the stat an
//! unspecified buff lands on, spawn variance) comes from one source owned by
//! the caller. Seeding that source with the same value replays the battle.

/// Random source used by the simulation.
///
/// Implementations must be deterministic: the same seed yields the same
/// sequence of values.
pub trait RngSource {
    /// Generate the next random u32 value.
    fn next_u32(&mut self) -> u32;

    /// Uniform index in `0..upper` (0 when `upper <= 1`).
    fn range_usize(&mut self, upper: usize) -> usize {
        if upper <= 1 {
            return 0;
        }
        (self.next_u32() as usize) % upper
    }

    /// Uniform value in `[0, 1)`.
    fn unit_f64(&mut self) -> f64 {
        self.next_u32() as f64 / (u32::MAX as f64 + 1.0)
    }

    /// Uniform value in `[-1, 1)`.
    fn signed_unit_f64(&mut self) -> f64 {
        self.unit_f64() * 2.0 - 1.0
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
///
/// # Properties
///
/// - **Deterministic**: Same seed always produces same output
/// - **Fast**: Single multiply + xorshift + rotate
/// - **Small state**: Only 64 bits
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Seed scrambler so that small consecutive seeds diverge immediately.
    const SEED_MIX: u64 = 0x9e3779b97f4a7c15;

    pub fn new(seed: u64) -> Self {
        Self {
            state: Self::pcg_step(seed ^ Self::SEED_MIX),
        }
    }

    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngSource for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = Self::pcg_step(old);
        Self::pcg_output(old)
    }
}

impl<R: RngSource + ?Sized> RngSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}
