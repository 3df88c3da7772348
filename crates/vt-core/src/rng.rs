//! Deterministic per-agent and world-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each agent gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive agent IDs uniformly across the seed space.
//! This means:
//!
//! - Decision rolls of one agent never depend on how many other agents rolled
//!   before it in the same tick, so the intent phase can run in any order.
//! - Spawning or removing agents does not disturb the streams of the others.
//!
//! World generation and spawning use a single [`SimRng`] seeded from the same
//! global seed.

use rand::distributions::WeightedIndex;
use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::distributions::Distribution;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG.
///
/// Lives in the registry next to the agent's state but in a separate `Vec`,
/// so the intent phase can hold `&mut` RNGs while sharing `&` agent state.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and an agent ID.
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform value in `[lo, hi]`; returns `lo` if the range is empty or
    /// inverted instead of panicking like `gen_range`.
    #[inline]
    pub fn between(&mut self, lo: f64, hi: f64) -> f64 {
        if hi > lo { self.0.gen_range(lo..=hi) } else { lo }
    }

    /// Index drawn from a prepared weight table.
    #[inline]
    pub fn pick_weighted(&mut self, weights: &WeightedIndex<f64>) -> usize {
        weights.sample(&mut self.0)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// World-level RNG for generation and spawning.
///
/// Used only in single-threaded setup code.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
