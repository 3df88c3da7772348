//! Simulation time model.
//!
//! # Design
//!
//! Two clocks run side by side:
//!
//! - `Tick` counts discrete updates (one per rendered frame).
//! - `SimTime` is simulated seconds, the sum of every tick delta so far.
//!
//! Every timer in the agent core (dwell, speak duration, cooldowns) is a
//! `SimTime` deadline compared against `SimClock::now()`.  The clock is only
//! ever advanced by the delta handed to it, never read from the wall clock, so
//! tests can fast-forward minutes of simulated time instantly and a system
//! clock adjustment can never desynchronize timers.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute update counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimTime ───────────────────────────────────────────────────────────────────

/// Simulated seconds since the world started.
///
/// `f64` so that hours of 60 Hz deltas accumulate without visible drift.
/// [`SimTime::NEVER`] is a deadline that no clock reading ever passes.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// A deadline that never expires.
    pub const NEVER: SimTime = SimTime(f64::INFINITY);

    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }

    /// `true` once this deadline has been reached at `now`.
    #[inline]
    pub fn reached(self, now: SimTime) -> bool {
        now.0 >= self.0
    }

    /// `true` only once `now` is strictly past this deadline.
    #[inline]
    pub fn passed(self, now: SimTime) -> bool {
        now.0 > self.0
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_infinite() {
            write!(f, "never")
        } else {
            write!(f, "{:.3}s", self.0)
        }
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Monotonic simulated clock, advanced only by tick deltas.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Number of completed `advance` calls.
    pub current_tick: Tick,
    now:              SimTime,
    last_delta:       f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// The delta applied by the most recent `advance`.
    #[inline]
    pub fn last_delta(&self) -> f64 {
        self.last_delta
    }

    /// Advance by `delta_secs` and bump the tick counter.
    ///
    /// A zero delta is allowed (a paused frame still ticks).  Negative or
    /// non-finite deltas are rejected and leave the clock untouched, which
    /// keeps `now()` monotonic.
    pub fn advance(&mut self, delta_secs: f64) -> CoreResult<()> {
        if !delta_secs.is_finite() || delta_secs < 0.0 {
            return Err(CoreError::InvalidDelta(delta_secs));
        }
        self.now = self.now + delta_secs;
        self.last_delta = delta_secs;
        self.current_tick = self.current_tick + 1;
        Ok(())
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.current_tick, self.now)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Run-level configuration: how the host drives the scheduler.
///
/// World and agent tuning live in [`WorldConfig`][crate::WorldConfig]; this
/// struct only covers seeding and the stepping cadence.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Delta used by `Sim::run` / `Sim::run_ticks`.  Hosts with a real render
    /// loop call `Sim::step` with their own frame delta instead.
    pub fixed_delta_secs: f64,

    /// Ticks executed by `Sim::run`.
    pub total_ticks: u64,

    /// Emit an observer snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,

    /// Worker thread count for the `parallel` intent phase.  `None` uses all
    /// logical cores.
    pub num_threads: Option<usize>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:                  42,
            fixed_delta_secs:      1.0 / 60.0,
            total_ticks:           60 * 60,
            output_interval_ticks: 30,
            num_threads:           None,
        }
    }
}

impl SimConfig {
    /// The tick at which `Sim::run` stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if !self.fixed_delta_secs.is_finite() || self.fixed_delta_secs <= 0.0 {
            return Err(CoreError::Config(format!(
                "fixed_delta_secs must be positive, got {}",
                self.fixed_delta_secs
            )));
        }
        if self.num_threads == Some(0) {
            return Err(CoreError::Config("num_threads must be at least 1".into()));
        }
        Ok(())
    }
}
