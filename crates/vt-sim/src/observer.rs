//! Simulation observer trait for progress reporting and data collection.

use vt_agent::AgentSnapshot;
use vt_core::{SimTime, Tick};

/// Per-tick counters handed to [`SimObserver::on_tick_end`].
///
/// State counts are taken after the apply phase; event counts cover
/// everything that happened during the tick, including the teardown sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickSummary {
    pub tick:                  Tick,
    pub idle:                  usize,
    pub walking:               usize,
    pub chatting:              usize,
    pub speaking:              usize,
    pub conversations_started: usize,
    pub handoffs:              usize,
    /// Agents that left a conversation this tick, for any reason.
    pub conversation_exits:    usize,
    pub blocked_moves:         usize,
    /// Seated agents reset by the sweep because their partner was gone.
    pub partner_resets:        usize,
}

/// Callbacks invoked by [`Sim`][crate::Sim] at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
///         if tick.0 % self.interval == 0 {
///             println!("{tick}: {} chatting", summary.chatting);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the start of each tick, after the clock has advanced.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called every `config.output_interval_ticks` ticks with the
    /// presentation-layer view of every agent, in ascending id order.
    fn on_snapshot(&mut self, _tick: Tick, _now: SimTime, _agents: &[AgentSnapshot]) {}

    /// Called once after [`Sim::run`][crate::Sim::run] finishes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
