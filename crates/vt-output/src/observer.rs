//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use tracing::warn;
use vt_agent::AgentSnapshot;
use vt_core::{SimTime, Tick};
use vt_sim::{SimObserver, TickSummary};

use crate::row::{AgentSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes agent snapshots and tick summaries to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed; further errors suppressed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, _tick: Tick, summary: &TickSummary) {
        let result = self.writer.write_tick_summary(&TickSummaryRow::from(summary));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, now: SimTime, agents: &[AgentSnapshot]) {
        if agents.is_empty() {
            return;
        }
        let rows: Vec<AgentSnapshotRow> = agents.iter().map(|a| AgentSnapshotRow::new(tick, now, a)).collect();
        let result = self.writer.write_snapshots(&rows);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
