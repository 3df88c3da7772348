//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `agent_snapshots.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;
use tracing::debug;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};

pub const SNAPSHOT_HEADER: [&str; 11] = [
    "agent_id", "tick", "sim_secs", "name", "x", "z", "facing", "action", "is_speaking", "utterance", "emote",
];

pub const SUMMARY_HEADER: [&str; 10] = [
    "tick",
    "idle",
    "walking",
    "chatting",
    "speaking",
    "conversations_started",
    "handoffs",
    "conversation_exits",
    "blocked_moves",
    "partner_resets",
];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` (which must exist) and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        debug!(dir = %dir.display(), "csv output opened");
        Ok(Self { snapshots, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                format!("{:.3}", row.sim_secs),
                row.name.clone(),
                format!("{:.3}", row.x),
                format!("{:.3}", row.z),
                format!("{:.4}", row.facing),
                row.action.clone(),
                (row.is_speaking as u8).to_string(),
                row.utterance.clone(),
                row.emote.clone(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.idle.to_string(),
            row.walking.to_string(),
            row.chatting.to_string(),
            row.speaking.to_string(),
            row.conversations_started.to_string(),
            row.handoffs.to_string(),
            row.conversation_exits.to_string(),
            row.blocked_moves.to_string(),
            row.partner_resets.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
