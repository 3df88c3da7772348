//! town — headless run of the voxel_town agent core.
//!
//! Builds a generated town, runs it at a fixed delta, and logs what the
//! population got up to.  Optionally records CSV output and dumps the final
//! snapshot as JSON.
//!
//! ```text
//! RUST_LOG=info cargo run -p town -- --ticks 3600 --agents 40 --output out/
//! ```

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use vt_agent::{AgentSnapshot, DialogueLibrary};
use vt_core::{SimConfig, SimTime, Tick, WorldConfig};
use vt_output::{CsvWriter, SimOutputObserver};
use vt_sim::{SimBuilder, SimObserver, TickSummary};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file with `sim` and `world` sections; missing fields use defaults.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON array of scripts, each an array of lines.
    #[arg(long, value_name = "FILE")]
    dialogue: Option<PathBuf>,

    /// Override `sim.total_ticks`.
    #[arg(long)]
    ticks: Option<u64>,

    /// Override `sim.seed`.
    #[arg(long)]
    seed: Option<u64>,

    /// Override `world.agent_count`.
    #[arg(long)]
    agents: Option<usize>,

    /// Worker threads for the intent phase (default: all cores).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    threads: Option<u64>,

    /// Directory for `agent_snapshots.csv` and `tick_summaries.csv`.
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Write the final snapshot to this file as JSON.
    #[arg(long, value_name = "FILE")]
    snapshot_json: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DemoConfig {
    sim:   SimConfig,
    world: WorldConfig,
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Accumulates run totals and forwards to the CSV recorder when present.
#[derive(Default)]
struct TownObserver {
    csv:                   Option<SimOutputObserver<CsvWriter>>,
    conversations_started: usize,
    handoffs:              usize,
    conversation_exits:    usize,
    blocked_moves:         usize,
    partner_resets:        usize,
    peak_chatting:         usize,
    snapshots:             usize,
}

impl SimObserver for TownObserver {
    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        self.conversations_started += summary.conversations_started;
        self.handoffs += summary.handoffs;
        self.conversation_exits += summary.conversation_exits;
        self.blocked_moves += summary.blocked_moves;
        self.partner_resets += summary.partner_resets;
        self.peak_chatting = self.peak_chatting.max(summary.chatting);
        if let Some(csv) = self.csv.as_mut() {
            csv.on_tick_end(tick, summary);
        }
    }

    fn on_snapshot(&mut self, tick: Tick, now: SimTime, agents: &[AgentSnapshot]) {
        self.snapshots += 1;
        if let Some(csv) = self.csv.as_mut() {
            csv.on_snapshot(tick, now, agents);
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        if let Some(csv) = self.csv.as_mut() {
            csv.on_sim_end(final_tick);
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let DemoConfig { sim: mut config, world: mut world } = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => DemoConfig::default(),
    };
    if let Some(t) = cli.ticks {
        config.total_ticks = t;
    }
    if let Some(s) = cli.seed {
        config.seed = s;
    }
    if let Some(n) = cli.agents {
        world.agent_count = n;
    }
    if let Some(n) = cli.threads {
        config.num_threads = Some(n as usize);
    }

    let mut builder = SimBuilder::town(config, world)?;
    if let Some(path) = &cli.dialogue {
        let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let scripts: Vec<Vec<String>> =
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
        builder = builder.library(DialogueLibrary::new(scripts)?);
    }
    let mut sim = builder.build()?;

    let mut obs = TownObserver::default();
    if let Some(dir) = &cli.output {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        obs.csv = Some(SimOutputObserver::new(CsvWriter::new(dir)?));
    }

    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.csv.as_mut().and_then(SimOutputObserver::take_error) {
        warn!(error = %e, "output incomplete");
    }

    info!(
        ticks = sim.tick().0,
        simulated_secs = sim.now().secs(),
        wall_secs = elapsed.as_secs_f64(),
        agents = sim.registry.len(),
        "run complete"
    );
    info!(
        started = obs.conversations_started,
        handoffs = obs.handoffs,
        exits = obs.conversation_exits,
        peak_chatting = obs.peak_chatting,
        blocked_moves = obs.blocked_moves,
        partner_resets = obs.partner_resets,
        snapshots = obs.snapshots,
        "conversation totals"
    );

    let snapshot = sim.snapshot();
    for s in snapshot.iter().filter(|s| s.is_speaking) {
        info!(agent = %s.name, line = s.utterance.as_deref().unwrap_or(""), "still talking");
    }

    if let Some(path) = &cli.snapshot_json {
        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), agents = snapshot.len(), "final snapshot written");
    }

    Ok(())
}
