//! Integration tests for vt-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, SNAPSHOT_HEADER, SUMMARY_HEADER};
    use crate::row::{AgentSnapshotRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn snap_row(agent_id: u32, tick: u64) -> AgentSnapshotRow {
        AgentSnapshotRow {
            agent_id,
            tick,
            sim_secs:    tick as f64 * 0.5,
            name:        format!("Agent {agent_id}"),
            x:           1.25,
            z:           -3.0,
            facing:      0.0,
            action:      "chatting".into(),
            is_speaking: agent_id == 0,
            utterance:   if agent_id == 0 { "Nice weather, isn't it?".into() } else { String::new() },
            emote:       String::new(),
        }
    }

    fn summary_row(tick: u64) -> TickSummaryRow {
        TickSummaryRow {
            tick,
            idle: 3,
            walking: 1,
            chatting: 2,
            speaking: 1,
            conversations_started: 1,
            handoffs: 0,
            conversation_exits: 0,
            blocked_moves: 4,
            partner_resets: 0,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("agent_snapshots.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, SNAPSHOT_HEADER);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, SUMMARY_HEADER);
    }

    #[test]
    fn snapshot_rows_keep_quoted_text() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 4), snap_row(1, 4)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "0");
        assert_eq!(&rows[0][2], "2.000");
        assert_eq!(&rows[0][3], "Agent 0");
        assert_eq!(&rows[0][4], "1.250");
        assert_eq!(&rows[0][7], "chatting");
        assert_eq!(&rows[0][8], "1");
        assert_eq!(&rows[0][9], "Nice weather, isn't it?");
        assert_eq!(&rows[1][8], "0");
        assert_eq!(&rows[1][9], "");
    }

    #[test]
    fn summary_row_columns() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(7)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        let fields: Vec<&str> = rows[0].iter().collect();
        assert_eq!(fields, ["7", "3", "1", "2", "1", "1", "0", "0", "4", "0"]);
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn missing_dir_is_an_io_error() {
        let dir = tmp();
        let res = CsvWriter::new(&dir.path().join("nope"));
        assert!(res.is_err());
    }
}

// ── Row conversion ────────────────────────────────────────────────────────────

#[cfg(test)]
mod row_tests {
    use vt_agent::{ActionKind, AgentSnapshot, EmoteHint};
    use vt_core::{AgentId, SimTime, Tick, Vec2};
    use vt_sim::TickSummary;

    use crate::row::{AgentSnapshotRow, TickSummaryRow};

    #[test]
    fn snapshot_row_flattens_options() {
        let snap = AgentSnapshot {
            id:          AgentId(9),
            name:        "Ada".into(),
            position:    Vec2::new(2.0, 3.0),
            facing:      1.0,
            action:      ActionKind::Idle,
            is_speaking: false,
            utterance:   None,
            emote:       Some(EmoteHint::Celebrate),
        };
        let row = AgentSnapshotRow::new(Tick(12), SimTime(6.0), &snap);
        assert_eq!(row.agent_id, 9);
        assert_eq!(row.tick, 12);
        assert_eq!(row.sim_secs, 6.0);
        assert_eq!(row.action, "idle");
        assert_eq!(row.utterance, "");
        assert_eq!(row.emote, "celebrate");
    }

    #[test]
    fn summary_row_copies_counters() {
        let summary = TickSummary { tick: Tick(3), chatting: 4, handoffs: 2, ..TickSummary::default() };
        let row = TickSummaryRow::from(&summary);
        assert_eq!(row.tick, 3);
        assert_eq!(row.chatting, 4);
        assert_eq!(row.handoffs, 2);
        assert_eq!(row.idle, 0);
    }
}

// ── End to end ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use vt_core::{SimConfig, Vec2, WorldConfig};
    use vt_grid::TileCollisionGrid;
    use vt_sim::SimBuilder;

    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;

    #[test]
    fn integration_csv() {
        let config = SimConfig {
            seed:                  1,
            fixed_delta_secs:      0.5,
            total_ticks:           6,
            output_interval_ticks: 2,
            num_threads:           Some(1),
        };
        let world = WorldConfig { agent_count: 0, ..WorldConfig::default() };
        let grid = TileCollisionGrid::from_ascii(&["......"; 6], 1.0).unwrap();
        let mut sim = SimBuilder::town(config, world).unwrap().grid(grid).build().unwrap();
        sim.registry.insert("A", Vec2::new(0.0, 0.0), 0.0);
        sim.registry.insert("B", Vec2::new(1.0, 0.0), 0.0);
        sim.registry.insert("C", Vec2::new(-2.5, 2.5), 0.0);

        let dir = tempfile::tempdir().unwrap();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        // output_interval = 2 → snapshots at ticks 0, 2, 4; 3 agents each.
        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 9);
        assert!(rows.iter().any(|r| &r[7] == "chatting"));

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 6);
        assert_eq!(&rows[0][5], "1", "A and B pair on the first tick");
    }
}
