//! Unit tests for vt-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, ScriptId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(ScriptId::INVALID.0, u16::MAX);
        assert_eq!(AgentId::default(), AgentId::INVALID);
    }

    #[test]
    fn script_id_rejects_overflow() {
        assert!(ScriptId::try_from(70_000usize).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod geom {
    use std::f32::consts::{FRAC_PI_2, PI};

    use crate::{Vec2, normalize_angle};

    #[test]
    fn normalize_keeps_interval_half_open() {
        assert!((normalize_angle(PI) - PI).abs() < 1e-6);
        assert!((normalize_angle(-PI) - PI).abs() < 1e-6, "−π maps to +π");
        assert!(normalize_angle(0.0).abs() < 1e-6);
    }

    #[test]
    fn normalize_wraps_large_angles() {
        for k in -5..=5 {
            let a = 0.3 + k as f32 * std::f32::consts::TAU;
            assert!((normalize_angle(a) - 0.3).abs() < 1e-4, "k={k}");
        }
    }

    #[test]
    fn heading_convention_matches_step_direction() {
        let origin = Vec2::ZERO;
        assert!(origin.heading_to(Vec2::new(0.0, 1.0)).abs() < 1e-6);
        assert!((origin.heading_to(Vec2::new(1.0, 0.0)) - FRAC_PI_2).abs() < 1e-6);

        let h = 0.7;
        let step = Vec2::from_heading(h);
        assert!((origin.heading_to(step) - h).abs() < 1e-5);
    }

    #[test]
    fn heading_straight_back_is_plus_pi() {
        // Signed-zero x makes raw atan2 return −π.
        let h = Vec2::ZERO.heading_to(Vec2::new(-0.0, -2.0));
        assert!(h > -PI && h <= PI);
        assert!((h - PI).abs() < 1e-6);
    }

    #[test]
    fn heading_to_self_is_zero() {
        let p = Vec2::new(3.0, -2.0);
        assert_eq!(p.heading_to(p), 0.0);
    }

    #[test]
    fn distance_and_clamp() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);
        assert!((a.distance_sq(b) - 25.0).abs() < 1e-6);
        assert_eq!(Vec2::new(10.0, -10.0).clamp_to(5.0, 4.0), Vec2::new(5.0, -4.0));
    }
}

#[cfg(test)]
mod time {
    use crate::{CoreError, SimClock, SimConfig, SimTime, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
    }

    #[test]
    fn clock_accumulates_deltas() {
        let mut clock = SimClock::new();
        clock.advance(0.5).unwrap();
        clock.advance(0.25).unwrap();
        assert_eq!(clock.current_tick, Tick(2));
        assert!((clock.now().secs() - 0.75).abs() < 1e-12);
        assert_eq!(clock.last_delta(), 0.25);
    }

    #[test]
    fn zero_delta_still_ticks() {
        let mut clock = SimClock::new();
        clock.advance(0.0).unwrap();
        assert_eq!(clock.current_tick, Tick(1));
        assert_eq!(clock.now(), SimTime::ZERO);
    }

    #[test]
    fn invalid_delta_rejected_and_clock_untouched() {
        let mut clock = SimClock::new();
        clock.advance(1.0).unwrap();
        for bad in [-0.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(clock.advance(bad), Err(CoreError::InvalidDelta(_))));
        }
        assert_eq!(clock.current_tick, Tick(1));
        assert_eq!(clock.now(), SimTime(1.0));
    }

    #[test]
    fn deadlines() {
        let deadline = SimTime(2.0);
        assert!(!deadline.reached(SimTime(1.9)));
        assert!(deadline.reached(SimTime(2.0)));
        assert!(!deadline.passed(SimTime(2.0)));
        assert!(deadline.passed(SimTime(2.1)));
        assert!(!SimTime::NEVER.reached(SimTime(1e300)));
        assert_eq!(SimTime::NEVER.to_string(), "never");
    }

    #[test]
    fn sim_config_end_tick_and_validation() {
        let cfg = SimConfig { total_ticks: 600, ..SimConfig::default() };
        assert_eq!(cfg.end_tick(), Tick(600));
        assert!(cfg.validate().is_ok());

        let bad = SimConfig { fixed_delta_secs: 0.0, ..SimConfig::default() };
        assert!(matches!(bad.validate(), Err(CoreError::Config(_))));
        let bad = SimConfig { num_threads: Some(0), ..SimConfig::default() };
        assert!(matches!(bad.validate(), Err(CoreError::Config(_))));
    }
}

#[cfg(test)]
mod config {
    use crate::{DwellRange, WorldConfig};

    #[test]
    fn defaults_validate() {
        let cfg = WorldConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.agents.interaction_radius, 5.0);
        assert_eq!(cfg.agents.speak_secs, 3.5);
        assert_eq!(cfg.grid.half_extent_x(), 48.0);
    }

    #[test]
    fn rejects_empty_grid() {
        let mut cfg = WorldConfig::default();
        cfg.grid.width = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_inverted_dwell() {
        let mut cfg = WorldConfig::default();
        cfg.agents.walk_dwell = DwellRange::new(8.0, 4.0);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_all_zero_weights() {
        let mut cfg = WorldConfig::default();
        cfg.agents.decision_weights.emote = 0.0;
        cfg.agents.decision_weights.walk = 0.0;
        cfg.agents.decision_weights.rest = 0.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_turn_gain() {
        let mut cfg = WorldConfig::default();
        cfg.agents.turn_gain = 0.0;
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use rand::distributions::WeightedIndex;

    use crate::{AgentId, AgentRng, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, AgentId(0));
        let mut r2 = AgentRng::new(12345, AgentId(0));
        for _ in 0..100 {
            let a: f32 = r1.gen_range(0.0..1.0);
            let b: f32 = r2.gen_range(0.0..1.0);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_agents_differ() {
        let mut r0 = AgentRng::new(1, AgentId(0));
        let mut r1 = AgentRng::new(1, AgentId(1));
        let a: u64 = r0.gen_range(0..u64::MAX);
        let b: u64 = r1.gen_range(0..u64::MAX);
        assert_ne!(a, b, "seeds for adjacent agents should diverge");
    }

    #[test]
    fn between_handles_degenerate_range() {
        let mut rng = AgentRng::new(0, AgentId(0));
        assert_eq!(rng.between(3.0, 3.0), 3.0);
        assert_eq!(rng.between(5.0, 1.0), 5.0);
        for _ in 0..100 {
            let v = rng.between(2.0, 4.0);
            assert!((2.0..=4.0).contains(&v));
        }
    }

    #[test]
    fn weighted_pick_respects_zero_weights() {
        let mut rng = AgentRng::new(9, AgentId(3));
        let table = WeightedIndex::new([0.0, 1.0, 0.0]).unwrap();
        for _ in 0..100 {
            assert_eq!(rng.pick_weighted(&table), 1);
        }
    }

    #[test]
    fn sim_rng_gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
        assert!(rng.gen_bool(7.0), "p is clamped");
    }
}
