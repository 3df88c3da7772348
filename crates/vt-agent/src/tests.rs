//! Unit tests for vt-agent.

use vt_core::{AgentId, ScriptId, SimTime, Vec2};

use crate::{AgentRegistry, AgentState, ConversationSeat};

fn registry_of(n: usize) -> AgentRegistry {
    let mut reg = AgentRegistry::new(7);
    for i in 0..n {
        reg.insert(format!("a{i}"), Vec2::new(i as f32, 0.0), 0.0);
    }
    reg
}

// ── AgentState ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod state {
    use super::*;
    use crate::{ActionKind, EmoteHint};

    #[test]
    fn fresh_agent_is_idle_and_due() {
        let a = AgentState::new(AgentId(0), "Ada", Vec2::ZERO, 0.0);
        assert_eq!(a.kind(), ActionKind::Idle);
        assert!(a.action_deadline.reached(SimTime::ZERO));
        assert!(a.partner().is_none());
        assert!(!a.is_speaking());
    }

    #[test]
    fn cooldown_blocks_until_strictly_past() {
        let mut a = AgentState::new(AgentId(0), "Ada", Vec2::ZERO, 0.0);
        a.conversation_cooldown_until = SimTime(10.0);
        assert!(!a.can_converse(SimTime(10.0)));
        assert!(a.can_converse(SimTime(10.01)));
        a.walk_to(Vec2::new(1.0, 1.0), SimTime(20.0));
        assert!(!a.can_converse(SimTime(11.0)));
    }

    #[test]
    fn seats_start_on_alternating_lines() {
        let i = ConversationSeat::initiator(AgentId(1), ScriptId(3));
        let r = ConversationSeat::responder(AgentId(0), ScriptId(3));
        assert_eq!((i.line_index, i.my_turn), (0, true));
        assert_eq!((r.line_index, r.my_turn), (1, false));
        assert!(!i.speaking && !r.speaking);
    }

    #[test]
    fn sit_down_and_leave() {
        let mut a = AgentState::new(AgentId(0), "Ada", Vec2::ZERO, 0.0);
        a.sit_down(ConversationSeat::initiator(AgentId(1), ScriptId(0)));
        assert_eq!(a.partner(), Some(AgentId(1)));
        assert_eq!(a.action_deadline, SimTime::NEVER);

        a.leave_conversation(SimTime(5.0), SimTime(15.0));
        assert!(a.is_idle());
        assert_eq!(a.action_deadline, SimTime(5.0));
        assert_eq!(a.conversation_cooldown_until, SimTime(15.0));
    }

    #[test]
    fn leave_is_noop_when_not_chatting() {
        let mut a = AgentState::new(AgentId(0), "Ada", Vec2::ZERO, 0.0);
        a.walk_to(Vec2::new(3.0, 0.0), SimTime(8.0));
        a.leave_conversation(SimTime(1.0), SimTime(99.0));
        assert_eq!(a.kind(), ActionKind::Walking);
        assert_eq!(a.conversation_cooldown_until, SimTime::ZERO);
    }

    #[test]
    fn emote_expires() {
        let mut a = AgentState::new(AgentId(0), "Ada", Vec2::ZERO, 0.0);
        a.show_emote(EmoteHint::Wave, SimTime(2.0));
        assert_eq!(a.visible_emote(SimTime(1.9)), Some(EmoteHint::Wave));
        assert_eq!(a.visible_emote(SimTime(2.0)), None);
    }
}

// ── AgentRegistry ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod registry {
    use super::*;

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let mut reg = registry_of(3);
        assert_eq!(reg.ids(), vec![AgentId(0), AgentId(1), AgentId(2)]);
        reg.remove(AgentId(2));
        let id = reg.insert("late", Vec2::ZERO, 0.0);
        assert_eq!(id, AgentId(3));
    }

    #[test]
    fn remove_preserves_order_and_lookup() {
        let mut reg = registry_of(5);
        let gone = reg.remove(AgentId(1)).unwrap();
        assert_eq!(gone.display_name, "a1");
        assert_eq!(reg.ids(), vec![AgentId(0), AgentId(2), AgentId(3), AgentId(4)]);
        assert_eq!(reg.get(AgentId(3)).unwrap().display_name, "a3");
        assert_eq!(reg.slot_of(AgentId(4)), Some(3));
        assert!(!reg.contains(AgentId(1)));
    }

    #[test]
    fn remove_is_idempotent() {
        let mut reg = registry_of(2);
        assert!(reg.remove(AgentId(0)).is_some());
        assert!(reg.remove(AgentId(0)).is_none());
        assert!(reg.remove(AgentId(42)).is_none());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn pair_mut_in_either_order() {
        let mut reg = registry_of(4);
        {
            let (a, b) = reg.get_pair_mut(AgentId(3), AgentId(1)).unwrap();
            a.facing = 1.0;
            b.facing = 2.0;
        }
        assert_eq!(reg.get(AgentId(3)).unwrap().facing, 1.0);
        assert_eq!(reg.get(AgentId(1)).unwrap().facing, 2.0);
        assert!(reg.get_pair_mut(AgentId(2), AgentId(2)).is_none());
        assert!(reg.get_pair_mut(AgentId(2), AgentId(9)).is_none());
    }

    #[test]
    fn rng_streams_survive_removal() {
        let mut a = registry_of(3);
        let mut b = registry_of(3);
        b.remove(AgentId(0));
        let x: u64 = a.rng_mut(AgentId(2)).unwrap().gen_range(0..u64::MAX);
        let y: u64 = b.rng_mut(AgentId(2)).unwrap().gen_range(0..u64::MAX);
        assert_eq!(x, y);
    }

    #[test]
    fn parts_are_slot_aligned() {
        let mut reg = registry_of(3);
        let (agents, rngs) = reg.parts_mut();
        assert_eq!(agents.len(), rngs.len());
    }
}

// ── DialogueLibrary / NamePool ────────────────────────────────────────────────

#[cfg(test)]
mod dialogue {
    use super::*;
    use crate::{AgentError, DialogueLibrary, NamePool};

    #[test]
    fn builtin_scripts_are_usable() {
        let lib = DialogueLibrary::builtin();
        assert!(!lib.is_empty());
        for id in lib.ids() {
            assert!(lib.script_len(id) >= 2, "{id} too short to alternate");
            assert!(lib.line(id, 0).is_some());
        }
        assert!(lib.line(ScriptId(999), 0).is_none());
        assert_eq!(lib.script_len(ScriptId(999)), 0);
    }

    #[test]
    fn custom_library_validation() {
        assert!(matches!(DialogueLibrary::new(vec![]), Err(AgentError::EmptyLibrary)));
        assert!(matches!(
            DialogueLibrary::new(vec![vec!["hi".into()], vec![]]),
            Err(AgentError::EmptyScript(1))
        ));
        let lib = DialogueLibrary::new(vec![vec!["a".into(), "b".into()]]).unwrap();
        assert_eq!(lib.line(ScriptId(0), 1), Some("b"));
    }

    #[test]
    fn library_must_fit_script_ids() {
        // u16::MAX is reserved for ScriptId::INVALID.
        let scripts = vec![vec!["x".to_string()]; usize::from(u16::MAX)];
        assert!(matches!(DialogueLibrary::new(scripts), Err(AgentError::TooManyScripts(65535))));
        let scripts = vec![vec!["x".to_string()]; usize::from(u16::MAX) - 1];
        assert!(DialogueLibrary::new(scripts).is_ok());
    }

    #[test]
    fn names_wrap_with_generation_suffix() {
        let pool = NamePool::new(vec!["Ada".into(), "Bram".into()]).unwrap();
        assert_eq!(pool.name_for(0), "Ada");
        assert_eq!(pool.name_for(1), "Bram");
        assert_eq!(pool.name_for(2), "Ada 2");
        assert_eq!(pool.name_for(5), "Bram 3");
        assert!(matches!(NamePool::new(vec![]), Err(AgentError::EmptyNamePool)));
    }
}

// ── Builder / snapshot ────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use std::f32::consts::PI;

    use vt_core::{GridConfig, SimRng};
    use vt_grid::TileCollisionGrid;

    use super::*;
    use crate::{AgentError, AgentRegistryBuilder};

    #[test]
    fn spawns_on_walkable_tiles() {
        let mut rng = SimRng::new(11);
        let grid = TileCollisionGrid::generate(&GridConfig::default(), &mut rng).unwrap();
        let reg = AgentRegistryBuilder::new(11).count(30).spawn(&grid, &mut rng).unwrap();
        assert_eq!(reg.len(), 30);
        for a in reg.iter() {
            assert!(grid.is_walkable(a.position));
            assert!(a.is_idle());
            assert!(a.facing > -PI && a.facing <= PI, "facing {} outside (−π, π]", a.facing);
        }
    }

    #[test]
    fn falls_back_to_the_only_open_tile() {
        let grid = TileCollisionGrid::from_ascii(&["####", "###.", "####"], 1.0).unwrap();
        let reg = AgentRegistryBuilder::new(0).count(3).spawn(&grid, &mut SimRng::new(0)).unwrap();
        for a in reg.iter() {
            assert_eq!(grid.tile_of(a.position), Some((3, 1)));
        }
    }

    #[test]
    fn solid_map_cannot_spawn() {
        let grid = TileCollisionGrid::from_ascii(&["##"], 1.0).unwrap();
        let res = AgentRegistryBuilder::new(0).count(1).spawn(&grid, &mut SimRng::new(0));
        assert!(matches!(res, Err(AgentError::NoWalkableTile)));
    }
}

#[cfg(test)]
mod snapshot {
    use super::*;
    use crate::{ActionKind, AgentSnapshot, DialogueLibrary};

    #[test]
    fn speaking_agent_carries_its_line() {
        let lib = DialogueLibrary::new(vec![vec!["hello".into(), "hi".into()]]).unwrap();
        let mut a = AgentState::new(AgentId(0), "Ada", Vec2::ZERO, 0.0);
        let mut seat = ConversationSeat::initiator(AgentId(1), ScriptId(0));
        seat.speaking = true;
        a.sit_down(seat);

        let snap = AgentSnapshot::capture(&a, SimTime(1.0), &lib);
        assert_eq!(snap.action, ActionKind::Chatting);
        assert!(snap.is_speaking);
        assert_eq!(snap.utterance.as_deref(), Some("hello"));
    }

    #[test]
    fn silent_agent_has_no_utterance() {
        let lib = DialogueLibrary::builtin();
        let a = AgentState::new(AgentId(0), "Ada", Vec2::ZERO, 0.0);
        let snap = AgentSnapshot::capture(&a, SimTime::ZERO, &lib);
        assert!(snap.utterance.is_none());
        assert!(snap.emote.is_none());
    }
}
