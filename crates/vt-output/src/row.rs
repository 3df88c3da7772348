//! Plain data row types written by output backends.

use vt_agent::AgentSnapshot;
use vt_core::{SimTime, Tick};
use vt_sim::TickSummary;

/// One agent as seen by the renderer at a given tick.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id:    u32,
    pub tick:        u64,
    pub sim_secs:    f64,
    pub name:        String,
    pub x:           f32,
    pub z:           f32,
    pub facing:      f32,
    /// `idle`, `walking` or `chatting`.
    pub action:      String,
    pub is_speaking: bool,
    /// Empty unless the agent is speaking.
    pub utterance:   String,
    /// Empty when no emote is showing.
    pub emote:       String,
}

impl AgentSnapshotRow {
    pub fn new(tick: Tick, now: SimTime, snap: &AgentSnapshot) -> Self {
        Self {
            agent_id:    snap.id.0,
            tick:        tick.0,
            sim_secs:    now.secs(),
            name:        snap.name.clone(),
            x:           snap.position.x,
            z:           snap.position.z,
            facing:      snap.facing,
            action:      snap.action.to_string(),
            is_speaking: snap.is_speaking,
            utterance:   snap.utterance.clone().unwrap_or_default(),
            emote:       snap.emote.map(|e| format!("{e:?}").to_lowercase()).unwrap_or_default(),
        }
    }
}

/// Counters for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:                  u64,
    pub idle:                  u64,
    pub walking:               u64,
    pub chatting:              u64,
    pub speaking:              u64,
    pub conversations_started: u64,
    pub handoffs:              u64,
    pub conversation_exits:    u64,
    pub blocked_moves:         u64,
    pub partner_resets:        u64,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        Self {
            tick:                  s.tick.0,
            idle:                  s.idle as u64,
            walking:               s.walking as u64,
            chatting:              s.chatting as u64,
            speaking:              s.speaking as u64,
            conversations_started: s.conversations_started as u64,
            handoffs:              s.handoffs as u64,
            conversation_exits:    s.conversation_exits as u64,
            blocked_moves:         s.blocked_moves as u64,
            partner_resets:        s.partner_resets as u64,
        }
    }
}
