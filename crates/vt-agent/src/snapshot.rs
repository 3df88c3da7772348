//! Read-only per-agent view for the presentation layer.

use vt_core::{AgentId, SimTime, Vec2};

use crate::{ActionKind, AgentState, DialogueLibrary, EmoteHint};

/// Everything a renderer needs to draw one agent for one frame.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSnapshot {
    pub id:          AgentId,
    pub name:        String,
    pub position:    Vec2,
    pub facing:      f32,
    pub action:      ActionKind,
    pub is_speaking: bool,
    /// Current line while speaking.
    pub utterance:   Option<String>,
    pub emote:       Option<EmoteHint>,
}

impl AgentSnapshot {
    pub fn capture(agent: &AgentState, now: SimTime, library: &DialogueLibrary) -> Self {
        let utterance = agent
            .seat()
            .filter(|s| s.speaking)
            .and_then(|s| library.line(s.script, s.line_index))
            .map(str::to_owned);
        Self {
            id:          agent.id,
            name:        agent.display_name.clone(),
            position:    agent.position,
            facing:      agent.facing,
            action:      agent.kind(),
            is_speaking: agent.is_speaking(),
            utterance,
            emote:       agent.visible_emote(now),
        }
    }
}
