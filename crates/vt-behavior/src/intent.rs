//! Agent intents: what an agent asks for during the intent phase.

use vt_core::{AgentId, ScriptId, SimTime, Vec2};
use vt_agent::EmoteHint;

/// Outcome of one decision roll.  Applied to the rolling agent only.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Stay idle showing `emote` until `deadline`.
    Emote { emote: EmoteHint, deadline: SimTime },
    /// Walk towards `target` until arrival or `deadline`.
    Walk { target: Vec2, deadline: SimTime },
    /// Stay idle without a hint until `deadline`.
    Rest { deadline: SimTime },
}

/// An action that an agent wants performed during the current tick.
///
/// Intents are produced by [`BehaviorModel::decide`][crate::BehaviorModel::decide]
/// from read-only pre-tick state and consumed by the apply phase in vt-sim.
/// Every variant writes only to the emitting agent except
/// [`StartConversation`](Intent::StartConversation) and
/// [`HandTurn`](Intent::HandTurn), which the apply phase resolves atomically
/// across both participants.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Commit a validated walking step.
    Move { position: Vec2, facing: f32 },

    /// Turn in place.
    Face(f32),

    /// The walking step was rejected; go idle for the blocked backoff.
    Blocked { facing: f32 },

    /// Apply a fresh decision roll.
    Decide(Decision),

    /// Claim `partner` for a conversation on `script` with this agent as
    /// initiator.  If the claim loses to an earlier one this tick, `fallback`
    /// (when present) is applied instead.
    StartConversation {
        partner:  AgentId,
        script:   ScriptId,
        fallback: Option<Decision>,
    },

    /// Start saying the current line.
    BeginSpeaking { deadline: SimTime },

    /// Finish speaking and pass the turn: the partner `to` gets the turn and
    /// moves to `new_line_index`.
    HandTurn { to: AgentId, new_line_index: usize },

    /// Out of lines with the turn: leave the conversation.
    EndConversation { cooldown_until: SimTime },

    /// Finished a line at or past the exhaustion cutoff: leave the
    /// conversation with a celebratory emote.
    Celebrate { cooldown_until: SimTime, emote_until: SimTime },
}
