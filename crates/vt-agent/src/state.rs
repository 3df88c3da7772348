//! Per-agent mutable state.
//!
//! # Conversation fields
//!
//! A conversation lives entirely inside [`ActionState::Chatting`]: the partner
//! id, shared script, line index, and turn flags exist only while the agent is
//! chatting, so "has a partner ⇔ is chatting" cannot be violated.  What the
//! type system cannot express is that the partner points back; the simulation
//! checks that at the start of every tick.

use vt_core::{AgentId, ScriptId, SimTime, Vec2};

// ── Display hints ─────────────────────────────────────────────────────────────

/// Cosmetic hint the renderer shows above an agent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EmoteHint {
    /// Idle flourish rolled by the decision cycle.
    Wave,
    /// Shown after leaving a conversation that ran its course.
    Celebrate,
}

/// Field-less mirror of [`ActionState`] for snapshots and counting.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    Idle,
    Walking,
    Chatting,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ActionKind::Idle => "idle",
            ActionKind::Walking => "walking",
            ActionKind::Chatting => "chatting",
        })
    }
}

// ── ConversationSeat ──────────────────────────────────────────────────────────

/// One side of a two-party conversation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConversationSeat {
    pub partner:        AgentId,
    /// Both seats of a session reference the same script.
    pub script:         ScriptId,
    /// Next line this agent will say.  The initiator starts on 0, the partner
    /// on 1; each handoff advances the receiver's index by one.
    pub line_index:     usize,
    /// This side may speak next.
    pub my_turn:        bool,
    pub speaking:       bool,
    pub speak_deadline: SimTime,
}

impl ConversationSeat {
    /// Seat for the agent that opened the conversation.
    pub fn initiator(partner: AgentId, script: ScriptId) -> Self {
        Self {
            partner,
            script,
            line_index:     0,
            my_turn:        true,
            speaking:       false,
            speak_deadline: SimTime::NEVER,
        }
    }

    /// Seat for the agent that was approached.
    pub fn responder(partner: AgentId, script: ScriptId) -> Self {
        Self {
            partner,
            script,
            line_index:     1,
            my_turn:        false,
            speaking:       false,
            speak_deadline: SimTime::NEVER,
        }
    }
}

// ── ActionState ───────────────────────────────────────────────────────────────

/// What an agent is doing.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionState {
    #[default]
    Idle,
    Walking { target: Vec2 },
    Chatting(ConversationSeat),
}

impl ActionState {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionState::Idle => ActionKind::Idle,
            ActionState::Walking { .. } => ActionKind::Walking,
            ActionState::Chatting(_) => ActionKind::Chatting,
        }
    }
}

// ── AgentState ────────────────────────────────────────────────────────────────

/// One non-player character.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentState {
    pub id:                          AgentId,
    pub display_name:                String,
    pub position:                    Vec2,
    /// Radians in (−π, π].
    pub facing:                      f32,
    pub action:                      ActionState,
    /// When the current Idle/Walking dwell expires.  `SimTime::NEVER` while
    /// chatting.
    pub action_deadline:             SimTime,
    /// No new conversation may start until strictly after this time.
    pub conversation_cooldown_until: SimTime,
    pub emote:                       Option<EmoteHint>,
    pub emote_until:                 SimTime,
}

impl AgentState {
    /// A fresh idle agent whose first decision is due immediately.
    pub fn new(id: AgentId, display_name: impl Into<String>, position: Vec2, facing: f32) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            position,
            facing,
            action: ActionState::Idle,
            action_deadline: SimTime::ZERO,
            conversation_cooldown_until: SimTime::ZERO,
            emote: None,
            emote_until: SimTime::ZERO,
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn kind(&self) -> ActionKind {
        self.action.kind()
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self.action, ActionState::Idle)
    }

    #[inline]
    pub fn seat(&self) -> Option<&ConversationSeat> {
        match &self.action {
            ActionState::Chatting(seat) => Some(seat),
            _ => None,
        }
    }

    #[inline]
    pub fn seat_mut(&mut self) -> Option<&mut ConversationSeat> {
        match &mut self.action {
            ActionState::Chatting(seat) => Some(seat),
            _ => None,
        }
    }

    #[inline]
    pub fn partner(&self) -> Option<AgentId> {
        self.seat().map(|s| s.partner)
    }

    #[inline]
    pub fn is_speaking(&self) -> bool {
        self.seat().is_some_and(|s| s.speaking)
    }

    /// Idle and past the conversation cooldown.
    #[inline]
    pub fn can_converse(&self, now: SimTime) -> bool {
        self.is_idle() && self.conversation_cooldown_until.passed(now)
    }

    /// Emote to display at `now`, if one is still showing.
    #[inline]
    pub fn visible_emote(&self, now: SimTime) -> Option<EmoteHint> {
        self.emote.filter(|_| !self.emote_until.reached(now))
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Idle until `deadline`.
    pub fn idle_until(&mut self, deadline: SimTime) {
        self.action = ActionState::Idle;
        self.action_deadline = deadline;
    }

    pub fn walk_to(&mut self, target: Vec2, deadline: SimTime) {
        self.action = ActionState::Walking { target };
        self.action_deadline = deadline;
    }

    pub fn show_emote(&mut self, emote: EmoteHint, until: SimTime) {
        self.emote = Some(emote);
        self.emote_until = until;
    }

    /// Take a conversation seat; the dwell deadline freezes until it ends.
    pub fn sit_down(&mut self, seat: ConversationSeat) {
        self.action = ActionState::Chatting(seat);
        self.action_deadline = SimTime::NEVER;
    }

    /// Drop the conversation seat and go idle with a fresh decision due at
    /// `now`.  No-op for an agent that is not chatting.
    pub fn leave_conversation(&mut self, now: SimTime, cooldown_until: SimTime) {
        if self.seat().is_none() {
            return;
        }
        self.idle_until(now);
        self.conversation_cooldown_until = cooldown_until;
    }
}
