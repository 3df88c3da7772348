//! `ConversationCoordinator` — pairing and turn-taking between two agents.
//!
//! # Two halves
//!
//! The *propose* half runs in the intent phase.  It reads pre-tick state
//! only and turns it into [`Intent`]s: who wants to talk to whom, who starts
//! speaking, and who passes the turn.
//!
//! The *resolve* half runs in the apply phase and is the only code that writes
//! to two agents at once.  Pairing and handoff each touch both seats in one
//! call, so there is never a tick where a session has two speakers or a
//! half-passed turn.
//!
//! # Session lifecycle
//!
//! ```text
//!  Idle ──try_pair──▶ Chatting ──Celebrate / EndConversation──▶ Idle
//!                        │
//!                        └── partner gone or not seated with us ──▶ Idle (sweep)
//! ```
//!
//! A conversation is never stored on its own; it is the pair of
//! [`ConversationSeat`]s pointing at each other.

use tracing::{debug, info};
use vt_agent::{AgentRegistry, AgentState, ConversationSeat};
use vt_core::{AgentId, AgentRng, PairingPolicy, ScriptId, SimTime};
use vt_grid::ProximityIndex;

use crate::{Intent, SimContext};

#[cfg(feature = "fx-hash")]
type ClaimSet = rustc_hash::FxHashSet<AgentId>;
#[cfg(not(feature = "fx-hash"))]
type ClaimSet = std::collections::HashSet<AgentId>;

/// Agents already involved in a pairing attempt during the current apply
/// phase.
///
/// An agent enters the book when it is taken as a partner, or when it
/// attempts a claim of its own (whether or not that succeeds).  Booked agents
/// cannot be claimed again this tick, and the apply phase skips the remaining
/// intents of an agent that was taken as a partner.
#[derive(Default, Debug)]
pub struct TickClaims {
    claimed: ClaimSet,
}

impl TickClaims {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_claimed(&self, id: AgentId) -> bool {
        self.claimed.contains(&id)
    }

    pub fn clear(&mut self) {
        self.claimed.clear();
    }
}

pub struct ConversationCoordinator;

impl ConversationCoordinator {
    // ── Propose (intent phase) ────────────────────────────────────────────

    /// Index every agent that may start a conversation at `now`.
    pub fn eligibility_index(agents: &[AgentState], now: SimTime) -> ProximityIndex {
        ProximityIndex::build(
            agents
                .iter()
                .filter(|a| a.can_converse(now))
                .map(|a| (a.id, a.position)),
        )
    }

    /// Partner `agent` would approach under the configured policy.
    pub fn find_partner(agent: &AgentState, ctx: &SimContext<'_>) -> Option<AgentId> {
        let hits = ctx
            .proximity
            .within(agent.position, ctx.tuning.interaction_radius, agent.id);
        match ctx.tuning.pairing_policy {
            PairingPolicy::FirstMatch => hits.first().map(|&(id, _)| id),
            PairingPolicy::Nearest => hits
                .iter()
                .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
                .map(|&(id, _)| id),
        }
    }

    /// Partner and script for an eligible idle agent, or `None` if nobody
    /// is in range.
    pub fn propose(
        agent: &AgentState,
        ctx:   &SimContext<'_>,
        rng:   &mut AgentRng,
    ) -> Option<(AgentId, ScriptId)> {
        if ctx.library.is_empty() {
            return None;
        }
        let partner = Self::find_partner(agent, ctx)?;
        let script = ScriptId(rng.gen_range(0..ctx.library.len()) as u16);
        Some((partner, script))
    }

    /// One tick of a seated agent: face the partner, then speak, pass the
    /// turn, or leave.
    pub fn chatting(agent: &AgentState, seat: &ConversationSeat, ctx: &SimContext<'_>) -> Vec<Intent> {
        let t = ctx.tuning;
        let mut intents = Vec::with_capacity(2);
        if let Some(partner) = ctx.agent(seat.partner) {
            intents.push(Intent::Face(agent.position.heading_to(partner.position)));
        }

        let script_len = ctx.library.script_len(seat.script);
        if seat.speaking {
            if seat.speak_deadline.passed(ctx.now) {
                // Cutoff is two lines before the end: the last speaker's
                // partner is left seated and released by the sweep.
                if seat.line_index >= script_len.saturating_sub(2) {
                    intents.push(Intent::Celebrate {
                        cooldown_until: ctx.now + t.celebration_cooldown_secs,
                        emote_until:    ctx.now + t.celebration_emote_secs,
                    });
                } else {
                    intents.push(Intent::HandTurn {
                        to:             seat.partner,
                        new_line_index: seat.line_index + 1,
                    });
                }
            }
        } else if seat.my_turn {
            if seat.line_index < script_len {
                intents.push(Intent::BeginSpeaking { deadline: ctx.now + t.speak_secs });
            } else {
                intents.push(Intent::EndConversation {
                    cooldown_until: ctx.now + t.conversation_cooldown_secs,
                });
            }
        }
        intents
    }

    // ── Resolve (apply phase) ─────────────────────────────────────────────

    /// Seat `initiator` and `partner` in a conversation on `script`.
    ///
    /// Succeeds only if both are still Idle and neither has been booked this
    /// tick.  The initiator is booked either way.
    pub fn try_pair(
        registry:  &mut AgentRegistry,
        claims:    &mut TickClaims,
        initiator: AgentId,
        partner:   AgentId,
        script:    ScriptId,
    ) -> bool {
        let free = !claims.is_claimed(initiator) && !claims.is_claimed(partner);
        claims.claimed.insert(initiator);
        if !free {
            return false;
        }
        let Some((a, b)) = registry.get_pair_mut(initiator, partner) else {
            return false;
        };
        if !a.is_idle() || !b.is_idle() {
            return false;
        }
        a.sit_down(ConversationSeat::initiator(partner, script));
        b.sit_down(ConversationSeat::responder(initiator, script));
        claims.claimed.insert(partner);
        info!(initiator = %initiator, partner = %partner, script = script.0, "conversation started");
        true
    }

    /// Mark `speaker` as speaking until `deadline`.
    pub fn begin_speaking(registry: &mut AgentRegistry, speaker: AgentId, deadline: SimTime) {
        if let Some(seat) = registry.get_mut(speaker).and_then(AgentState::seat_mut) {
            seat.speaking = true;
            seat.speak_deadline = deadline;
        }
    }

    /// Pass the turn from `from` to `to`, moving `to` onto `new_line_index`.
    ///
    /// Both seats are written in this one call.  If the two agents are no
    /// longer seated with each other, `from` leaves the conversation with
    /// `cooldown_until` instead and `false` is returned.
    pub fn hand_turn(
        registry:       &mut AgentRegistry,
        from:           AgentId,
        to:             AgentId,
        new_line_index: usize,
        now:            SimTime,
        cooldown_until: SimTime,
    ) -> bool {
        if let Some((speaker, listener)) = registry.get_pair_mut(from, to) {
            let seated = speaker.partner() == Some(to) && listener.partner() == Some(from);
            if let (true, Some(s), Some(l)) = (seated, speaker.seat_mut(), listener.seat_mut()) {
                s.speaking = false;
                s.my_turn = false;
                l.my_turn = true;
                l.line_index = new_line_index;
                debug!(from = %from, to = %to, line = new_line_index, "turn handed over");
                return true;
            }
        }
        if let Some(speaker) = registry.get_mut(from) {
            speaker.leave_conversation(now, cooldown_until);
        }
        debug!(agent = %from, partner = %to, "partner vanished during handoff");
        false
    }

    /// Reset every seated agent whose partner is gone or no longer seated
    /// with it.  Runs at the start of each tick; returns the reset agents.
    pub fn sweep(registry: &mut AgentRegistry, now: SimTime, cooldown_until: SimTime) -> Vec<AgentId> {
        let stale: Vec<AgentId> = registry
            .iter()
            .filter_map(|a| {
                let partner = a.partner()?;
                let points_back = registry.get(partner).and_then(AgentState::partner) == Some(a.id);
                (!points_back).then_some(a.id)
            })
            .collect();

        for &id in &stale {
            if let Some(agent) = registry.get_mut(id) {
                debug!(agent = %id, partner = ?agent.partner(), "partner gone, leaving conversation");
                agent.leave_conversation(now, cooldown_until);
            }
        }
        stale
    }

    /// Release the partner of an agent that is being removed.  Returns the
    /// released partner, if there was one still seated with `removed`.
    pub fn release_partner(
        registry:       &mut AgentRegistry,
        removed:        &AgentState,
        now:            SimTime,
        cooldown_until: SimTime,
    ) -> Option<AgentId> {
        let partner_id = removed.partner()?;
        let partner = registry.get_mut(partner_id)?;
        if partner.partner() != Some(removed.id) {
            return None;
        }
        partner.leave_conversation(now, cooldown_until);
        debug!(agent = %partner_id, removed = %removed.id, "released from conversation");
        Some(partner_id)
    }
}
