//! `TownBehavior` — the stock model combining the decision controller and the
//! conversation coordinator.

use vt_agent::{ActionState, AgentState};
use vt_core::{AgentRng, AgentTuning};

use crate::{AgentController, BehaviorModel, BehaviorResult, ConversationCoordinator, Intent, SimContext};

/// Idle agents try to pair first and fall back to the decision roll; walking
/// agents move; seated agents follow their conversation.
pub struct TownBehavior {
    controller: AgentController,
}

impl TownBehavior {
    pub fn new(tuning: &AgentTuning) -> BehaviorResult<Self> {
        Ok(Self { controller: AgentController::new(tuning)? })
    }
}

impl BehaviorModel for TownBehavior {
    fn decide(&self, agent: &AgentState, ctx: &SimContext<'_>, rng: &mut AgentRng) -> Vec<Intent> {
        match &agent.action {
            ActionState::Idle => {
                let proposal = if agent.can_converse(ctx.now) {
                    ConversationCoordinator::propose(agent, ctx, rng)
                } else {
                    None
                };
                if let Some((partner, script)) = proposal {
                    let fallback = agent
                        .action_deadline
                        .reached(ctx.now)
                        .then(|| self.controller.roll(ctx, rng));
                    return vec![Intent::StartConversation { partner, script, fallback }];
                }
                self.controller.idle(agent, ctx, rng)
            }
            ActionState::Walking { target } => self.controller.walking(agent, *target, ctx),
            ActionState::Chatting(seat) => ConversationCoordinator::chatting(agent, seat, ctx),
        }
    }
}
