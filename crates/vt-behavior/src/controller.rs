//! `AgentController` — the Idle / Walking half of the decision state machine.
//!
//! Chatting is owned by [`ConversationCoordinator`][crate::ConversationCoordinator];
//! this module only decides what an agent does when it is not in a
//! conversation, and how a walking agent moves.

use rand::distributions::WeightedIndex;
use tracing::trace;
use vt_agent::{AgentState, EmoteHint};
use vt_core::{AgentRng, AgentTuning, SimTime, Vec2, normalize_angle};
use vt_grid::{MovementSolver, steer};

use crate::{BehaviorResult, Decision, Intent, SimContext};

/// Heading error below which an idle agent stops turning towards the player.
const FACE_EPSILON: f32 = 1e-3;

/// Slot order of [`vt_core::DecisionWeights::as_array`].
const ROLL_EMOTE: usize = 0;
const ROLL_WALK: usize = 1;

pub struct AgentController {
    weights: WeightedIndex<f64>,
}

impl AgentController {
    /// Prepare the decision table.  Fails if the weights are negative or all
    /// zero.
    pub fn new(tuning: &AgentTuning) -> BehaviorResult<Self> {
        let weights = WeightedIndex::new(tuning.decision_weights.as_array())?;
        Ok(Self { weights })
    }

    /// Roll the emote / walk / rest outcome for an agent whose dwell ran out.
    pub fn roll(&self, ctx: &SimContext<'_>, rng: &mut AgentRng) -> Decision {
        let t = ctx.tuning;
        match rng.pick_weighted(&self.weights) {
            ROLL_EMOTE => Decision::Emote {
                emote:    EmoteHint::Wave,
                deadline: ctx.now + t.emote_dwell_secs,
            },
            ROLL_WALK => {
                let hx = ctx.grid.half_extent_x();
                let hz = ctx.grid.half_extent_z();
                let target = Vec2::new(rng.gen_range(-hx..=hx), rng.gen_range(-hz..=hz))
                    .clamp_to(hx, hz);
                Decision::Walk {
                    target,
                    deadline: ctx.now + rng.between(t.walk_dwell.min_secs, t.walk_dwell.max_secs),
                }
            }
            _ => Decision::Rest {
                deadline: ctx.now + rng.between(t.idle_dwell.min_secs, t.idle_dwell.max_secs),
            },
        }
    }

    /// Idle agent that did not start a conversation this tick.
    pub fn idle(&self, agent: &AgentState, ctx: &SimContext<'_>, rng: &mut AgentRng) -> Vec<Intent> {
        if agent.action_deadline.reached(ctx.now) {
            return vec![Intent::Decide(self.roll(ctx, rng))];
        }
        // Dwelling: turn towards a nearby player.
        match ctx.player {
            Some(p) if p.distance(agent.position) <= ctx.tuning.interaction_radius => {
                let desired = agent.position.heading_to(p);
                if normalize_angle(desired - agent.facing).abs() > FACE_EPSILON {
                    vec![Intent::Face(steer(agent.facing, desired, ctx.tuning.turn_gain))]
                } else {
                    vec![]
                }
            }
            _ => vec![],
        }
    }

    /// One walking tick: steer, step, then check arrival and the dwell bound.
    ///
    /// Arrival and dwell expiry end the walk with an Idle dwell that is
    /// already due, so the next tick tries pairing before rolling again.
    pub fn walking(&self, agent: &AgentState, target: Vec2, ctx: &SimContext<'_>) -> Vec<Intent> {
        let t = ctx.tuning;
        if agent.position.distance(target) < t.arrival_threshold {
            return vec![Self::stop_walking(ctx)];
        }

        let facing = steer(agent.facing, agent.position.heading_to(target), t.turn_gain);
        let speed = t.walk_speed * ctx.dt as f32;
        let step = MovementSolver::new(ctx.grid).step(agent.position, facing, speed);
        if step.blocked {
            trace!(agent = %agent.id, x = agent.position.x, z = agent.position.z, "step blocked");
            return vec![Intent::Blocked { facing }];
        }

        let mut intents = vec![Intent::Move { position: step.next, facing }];
        if step.next.distance(target) < t.arrival_threshold || agent.action_deadline.reached(ctx.now) {
            intents.push(Self::stop_walking(ctx));
        }
        intents
    }

    fn stop_walking(ctx: &SimContext<'_>) -> Intent {
        Intent::Decide(Decision::Rest { deadline: ctx.now })
    }

    /// Deadline after a blocked step.
    pub fn blocked_until(now: SimTime, tuning: &AgentTuning) -> SimTime {
        now + tuning.blocked_backoff_secs
    }
}
