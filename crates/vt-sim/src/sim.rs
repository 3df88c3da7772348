//! The `Sim` struct and its tick loop.

use tracing::{debug, info};
use vt_agent::builder::spawn_point;
use vt_agent::{ActionKind, AgentRegistry, AgentSnapshot, AgentState, DialogueLibrary, EmoteHint, NamePool};
use vt_behavior::{
    AgentController, BehaviorModel, ConversationCoordinator, Decision, Intent, SimContext, TickClaims,
};
use vt_core::{AgentId, AgentRng, SimClock, SimConfig, SimRng, SimTime, Tick, Vec2, WorldConfig};
use vt_grid::{ProximityIndex, StepResult, TileCollisionGrid};

use crate::{PlayerController, SimObserver, SimResult, TickSummary};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<B>` holds all simulation state and drives the three-phase tick loop:
///
/// 0. **Sweep**: any seated agent whose partner is gone or no longer seated
///    with it goes back to Idle with the standard cooldown.
/// 1. **Intent phase** (optionally parallel with the `parallel` feature):
///    call [`BehaviorModel::decide`] for every live agent against one shared
///    read-only [`SimContext`].
/// 2. **Apply phase** (sequential, ascending `AgentId`):
///    - `Move` / `Face` / `Blocked` / `Decide` → the agent's own fields.
///    - `StartConversation`  → claim both seats, or apply the fallback.
///    - `BeginSpeaking`      → the speaker's seat.
///    - `HandTurn`           → both seats in one call.
///    - `EndConversation` / `Celebrate` → leave the seat.
///
/// Cross-agent effects written in the apply phase are first seen by the other
/// agent's `decide` on the next tick, so results never depend on id order
/// beyond the documented claim tie-break.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<B: BehaviorModel> {
    /// Run configuration (seed, fixed delta, total ticks, …).
    pub config: SimConfig,

    /// World layout and agent tuning.
    pub world: WorldConfig,

    /// Simulated clock, advanced only by tick deltas.
    pub clock: SimClock,

    /// Static collision grid.
    pub grid: TileCollisionGrid,

    /// Live agents and their RNG streams.
    pub registry: AgentRegistry,

    pub library: DialogueLibrary,

    pub names: NamePool,

    /// The behavior model.  Called once per live agent per tick.
    pub behavior: B,

    /// Player avatar, if one is attached.
    pub player: Option<PlayerController>,

    /// World-level RNG, continued from grid generation and initial spawning.
    pub(crate) spawn_rng: SimRng,

    pub(crate) claims: TickClaims,

    #[cfg(feature = "parallel")]
    pub(crate) pool: Option<rayon::ThreadPool>,
}

impl<B: BehaviorModel> Sim<B> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()` at the fixed delta.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            agents = self.registry.len(),
            ticks = self.config.total_ticks,
            seed = self.config.seed,
            "simulation starting"
        );
        while self.clock.current_tick < self.config.end_tick() {
            self.step(self.config.fixed_delta_secs, observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        info!(tick = %self.clock.current_tick, now = %self.clock.now(), "simulation finished");
        Ok(())
    }

    /// Run exactly `n` ticks at the fixed delta (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(self.config.fixed_delta_secs, observer)?;
        }
        Ok(())
    }

    /// Advance one tick by `delta_secs`.  This is the entry point for a host
    /// render loop supplying its own frame delta.
    ///
    /// A negative or non-finite delta is rejected before anything changes.
    pub fn step<O: SimObserver>(&mut self, delta_secs: f64, observer: &mut O) -> SimResult<TickSummary> {
        let tick = self.clock.current_tick;
        self.clock.advance(delta_secs)?;
        observer.on_tick_start(tick);

        let summary = self.process_tick(tick, delta_secs);
        observer.on_tick_end(tick, &summary);

        let interval = self.config.output_interval_ticks;
        if interval > 0 && tick.0 % interval == 0 {
            observer.on_snapshot(tick, self.clock.now(), &self.snapshot());
        }
        Ok(summary)
    }

    /// Remove an agent, releasing its conversation partner (Idle, short
    /// cooldown) in the same call.
    ///
    /// Idempotent: returns `false` if `id` is not live.
    pub fn remove_agent(&mut self, id: AgentId) -> bool {
        let Some(removed) = self.registry.remove(id) else {
            return false;
        };
        let now = self.clock.now();
        let cooldown = now + self.world.agents.partner_lost_cooldown_secs;
        let released = ConversationCoordinator::release_partner(&mut self.registry, &removed, now, cooldown);
        info!(agent = %id, released = ?released, "agent removed");
        true
    }

    /// Add an agent at a random walkable position mid-run.
    pub fn spawn_agent(&mut self) -> SimResult<AgentId> {
        let (position, facing) = spawn_point(&self.grid, &mut self.spawn_rng)?;
        let name = self.names.name_for(self.registry.next_id().index());
        let id = self.registry.insert(name, position, facing);
        info!(agent = %id, x = position.x, z = position.z, "agent spawned");
        Ok(id)
    }

    /// Presentation-layer view of every agent, in ascending id order.
    pub fn snapshot(&self) -> Vec<AgentSnapshot> {
        let now = self.clock.now();
        self.registry
            .iter()
            .map(|a| AgentSnapshot::capture(a, now, &self.library))
            .collect()
    }

    /// Place (or move) the player avatar.
    pub fn attach_player(&mut self, position: Vec2) {
        self.player = Some(PlayerController::new(position));
    }

    pub fn detach_player(&mut self) {
        self.player = None;
    }

    /// Move the player along `input` for `dt` seconds.  Agents see the new
    /// position from the next tick.  `None` if no player is attached.
    pub fn drive_player(&mut self, input: Vec2, dt: f64) -> Option<StepResult> {
        let speed = self.world.agents.player_speed;
        self.player.as_mut().map(|p| p.drive(&self.grid, input, speed, dt))
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    #[inline]
    pub fn tick(&self) -> Tick {
        self.clock.current_tick
    }

    #[inline]
    pub fn agent(&self, id: AgentId) -> Option<&AgentState> {
        self.registry.get(id)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, tick: Tick, dt: f64) -> TickSummary {
        let now = self.clock.now();
        let tuning = &self.world.agents;
        let mut summary = TickSummary { tick, ..TickSummary::default() };

        // ── Phase 0: teardown sweep ───────────────────────────────────────
        //
        // After this, every seated agent's partner exists and points back.
        let reset = ConversationCoordinator::sweep(
            &mut self.registry,
            now,
            now + tuning.conversation_cooldown_secs,
        );
        summary.partner_resets = reset.len();
        summary.conversation_exits += reset.len();

        // ── Phase 1: intent phase (produce) ───────────────────────────────
        let proximity = ConversationCoordinator::eligibility_index(self.registry.agents(), now);
        let intents = self.compute_intents(tick, now, dt, &proximity);

        // ── Phase 2: apply phase (consume) ────────────────────────────────
        //
        // Intents arrive in registry order, which is ascending AgentId.
        self.claims.clear();
        for (agent, agent_intents) in intents {
            self.apply_intents(agent, agent_intents, now, &mut summary);
        }

        for a in self.registry.iter() {
            match a.kind() {
                ActionKind::Idle => summary.idle += 1,
                ActionKind::Walking => summary.walking += 1,
                ActionKind::Chatting => summary.chatting += 1,
            }
            summary.speaking += usize::from(a.is_speaking());
        }
        debug!(
            tick = %tick,
            idle = summary.idle,
            walking = summary.walking,
            chatting = summary.chatting,
            "tick complete"
        );
        summary
    }

    /// Call `decide` for every live agent.
    ///
    /// With the `parallel` Cargo feature the calls run on Rayon's thread
    /// pool; each agent only touches its own RNG, so the result is identical.
    fn compute_intents(
        &mut self,
        tick:      Tick,
        now:       SimTime,
        dt:        f64,
        proximity: &ProximityIndex,
    ) -> Vec<(AgentId, Vec<Intent>)> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let (agents, rngs) = self.registry.parts_mut();
        let behavior = &self.behavior;
        let ctx = SimContext {
            tick,
            now,
            dt,
            grid: &self.grid,
            agents,
            tuning: &self.world.agents,
            library: &self.library,
            proximity,
            player: self.player.as_ref().map(PlayerController::position),
        };

        #[cfg(not(feature = "parallel"))]
        {
            decide_all(behavior, &ctx, agents, rngs)
        }

        #[cfg(feature = "parallel")]
        {
            match &self.pool {
                Some(pool) => pool.install(|| decide_all(behavior, &ctx, agents, rngs)),
                None => decide_all(behavior, &ctx, agents, rngs),
            }
        }
    }

    /// Apply a single agent's intents during the sequential write phase.
    fn apply_intents(&mut self, agent: AgentId, intents: Vec<Intent>, now: SimTime, summary: &mut TickSummary) {
        // Seated as someone's partner earlier this tick: its own plans were
        // made for a state it is no longer in.
        if self.claims.is_claimed(agent) {
            return;
        }
        let tuning = &self.world.agents;

        for intent in intents {
            match intent {
                Intent::StartConversation { partner, script, fallback } => {
                    if ConversationCoordinator::try_pair(&mut self.registry, &mut self.claims, agent, partner, script) {
                        summary.conversations_started += 1;
                    } else if let (Some(decision), Some(a)) = (fallback, self.registry.get_mut(agent)) {
                        apply_decision(a, decision);
                    }
                }

                Intent::BeginSpeaking { deadline } => {
                    ConversationCoordinator::begin_speaking(&mut self.registry, agent, deadline);
                }

                Intent::HandTurn { to, new_line_index } => {
                    let cooldown = now + tuning.conversation_cooldown_secs;
                    if ConversationCoordinator::hand_turn(&mut self.registry, agent, to, new_line_index, now, cooldown) {
                        summary.handoffs += 1;
                    } else {
                        summary.conversation_exits += 1;
                    }
                }

                own => {
                    let Some(a) = self.registry.get_mut(agent) else {
                        return;
                    };
                    match own {
                        Intent::Move { position, facing } => {
                            a.position = position;
                            a.facing = facing;
                        }
                        Intent::Face(facing) => a.facing = facing,
                        Intent::Blocked { facing } => {
                            a.facing = facing;
                            a.idle_until(AgentController::blocked_until(now, tuning));
                            summary.blocked_moves += 1;
                        }
                        Intent::Decide(decision) => apply_decision(a, decision),
                        Intent::EndConversation { cooldown_until } => {
                            debug!(agent = %agent, "conversation ended");
                            a.leave_conversation(now, cooldown_until);
                            summary.conversation_exits += 1;
                        }
                        Intent::Celebrate { cooldown_until, emote_until } => {
                            debug!(agent = %agent, "conversation finished");
                            a.leave_conversation(now, cooldown_until);
                            a.show_emote(EmoteHint::Celebrate, emote_until);
                            summary.conversation_exits += 1;
                        }
                        Intent::StartConversation { .. }
                        | Intent::BeginSpeaking { .. }
                        | Intent::HandTurn { .. } => {}
                    }
                }
            }
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn decide_all<B: BehaviorModel>(
    behavior: &B,
    ctx:      &SimContext<'_>,
    agents:   &[AgentState],
    rngs:     &mut [AgentRng],
) -> Vec<(AgentId, Vec<Intent>)> {
    agents
        .iter()
        .zip(rngs.iter_mut())
        .map(|(agent, rng)| (agent.id, behavior.decide(agent, ctx, rng)))
        .collect()
}

#[cfg(feature = "parallel")]
fn decide_all<B: BehaviorModel>(
    behavior: &B,
    ctx:      &SimContext<'_>,
    agents:   &[AgentState],
    rngs:     &mut [AgentRng],
) -> Vec<(AgentId, Vec<Intent>)> {
    use rayon::prelude::*;

    agents
        .par_iter()
        .zip(rngs.par_iter_mut())
        .map(|(agent, rng)| (agent.id, behavior.decide(agent, ctx, rng)))
        .collect()
}

fn apply_decision(agent: &mut AgentState, decision: Decision) {
    match decision {
        Decision::Emote { emote, deadline } => {
            agent.idle_until(deadline);
            agent.show_emote(emote, deadline);
        }
        Decision::Walk { target, deadline } => agent.walk_to(target, deadline),
        Decision::Rest { deadline } => agent.idle_until(deadline),
    }
}
