//! The `BehaviorModel` trait, the extension point for agent logic.

use vt_agent::AgentState;
use vt_core::AgentRng;

use crate::{Intent, SimContext};

/// Pluggable agent behavior.
///
/// Called once per live agent per tick with a read-only [`SimContext`] and the
/// agent's own [`AgentRng`], so results are deterministic regardless of the
/// order (or thread) agents are evaluated on.
///
/// # Thread safety
///
/// With the `parallel` feature vt-sim calls `decide` from Rayon's pool, so
/// implementations must be `Send + Sync`.  Anything that varies per agent
/// belongs in [`AgentState`], not in the model.
pub trait BehaviorModel: Send + Sync + 'static {
    /// Return the intents `agent` wants applied this tick.  An empty `Vec`
    /// leaves the agent untouched.
    fn decide(
        &self,
        agent: &AgentState,
        ctx:   &SimContext<'_>,
        rng:   &mut AgentRng,
    ) -> Vec<Intent>;
}
