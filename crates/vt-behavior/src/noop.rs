//! A no-op behavior model: agents never produce intents.

use vt_agent::AgentState;
use vt_core::AgentRng;

use crate::{BehaviorModel, Intent, SimContext};

/// A [`BehaviorModel`] that always returns an empty intent list.
///
/// Agents stay frozen where they spawned, which makes it a handy baseline
/// for tests that drive state by hand.
pub struct NoopBehavior;

impl BehaviorModel for NoopBehavior {
    fn decide(
        &self,
        _agent: &AgentState,
        _ctx:   &SimContext<'_>,
        _rng:   &mut AgentRng,
    ) -> Vec<Intent> {
        vec![]
    }
}
