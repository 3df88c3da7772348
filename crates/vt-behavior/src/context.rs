//! Read-only simulation state passed to every behavior callback.

use vt_agent::{AgentState, DialogueLibrary};
use vt_core::{AgentId, AgentTuning, SimTime, Tick, Vec2};
use vt_grid::{ProximityIndex, TileCollisionGrid};

/// A read-only snapshot of the world passed to every
/// [`BehaviorModel`][crate::BehaviorModel] call.
///
/// Built once per tick by vt-sim after the clock advance and the teardown
/// sweep, and shared immutably by every agent during the intent phase.
/// Every agent therefore sees the same pre-tick state regardless of
/// evaluation order.
pub struct SimContext<'a> {
    pub tick:      Tick,
    /// Clock reading after this tick's advance.
    pub now:       SimTime,
    /// Seconds covered by this tick.
    pub dt:        f64,
    pub grid:      &'a TileCollisionGrid,
    /// Every live agent in ascending id order.
    pub agents:    &'a [AgentState],
    pub tuning:    &'a AgentTuning,
    pub library:   &'a DialogueLibrary,
    /// Agents eligible to start a conversation this tick.
    pub proximity: &'a ProximityIndex,
    /// Player position, when a player is attached.
    pub player:    Option<Vec2>,
}

impl<'a> SimContext<'a> {
    /// Look up another agent by id.
    ///
    /// `agents` is sorted by id (ids are issued monotonically and removal
    /// preserves order), so this is a binary search.
    pub fn agent(&self, id: AgentId) -> Option<&'a AgentState> {
        self.agents
            .binary_search_by_key(&id, |a| a.id)
            .ok()
            .map(|i| &self.agents[i])
    }
}
