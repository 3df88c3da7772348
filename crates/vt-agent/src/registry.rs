//! `AgentRegistry` — the live agent collection.
//!
//! # Layout
//!
//! States and RNGs are kept in two parallel `Vec`s in insertion order.  The
//! split lets the intent phase borrow every state immutably while each agent
//! mutates only its own RNG (see [`AgentRegistry::parts_mut`]).
//!
//! Ids are handed out monotonically and never reused, so insertion order,
//! slot order, and ascending `AgentId` order are the same thing.  Removal
//! preserves that order.

use vt_core::{AgentId, AgentRng, Vec2};

use crate::AgentState;

#[cfg(feature = "fx-hash")]
type SlotMap = rustc_hash::FxHashMap<AgentId, usize>;
#[cfg(not(feature = "fx-hash"))]
type SlotMap = std::collections::HashMap<AgentId, usize>;

pub struct AgentRegistry {
    agents:  Vec<AgentState>,
    rngs:    Vec<AgentRng>,
    slots:   SlotMap,
    next_id: u32,
    seed:    u64,
}

impl AgentRegistry {
    /// An empty registry whose agents draw from streams derived from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            agents:  Vec::new(),
            rngs:    Vec::new(),
            slots:   SlotMap::default(),
            next_id: 0,
            seed,
        }
    }

    /// Add a fresh idle agent and return its id.
    pub fn insert(&mut self, display_name: impl Into<String>, position: Vec2, facing: f32) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        self.slots.insert(id, self.agents.len());
        self.agents.push(AgentState::new(id, display_name, position, facing));
        self.rngs.push(AgentRng::new(self.seed, id));
        id
    }

    /// Remove an agent.  Returns its final state, or `None` if the id was
    /// never issued or has already been removed.
    pub fn remove(&mut self, id: AgentId) -> Option<AgentState> {
        let slot = self.slots.remove(&id)?;
        let state = self.agents.remove(slot);
        self.rngs.remove(slot);
        for s in self.slots.values_mut() {
            if *s > slot {
                *s -= 1;
            }
        }
        Some(state)
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: AgentId) -> bool {
        self.slots.contains_key(&id)
    }

    #[inline]
    pub fn slot_of(&self, id: AgentId) -> Option<usize> {
        self.slots.get(&id).copied()
    }

    pub fn get(&self, id: AgentId) -> Option<&AgentState> {
        self.slot_of(id).map(|s| &self.agents[s])
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut AgentState> {
        self.slot_of(id).map(|s| &mut self.agents[s])
    }

    /// Mutable access to two distinct agents at once.  `None` if either is
    /// missing or `a == b`.
    pub fn get_pair_mut(&mut self, a: AgentId, b: AgentId) -> Option<(&mut AgentState, &mut AgentState)> {
        let sa = self.slot_of(a)?;
        let sb = self.slot_of(b)?;
        if sa == sb {
            return None;
        }
        if sa < sb {
            let (lo, hi) = self.agents.split_at_mut(sb);
            Some((&mut lo[sa], &mut hi[0]))
        } else {
            let (lo, hi) = self.agents.split_at_mut(sa);
            Some((&mut hi[0], &mut lo[sb]))
        }
    }

    /// Agents in ascending id order.
    pub fn iter(&self) -> std::slice::Iter<'_, AgentState> {
        self.agents.iter()
    }

    pub fn ids(&self) -> Vec<AgentId> {
        self.agents.iter().map(|a| a.id).collect()
    }

    #[inline]
    pub fn agents(&self) -> &[AgentState] {
        &self.agents
    }

    /// Shared states alongside exclusive RNGs, slot-aligned.
    #[inline]
    pub fn parts_mut(&mut self) -> (&[AgentState], &mut [AgentRng]) {
        (&self.agents, &mut self.rngs)
    }

    /// RNG stream of one agent.
    pub fn rng_mut(&mut self, id: AgentId) -> Option<&mut AgentRng> {
        self.slot_of(id).map(|s| &mut self.rngs[s])
    }

    /// Id the next `insert` will hand out.
    #[inline]
    pub fn next_id(&self) -> AgentId {
        AgentId(self.next_id)
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
