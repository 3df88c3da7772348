//! World-init spawning of the starting population.
//!
//! # Usage
//!
//! ```rust
//! use vt_agent::AgentRegistryBuilder;
//! use vt_core::{GridConfig, SimRng};
//! use vt_grid::TileCollisionGrid;
//!
//! let mut rng = SimRng::new(42);
//! let grid = TileCollisionGrid::generate(&GridConfig::default(), &mut rng).unwrap();
//! let registry = AgentRegistryBuilder::new(42)
//!     .count(12)
//!     .spawn(&grid, &mut rng)
//!     .unwrap();
//!
//! assert_eq!(registry.len(), 12);
//! assert!(registry.iter().all(|a| grid.is_walkable(a.position)));
//! ```

use std::f32::consts::PI;

use tracing::{debug, info};
use vt_core::{SimRng, Vec2, normalize_angle};
use vt_grid::TileCollisionGrid;

use crate::{AgentError, AgentRegistry, AgentResult, NamePool};

/// Rejection-sampling attempts before falling back to the first open tile.
const SPAWN_ATTEMPTS: usize = 64;

/// Pick a spawn point and facing for one agent.
///
/// Shared by world init and runtime spawning so both place agents the same way.
pub fn spawn_point(grid: &TileCollisionGrid, rng: &mut SimRng) -> AgentResult<(Vec2, f32)> {
    let position = grid
        .random_walkable(rng, SPAWN_ATTEMPTS)
        .or_else(|| grid.first_walkable())
        .ok_or(AgentError::NoWalkableTile)?;
    let facing = normalize_angle(rng.gen_range(-PI..=PI));
    Ok((position, facing))
}

/// Fluent builder for the initial [`AgentRegistry`].
pub struct AgentRegistryBuilder {
    seed:  u64,
    count: usize,
    names: NamePool,
}

impl AgentRegistryBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed, count: 0, names: NamePool::builtin() }
    }

    /// Number of agents to spawn.
    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Replace the built-in name pool.
    pub fn names(mut self, names: NamePool) -> Self {
        self.names = names;
        self
    }

    /// Place every agent on a random walkable tile with a random facing.
    ///
    /// All agents start Idle with their first decision due immediately.
    pub fn spawn(self, grid: &TileCollisionGrid, rng: &mut SimRng) -> AgentResult<AgentRegistry> {
        let mut registry = AgentRegistry::new(self.seed);
        for n in 0..self.count {
            let (position, facing) = spawn_point(grid, rng)?;
            let id = registry.insert(self.names.name_for(n), position, facing);
            debug!(agent = %id, x = position.x, z = position.z, "spawned");
        }
        info!(agents = registry.len(), "population spawned");
        Ok(registry)
    }
}
