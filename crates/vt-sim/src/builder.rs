//! Fluent builder for constructing a [`Sim`].

use tracing::info;
use vt_agent::{AgentRegistryBuilder, DialogueLibrary, NamePool};
use vt_behavior::{BehaviorModel, TickClaims, TownBehavior};
use vt_core::{SimClock, SimConfig, SimRng, Vec2, WorldConfig};
use vt_grid::TileCollisionGrid;

use crate::{PlayerController, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<B>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: seed, fixed delta, total ticks, …
/// - [`WorldConfig`]: grid layout, agent tuning, population size
/// - `B: BehaviorModel`: the behavior implementation
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                                    |
/// |--------------------|--------------------------------------------|
/// | `.grid(g)`         | Generated from `world.grid` and the seed   |
/// | `.library(l)`      | `DialogueLibrary::builtin()`               |
/// | `.names(n)`        | `NamePool::builtin()`                      |
/// | `.player(pos)`     | No player                                  |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::town(SimConfig::default(), WorldConfig::default())?
///     .player(Vec2::ZERO)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<B: BehaviorModel> {
    config:   SimConfig,
    world:    WorldConfig,
    behavior: B,
    grid:     Option<TileCollisionGrid>,
    library:  Option<DialogueLibrary>,
    names:    Option<NamePool>,
    player:   Option<Vec2>,
}

impl SimBuilder<TownBehavior> {
    /// Builder using the stock [`TownBehavior`] tuned from `world.agents`.
    pub fn town(config: SimConfig, world: WorldConfig) -> SimResult<Self> {
        let behavior = TownBehavior::new(&world.agents)?;
        Ok(Self::new(config, world, behavior))
    }
}

impl<B: BehaviorModel> SimBuilder<B> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, world: WorldConfig, behavior: B) -> Self {
        Self {
            config,
            world,
            behavior,
            grid:    None,
            library: None,
            names:   None,
            player:  None,
        }
    }

    /// Use a hand-built grid instead of generating one.
    pub fn grid(mut self, grid: TileCollisionGrid) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn library(mut self, library: DialogueLibrary) -> Self {
        self.library = Some(library);
        self
    }

    pub fn names(mut self, names: NamePool) -> Self {
        self.names = Some(names);
        self
    }

    /// Attach a player at `position`.  The position must be walkable.
    pub fn player(mut self, position: Vec2) -> Self {
        self.player = Some(position);
        self
    }

    /// Validate inputs, generate the grid, spawn the population, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<B>> {
        self.config.validate()?;
        self.world.validate()?;

        // Grid generation and spawning share one stream so a seed fully
        // determines the starting world.
        let mut rng = SimRng::new(self.config.seed);
        let grid = match self.grid {
            Some(g) => g,
            None => TileCollisionGrid::generate(&self.world.grid, &mut rng)?,
        };

        if let Some(p) = self.player {
            if !grid.is_walkable(p) {
                return Err(SimError::Config(format!(
                    "player position ({}, {}) is not walkable",
                    p.x, p.z
                )));
            }
        }

        let names = self.names.unwrap_or_default();
        let registry = AgentRegistryBuilder::new(self.config.seed)
            .count(self.world.agent_count)
            .names(names.clone())
            .spawn(&grid, &mut rng)?;

        #[cfg(feature = "parallel")]
        let pool = match self.config.num_threads {
            Some(n) => Some(rayon::ThreadPoolBuilder::new().num_threads(n).build()?),
            None => None,
        };

        info!(
            width = grid.width(),
            depth = grid.depth(),
            agents = registry.len(),
            "simulation built"
        );

        Ok(Sim {
            clock:     SimClock::new(),
            config:    self.config,
            world:     self.world,
            grid,
            registry,
            library:   self.library.unwrap_or_default(),
            names,
            behavior:  self.behavior,
            player:    self.player.map(PlayerController::new),
            spawn_rng: rng,
            claims:    TickClaims::new(),
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
