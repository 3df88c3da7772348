//! `vt-grid` — static collision grid, movement validation, and proximity.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`grid`]      | `TileKind`, `TileCollisionGrid` (procedural + ASCII)      |
//! | [`movement`]  | `MovementSolver`, `StepResult`, `steer`                   |
//! | [`proximity`] | `ProximityIndex` — R-tree over agent positions            |
//! | [`error`]     | `GridError`, `GridResult<T>`                              |
//!
//! # Movement model
//!
//! There is no pathfinding.  A step is a straight move along the current
//! heading; if the destination tile is a building (or off the map) the step
//! is rejected whole and the caller decides what to do next.

pub mod error;
pub mod grid;
pub mod movement;
pub mod proximity;


pub use error::{GridError, GridResult};
pub use grid::{TileCollisionGrid, TileKind};
pub use movement::{MovementSolver, StepResult, steer};
pub use proximity::ProximityIndex;
