//! `vt-core` — foundational types for the `voxel_town` agent simulation core.
//!
//! This crate is a dependency of every other `vt-*` crate.  It has no `vt-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`ids`]      | `AgentId`, `ScriptId`                                     |
//! | [`geom`]     | `Vec2` ground-plane point, `normalize_angle`              |
//! | [`time`]     | `Tick`, `SimTime`, `SimClock`, `SimConfig`                |
//! | [`rng`]      | `AgentRng` (per-agent), `SimRng` (world generation)       |
//! | [`config`]   | `WorldConfig`, `GridConfig`, `AgentTuning`, policies      |
//! | [`error`]    | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types so      |
//! |         | configuration can be loaded from JSON.                     |

pub mod config;
pub mod error;
pub mod geom;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AgentTuning, DecisionWeights, DwellRange, GridConfig, PairingPolicy, WorldConfig};
pub use error::{CoreError, CoreResult};
pub use geom::{Vec2, normalize_angle};
pub use ids::{AgentId, ScriptId};
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, SimConfig, SimTime, Tick};
