//! `vt-sim` — tick loop orchestrator for the voxel_town agent core.
//!
//! # Tick loop
//!
//! ```text
//! each step(delta):
//!   ⓪ Clock    — advance SimClock by delta (negative / NaN rejected).
//!   ① Sweep    — seated agents whose partner is gone or not seated with
//!                them go Idle with the standard cooldown.
//!   ② Intents  — BehaviorModel::decide for every live agent against one
//!                read-only SimContext (parallel with the `parallel` feature).
//!   ③ Apply    — for each agent in ascending AgentId order:
//!                  own-state intents       → that agent only
//!                  StartConversation       → claim both seats or fall back
//!                  HandTurn                → both seats, one call
//!   ④ Observe  — TickSummary, plus a snapshot every output_interval_ticks.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the intent phase on Rayon's thread pool.          |
//! | `fx-hash`  | FxHash for the registry's id index.                    |
//! | `serde`    | Serde derives on configuration and snapshot types.     |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use vt_core::{SimConfig, WorldConfig};
//! use vt_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::town(SimConfig::default(), WorldConfig::default())?.build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod player;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickSummary};
pub use player::PlayerController;
pub use sim::Sim;
