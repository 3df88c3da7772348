//! `vt-behavior` — what agents decide to do each tick.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                      |
//! |------------------|---------------------------------------------------------------|
//! | [`intent`]       | `Intent`, `Decision`                                          |
//! | [`context`]      | `SimContext<'a>` — read-only tick snapshot shared by all agents |
//! | [`model`]        | `BehaviorModel` trait                                         |
//! | [`controller`]   | `AgentController` — Idle / Walking decisions and movement     |
//! | [`conversation`] | `ConversationCoordinator` — pairing, turns, teardown          |
//! | [`town`]         | `TownBehavior` — the stock model wiring both together         |
//! | [`noop`]         | `NoopBehavior` — never produces intents                       |
//! | [`error`]        | `BehaviorError`, `BehaviorResult<T>`                          |
//!
//! # Design notes
//!
//! The tick loop in vt-sim is split in two:
//!
//! 1. **Intent phase**: `BehaviorModel::decide` is called for every live
//!    agent against the same `&SimContext`.  Nothing is mutated, so the order
//!    agents are evaluated in cannot matter.
//!
//! 2. **Apply phase** (sequential, ascending `AgentId`): the collected
//!    intents mutate the registry.  Cross-agent writes (pairing, turn
//!    handoff) go through `ConversationCoordinator`, which updates both seats
//!    in one call.
//!
//! A handoff written in tick N is therefore first seen by the partner's
//! `decide` in tick N+1, whatever the two agents' ids are.

pub mod context;
pub mod controller;
pub mod conversation;
pub mod error;
pub mod intent;
pub mod model;
pub mod noop;
pub mod town;


pub use context::SimContext;
pub use controller::AgentController;
pub use conversation::{ConversationCoordinator, TickClaims};
pub use error::{BehaviorError, BehaviorResult};
pub use intent::{Decision, Intent};
pub use model::BehaviorModel;
pub use noop::NoopBehavior;
pub use town::TownBehavior;
