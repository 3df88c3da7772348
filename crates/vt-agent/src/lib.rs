//! `vt-agent` — per-character state and the live agent collection.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`state`]    | `AgentState`, `ActionState`, `ConversationSeat`, `EmoteHint` |
//! | [`registry`] | `AgentRegistry` — stable-order storage + per-agent RNGs    |
//! | [`builder`]  | `AgentRegistryBuilder` — world-init spawning               |
//! | [`dialogue`] | `DialogueLibrary`, `NamePool` (static content)             |
//! | [`snapshot`] | `AgentSnapshot` — read-only view for the presentation layer |
//! | [`error`]    | `AgentError`, `AgentResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | FxHash for the `AgentId` → slot lookup.                    |
//! | `serde`   | Derives `Serialize`/`Deserialize` on public types.         |

pub mod builder;
pub mod dialogue;
pub mod error;
pub mod registry;
pub mod snapshot;
pub mod state;

#[cfg(test)]
mod tests;

pub use builder::AgentRegistryBuilder;
pub use dialogue::{DialogueLibrary, NamePool};
pub use error::{AgentError, AgentResult};
pub use registry::AgentRegistry;
pub use snapshot::AgentSnapshot;
pub use state::{ActionKind, ActionState, AgentState, ConversationSeat, EmoteHint};
