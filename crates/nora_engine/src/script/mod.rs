//! Scripting layer
//!
//! - **host**: the [`ScriptObject`] contract an embedded interpreter implements
//! - **bridge**: [`ScriptComponent`], which lets script objects live on entities
//! - **behaviour**: a declarative RON script host used by the CLI and tests

mod behaviour;
mod bridge;
mod host;

pub use behaviour::{Action, Behaviour, BehaviourLibrary, ClassDef};
pub use bridge::{BridgeState, ScriptComponent};
pub use host::{ScriptError, ScriptObject, START_HOOK, UPDATE_HOOK};
