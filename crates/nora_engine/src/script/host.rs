//! Embedding-layer contract for script-defined behaviors

use crate::scene::ComponentContext;

/// Hook invoked once by the start pass
pub const START_HOOK: &str = "start";

/// Hook invoked every frame by the update pass
pub const UPDATE_HOOK: &str = "update";

/// Errors raised by script objects and the script host
#[derive(thiserror::Error, Debug)]
pub enum ScriptError {
    /// A hook was called that the object does not define
    #[error("{class} has no '{hook}' hook")]
    MissingHook {
        /// Script class name
        class: String,
        /// Requested hook
        hook: String,
    },

    /// The script raised while running a hook
    #[error("{class}: {message}")]
    Runtime {
        /// Script class name
        class: String,
        /// Raised message
        message: String,
    },

    /// Script source could not be loaded or instantiated
    #[error("failed to load scripts: {0}")]
    Load(String),
}

/// An object living in the scripting runtime
///
/// Implemented by whatever embeds the interpreter. The bridge only ever asks
/// whether a hook exists, calls it, and asks whether the object's class
/// satisfies a capability tag.
pub trait ScriptObject {
    /// Class name for diagnostics
    fn class_name(&self) -> &str;

    /// Whether the object defines `hook`
    fn has_hook(&self, hook: &str) -> bool;

    /// Run `hook` against the owning entity
    fn call_hook(&mut self, hook: &str, ctx: &mut ComponentContext<'_>) -> Result<(), ScriptError>;

    /// Whether the object's class is, or derives from, the class known as `tag`
    fn is_instance_of(&self, tag: &str) -> bool;
}
