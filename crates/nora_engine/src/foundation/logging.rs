//! Logging setup

pub use log::{debug, error, info, trace, warn};

/// Log target used for failures raised inside the embedded scripting layer
///
/// Keeps script bugs separable from native ones (`RUST_LOG=nora::script=debug`).
pub const SCRIPT_TARGET: &str = "nora::script";

/// Initialize the logging system
///
/// `RUST_LOG` wins when set; otherwise `default_level` (e.g. `"info"`) applies.
/// Safe to call more than once: later calls are ignored.
pub fn init(default_level: &str) {
    let env = env_logger::Env::default().default_filter_or(default_level);
    let _ = env_logger::Builder::from_env(env).try_init();
}
