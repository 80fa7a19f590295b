//! Tool configuration
//!
//! - `SyncConfig` - Paths, retention and editor choice for the engine
//! - `SyncConfigBuilder` - Fluent construction with `~` expansion

mod types;

pub use types::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_RETENTION_DAYS, SyncConfig, SyncConfigBuilder,
};
