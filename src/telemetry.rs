use crate::config::EngineConfig;
use crate::error::ConfigError;
use tracing::Level;

/// Installs the global fmt subscriber. Returns `false` when one was already
/// installed, which is harmless in tests and embedding applications.
pub fn init_logging(level: Level) -> bool {
    tracing_subscriber::fmt().with_max_level(level).try_init().is_ok()
}

pub fn init_from_config(config: &EngineConfig) -> Result<bool, ConfigError> {
    Ok(init_logging(config.level()?))
}
