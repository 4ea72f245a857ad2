use crate::error::ConfigError;
use crate::types::Category;
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::Level;

pub const ENV_PREFIX: &str = "PHOTO_CRITIQUE";

/// Engine tuning. Every field has a default, so a partial file or a handful
/// of environment variables is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub log_level: String,
    /// Most recent measurements considered when classifying a trend.
    pub trend_window: usize,
    /// Standard deviations from the rest of a batch before a photo is flagged.
    pub outlier_threshold: f64,
    pub default_focus: Category,
    pub skill_target_score: f64,
    /// Critiques needed before the dashboard celebrates recent milestones.
    pub celebration_photo_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            trend_window: 10,
            outlier_threshold: 2.0,
            default_focus: Category::Composition,
            skill_target_score: 0.8,
            celebration_photo_count: 20,
        }
    }
}

impl EngineConfig {
    /// Loads from an optional file, then `PHOTO_CRITIQUE__*` environment
    /// overrides, and validates the result.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        Self::from_builder(builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        ))
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: EngineConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.level()?;

        if self.trend_window < 3 {
            return Err(ConfigError::Invalid(
                "Trend window must hold at least 3 measurements".to_string(),
            ));
        }

        if self.outlier_threshold.is_nan() || self.outlier_threshold <= 0.0 {
            return Err(ConfigError::Invalid(
                "Outlier threshold must be positive".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.skill_target_score) {
            return Err(ConfigError::Invalid(
                "Skill target score must be between 0.0 and 1.0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn level(&self) -> Result<Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Unknown log level: {}", self.log_level)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn from_toml(toml: &str) -> Result<EngineConfig, ConfigError> {
        EngineConfig::from_builder(
            config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
        )
    }

    #[test]
    fn defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.level().unwrap(), Level::INFO);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = from_toml("trend_window = 5\ndefault_focus = \"Light\"").unwrap();
        assert_eq!(config.trend_window, 5);
        assert_eq!(config.default_focus, Category::Light);
        assert_eq!(config.outlier_threshold, 2.0);
        assert_eq!(config.celebration_photo_count, 20);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(from_toml("trend_window = 2"), Err(ConfigError::Invalid(_))));
        assert!(matches!(from_toml("log_level = \"loud\""), Err(ConfigError::Invalid(_))));
        assert!(matches!(
            from_toml("skill_target_score = 1.5"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(from_toml("trend_window = \"many\""), Err(ConfigError::Load(_))));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let result = EngineConfig::load(Some(Path::new("/nonexistent/photo-critique.toml")));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
