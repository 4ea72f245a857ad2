pub mod analysis;
pub mod batch;
pub mod coaching;
pub mod config;
pub mod engine;
pub mod error;
pub mod print;
pub mod progress;
pub mod telemetry;
pub mod types;

pub use error::{BatchError, ConfigError, EngineError, PlanError, PrintError, SignalError, StateError};

pub use analysis::{CategoryAnalyzer, CritiqueOrchestrator, CritiqueRequest, SignalSource};
pub use batch::{BatchConsistencyAnalyzer, BatchPhoto, ConsistencyReport};
pub use coaching::{DashboardGenerator, PlanGenerator, WeeklyFocusPlan};
pub use crate::config::EngineConfig;
pub use engine::PhotoCoach;
pub use progress::{SkillHistory, SkillTracker};
pub use types::{Category, CategoryScore, CritiqueResult, ImageSignals, Rating};
