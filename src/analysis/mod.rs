pub mod analyzers;
pub mod core;
pub mod guidance;
pub mod orchestrator;
pub mod service;

pub use self::core::{CategoryAnalyzer, SignalSource, SubMeasurement};
pub use orchestrator::{AnalyzerSet, CritiqueOrchestrator};
pub use service::CritiqueRequest;
