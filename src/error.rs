use crate::types::Rating;
use thiserror::Error;

// Main Engine Error Type

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Batch Error: {0}")]
    Batch(#[from] BatchError),
    #[error("State Error: {0}")]
    State(#[from] StateError),
    #[error("Plan Error: {0}")]
    Plan(#[from] PlanError),
    #[error("Print Error: {0}")]
    Print(#[from] PrintError),
    #[error("Signal Error: {0}")]
    Signal(#[from] SignalError),
    #[error("Configuration Error: {0}")]
    Config(#[from] ConfigError),
}

// Batch consistency errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BatchError {
    #[error("Batch analysis needs at least 2 photos, got {0}")]
    InsufficientPhotos(usize),
}

// Persisted state that could not be restored
#[derive(Error, Debug)]
pub enum StateError {
    #[error("Unrecognized rating: {0}")]
    UnknownRating(String),
    #[error("Failed to decode persisted state: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Measurements for {category} are not in time order at index {index}")]
    UnorderedMeasurements { category: String, index: usize },
    #[error("Score {score} for {category} is outside [0, 1]")]
    ScoreOutOfRange { category: String, score: f64 },
    #[error("Rating {rating} for {category} does not match its score (expected {expected})")]
    RatingMismatch {
        category: String,
        rating: Rating,
        expected: Rating,
    },
    #[error("Critique lists {0} top improvements, at most {max} are allowed", max = crate::types::MAX_TOP_IMPROVEMENTS)]
    TooManyImprovements(usize),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("Exercise {0} is not part of this plan")]
    UnknownExercise(String),
    #[error("No goal for {0} in this plan")]
    UnknownGoal(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrintError {
    #[error("Pixel dimensions must be positive, got {0}x{1}")]
    InvalidDimensions(u32, u32),
    #[error("Print size must be positive inches, got {0}x{1}")]
    InvalidPrintSize(f64, f64),
}

// Raised by signal sources; the critique path absorbs it
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    #[error("Signal source unavailable: {0}")]
    Unavailable(String),
    #[error("Image could not be decoded: {0}")]
    Decode(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
