pub mod history;
pub mod milestone;
pub mod skill;
pub mod tracker;
pub mod trend;

pub use history::{PracticeSession, SkillHistory};
pub use milestone::{Milestone, MilestoneTier};
pub use skill::{Measurement, SkillMetric};
pub use tracker::SkillTracker;
pub use trend::Trend;
