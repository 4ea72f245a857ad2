pub mod dashboard;
pub mod exercises;
pub mod generator;
pub mod plan;

pub use dashboard::{
    Achievement, DashboardGenerator, DashboardSnapshot, Insight, InsightKind, InsightPriority,
};
pub use exercises::{Difficulty, Exercise};
pub use generator::PlanGenerator;
pub use plan::{Goal, WeeklyFocusPlan};
