use super::exercises::Exercise;
use crate::error::PlanError;
use crate::types::Category;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

pub const PLAN_LENGTH_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub category: Category,
    pub description: String,
    pub starting_score: f64,
    pub target_score: f64,
    pub current_score: f64,
}

impl Goal {
    pub fn new(category: Category, starting_score: f64, increment: f64) -> Self {
        let target_score = (starting_score + increment).min(1.0);
        Self {
            category,
            description: format!(
                "Raise {} from {:.0} to {:.0}",
                category,
                starting_score * 100.0,
                target_score * 100.0
            ),
            starting_score,
            target_score,
            current_score: starting_score,
        }
    }

    pub fn is_met(&self) -> bool {
        self.current_score >= self.target_score
    }

    /// Share of the way from the starting score to the target, in [0, 1].
    pub fn progress(&self) -> f64 {
        let span = self.target_score - self.starting_score;
        if span <= 0.0 {
            return 1.0;
        }
        ((self.current_score - self.starting_score) / span).clamp(0.0, 1.0)
    }
}

/// One week of focused practice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyFocusPlan {
    pub id: Uuid,
    pub week_start: DateTime<Utc>,
    pub week_end: DateTime<Utc>,
    pub primary_focus: Category,
    pub secondary_focus: Option<Category>,
    pub exercises: Vec<Exercise>,
    pub goals: Vec<Goal>,
    pub completed_exercise_ids: Vec<String>,
}

impl WeeklyFocusPlan {
    pub fn new(
        week_start: DateTime<Utc>,
        primary_focus: Category,
        secondary_focus: Option<Category>,
        exercises: Vec<Exercise>,
        goals: Vec<Goal>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            week_start,
            week_end: week_start + Duration::days(PLAN_LENGTH_DAYS),
            primary_focus,
            secondary_focus,
            exercises,
            goals,
            completed_exercise_ids: Vec::new(),
        }
    }

    /// Returns `Ok(false)` when the exercise was already complete.
    pub fn mark_exercise_complete(&mut self, exercise_id: &str) -> Result<bool, PlanError> {
        if !self.exercises.iter().any(|e| e.id == exercise_id) {
            return Err(PlanError::UnknownExercise(exercise_id.to_string()));
        }
        if self.is_complete(exercise_id) {
            return Ok(false);
        }
        debug!("Plan {}: completed {}", self.id, exercise_id);
        self.completed_exercise_ids.push(exercise_id.to_string());
        Ok(true)
    }

    pub fn is_complete(&self, exercise_id: &str) -> bool {
        self.completed_exercise_ids.iter().any(|id| id == exercise_id)
    }

    pub fn update_goal_progress(&mut self, category: Category, score: f64) -> Result<&Goal, PlanError> {
        let goal = self
            .goals
            .iter_mut()
            .find(|g| g.category == category)
            .ok_or_else(|| PlanError::UnknownGoal(category.to_string()))?;
        goal.current_score = score.clamp(0.0, 1.0);
        Ok(goal)
    }

    pub fn completion_ratio(&self) -> f64 {
        if self.exercises.is_empty() {
            return 0.0;
        }
        self.completed_exercise_ids.len() as f64 / self.exercises.len() as f64
    }

    /// Whole days left before the week ends, never negative.
    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        (self.week_end - now).num_days().max(0)
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.week_start <= now && now < self.week_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coaching::exercises::{exercises_for, Difficulty};
    use chrono::TimeZone;

    fn plan() -> WeeklyFocusPlan {
        let start = Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap();
        WeeklyFocusPlan::new(
            start,
            Category::Light,
            None,
            exercises_for(Category::Light, Difficulty::Beginner, 3),
            vec![Goal::new(Category::Light, 0.55, 0.10)],
        )
    }

    #[test]
    fn completing_exercises() {
        let mut plan = plan();
        let id = plan.exercises[0].id.clone();
        assert_eq!(plan.mark_exercise_complete(&id), Ok(true));
        assert_eq!(plan.mark_exercise_complete(&id), Ok(false));
        assert!((plan.completion_ratio() - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(
            plan.mark_exercise_complete("no-such-exercise"),
            Err(PlanError::UnknownExercise("no-such-exercise".to_string()))
        );
    }

    #[test]
    fn goal_progress() {
        let mut plan = plan();
        let goal = plan.update_goal_progress(Category::Light, 0.60).unwrap();
        assert!((goal.progress() - 0.5).abs() < 1e-9);
        assert!(!goal.is_met());
        assert!(plan.update_goal_progress(Category::Light, 0.7).unwrap().is_met());
        assert_eq!(
            plan.update_goal_progress(Category::Story, 0.5).unwrap_err(),
            PlanError::UnknownGoal("Story".to_string())
        );
    }

    #[test]
    fn week_bounds() {
        let plan = plan();
        assert_eq!(plan.week_end - plan.week_start, Duration::days(7));
        assert_eq!(plan.days_remaining(plan.week_start + Duration::hours(12)), 6);
        assert_eq!(plan.days_remaining(plan.week_end + Duration::days(2)), 0);
        assert!(plan.is_active(plan.week_start));
        assert!(!plan.is_active(plan.week_end));
    }

    #[test]
    fn goals_cap_at_one() {
        let goal = Goal::new(Category::Color, 0.97, 0.10);
        assert_eq!(goal.target_score, 1.0);
    }
}
