use super::exercises::{exercises_for, Difficulty};
use super::plan::{Goal, WeeklyFocusPlan};
use crate::progress::{SkillHistory, SkillMetric, Trend};
use crate::types::Category;
use chrono::{DateTime, Utc};
use tracing::info;

pub const PRIMARY_EXERCISES: usize = 3;
pub const SECONDARY_EXERCISES: usize = 2;
pub const PRIMARY_GOAL_INCREMENT: f64 = 0.10;
pub const SECONDARY_GOAL_INCREMENT: f64 = 0.05;

/// Secondary focus candidates score below this unless they are declining.
pub const SECONDARY_BELOW: f64 = 0.8;

/// Builds weekly practice plans from a skill history.
#[derive(Debug, Clone)]
pub struct PlanGenerator {
    default_focus: Category,
}

impl Default for PlanGenerator {
    fn default() -> Self {
        Self::new(Category::Composition)
    }
}

impl PlanGenerator {
    pub fn new(default_focus: Category) -> Self {
        Self { default_focus }
    }

    pub fn generate(&self, history: &SkillHistory, week_start: DateTime<Utc>) -> WeeklyFocusPlan {
        let measured: Vec<&SkillMetric> = history
            .metrics()
            .iter()
            .map(|(_, metric)| metric)
            .filter(|metric| metric.has_measurements())
            .collect();

        let primary = primary_focus(&measured).unwrap_or(self.default_focus);
        let secondary = secondary_focus(&measured, primary);

        let primary_score = history.metric(primary).current_score;
        let mut exercises = exercises_for(
            primary,
            Difficulty::for_score(primary_score),
            PRIMARY_EXERCISES,
        );
        let mut goals = vec![Goal::new(primary, primary_score, PRIMARY_GOAL_INCREMENT)];

        if let Some(secondary) = secondary {
            let score = history.metric(secondary).current_score;
            exercises.extend(exercises_for(
                secondary,
                Difficulty::for_score(score),
                SECONDARY_EXERCISES,
            ));
            goals.push(Goal::new(secondary, score, SECONDARY_GOAL_INCREMENT));
        }

        let plan = WeeklyFocusPlan::new(week_start, primary, secondary, exercises, goals);
        info!(
            "Weekly plan {}: primary {}, secondary {}, {} exercises",
            plan.id,
            primary,
            secondary.map(|c| c.to_string()).unwrap_or_else(|| "none".to_string()),
            plan.exercises.len()
        );
        plan
    }
}

/// First declining category, else the lowest scoring one. Ties keep
/// category order.
fn primary_focus(measured: &[&SkillMetric]) -> Option<Category> {
    measured
        .iter()
        .find(|m| m.trend == Trend::Declining)
        .or_else(|| lowest(measured.iter()))
        .map(|m| m.category)
}

fn secondary_focus(measured: &[&SkillMetric], primary: Category) -> Option<Category> {
    let candidates = measured.iter().filter(|m| {
        m.category != primary && (m.current_score < SECONDARY_BELOW || m.trend == Trend::Declining)
    });
    lowest(candidates).map(|m| m.category)
}

fn lowest<'a, 'b>(metrics: impl Iterator<Item = &'b &'a SkillMetric>) -> Option<&'b &'a SkillMetric> {
    metrics.fold(None, |lowest, metric| match lowest {
        Some(current) if current.current_score <= metric.current_score => Some(current),
        _ => Some(metric),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CategoryScore, CritiqueResult, PerCategory};
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap()
    }

    fn record(history: &mut SkillHistory, day: i64, scores: [f64; 6]) {
        let categories = PerCategory::from_fn(|category| {
            let index = Category::ALL.iter().position(|c| *c == category).unwrap();
            CategoryScore::new(scores[index], String::new(), vec![], vec![])
        });
        history.record_critique(&CritiqueResult::new(
            format!("IMG_{}", day),
            start() - Duration::days(30 - day),
            0.0,
            String::new(),
            vec![],
            categories,
            vec![],
            None,
        ));
    }

    #[test]
    fn empty_history_uses_default_focus() {
        let plan = PlanGenerator::new(Category::Light).generate(&SkillHistory::default(), start());
        assert_eq!(plan.primary_focus, Category::Light);
        assert_eq!(plan.secondary_focus, None);
        assert_eq!(plan.exercises.len(), PRIMARY_EXERCISES);
        assert_eq!(plan.goals.len(), 1);
        assert!((plan.goals[0].target_score - 0.1).abs() < 1e-12);
        assert_eq!(plan.week_end - plan.week_start, Duration::days(7));
    }

    #[test]
    fn lowest_score_leads_and_next_lowest_follows() {
        let mut history = SkillHistory::default();
        record(&mut history, 0, [0.85, 0.55, 0.75, 0.9, 0.82, 0.95]);

        let plan = PlanGenerator::default().generate(&history, start());
        assert_eq!(plan.primary_focus, Category::Light);
        assert_eq!(plan.secondary_focus, Some(Category::Focus));
        assert_eq!(plan.exercises.len(), PRIMARY_EXERCISES + SECONDARY_EXERCISES);
        assert_eq!(plan.exercises[0].difficulty, Difficulty::Beginner);
        assert!(plan.exercises[3..]
            .iter()
            .all(|e| e.category == Category::Focus && e.difficulty == Difficulty::Intermediate));
        assert!((plan.goals[0].target_score - 0.65).abs() < 1e-12);
        assert!((plan.goals[1].target_score - 0.80).abs() < 1e-12);
    }

    #[test]
    fn declining_category_takes_priority() {
        let mut history = SkillHistory::default();
        record(&mut history, 0, [0.95, 0.6, 0.9, 0.9, 0.9, 0.9]);
        record(&mut history, 1, [0.9, 0.6, 0.9, 0.9, 0.9, 0.9]);
        record(&mut history, 2, [0.85, 0.6, 0.9, 0.9, 0.9, 0.9]);

        let plan = PlanGenerator::default().generate(&history, start());
        assert_eq!(plan.primary_focus, Category::Composition);
        assert_eq!(plan.secondary_focus, Some(Category::Light));
        assert_eq!(plan.exercises[0].difficulty, Difficulty::Advanced);
    }

    #[test]
    fn strong_everywhere_has_no_secondary() {
        let mut history = SkillHistory::default();
        record(&mut history, 0, [0.85, 0.9, 0.9, 0.9, 0.9, 0.9]);
        let plan = PlanGenerator::default().generate(&history, start());
        assert_eq!(plan.primary_focus, Category::Composition);
        assert_eq!(plan.secondary_focus, None);
    }
}
