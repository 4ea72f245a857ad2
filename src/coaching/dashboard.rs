//! Progress dashboard: insights about where a photographer stands and the
//! achievement badges they have earned.

use super::plan::WeeklyFocusPlan;
use crate::progress::{SkillHistory, Trend};
use crate::types::{Category, PerCategory};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const RAPID_IMPROVEMENT_RATE: f64 = 0.05;
pub const FOCUS_AREA_BELOW: f64 = 0.6;
pub const DEFAULT_CELEBRATION_PHOTO_COUNT: usize = 20;
pub const CELEBRATION_WINDOW_DAYS: i64 = 30;
pub const PLAN_AT_RISK_COMPLETION: f64 = 0.3;
pub const PLAN_AT_RISK_DAYS: i64 = 3;

pub const MASTERY_SCORE: f64 = 0.9;
pub const ALL_ROUNDER_SCORE: f64 = 0.75;
pub const ALL_ROUNDER_CRITIQUES: usize = 5;
pub const RAPID_GAIN: f64 = 0.20;
pub const RAPID_GAIN_WINDOW_DAYS: i64 = 14;
pub const RAPID_GAIN_MIN_MEASUREMENTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InsightPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsightKind {
    Concern,
    Improvement,
    Milestone,
    FocusArea,
    Celebration,
    PlanAtRisk,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub priority: InsightPriority,
    pub title: String,
    pub message: String,
    pub category: Option<Category>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Achievement {
    FirstCritique,
    TenCritiques,
    HundredCritiques,
    Mastery(Category),
    AllRounder,
    RapidImprovement(Category),
}

impl Achievement {
    pub fn title(&self) -> String {
        match self {
            Achievement::FirstCritique => "First Steps".to_string(),
            Achievement::TenCritiques => "Getting Serious".to_string(),
            Achievement::HundredCritiques => "Dedicated Photographer".to_string(),
            Achievement::Mastery(category) => format!("{} Master", category),
            Achievement::AllRounder => "All-Rounder".to_string(),
            Achievement::RapidImprovement(category) => format!("{} Breakthrough", category),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub critique_count: usize,
    pub current_scores: PerCategory<f64>,
    pub trends: PerCategory<Trend>,
    pub insights: Vec<Insight>,
    pub achievements: Vec<Achievement>,
}

#[derive(Debug, Clone)]
pub struct DashboardGenerator {
    celebration_photo_count: usize,
}

impl Default for DashboardGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CELEBRATION_PHOTO_COUNT)
    }
}

impl DashboardGenerator {
    pub fn new(celebration_photo_count: usize) -> Self {
        Self {
            celebration_photo_count,
        }
    }

    /// Insights ordered by priority; equal priorities keep generation order.
    pub fn insights(
        &self,
        history: &SkillHistory,
        plan: Option<&WeeklyFocusPlan>,
        now: DateTime<Utc>,
    ) -> Vec<Insight> {
        let mut insights = Vec::new();
        let measured = || {
            history
                .metrics()
                .iter()
                .filter(|(_, metric)| metric.has_measurements())
        };

        for (category, metric) in measured() {
            match metric.trend {
                Trend::Declining => insights.push(Insight {
                    kind: InsightKind::Concern,
                    priority: InsightPriority::High,
                    title: format!("{} is slipping", category),
                    message: format!(
                        "Your recent {} scores are trending down. Revisit the basics before it sets in.",
                        category.name().to_lowercase()
                    ),
                    category: Some(category),
                }),
                Trend::Improving if metric.improvement_rate > RAPID_IMPROVEMENT_RATE => {
                    insights.push(Insight {
                        kind: InsightKind::Improvement,
                        priority: InsightPriority::Low,
                        title: format!("{} is improving", category),
                        message: format!(
                            "{} is up {:.0} points a week. Keep doing what you are doing.",
                            category,
                            metric.improvement_rate * 100.0
                        ),
                        category: Some(category),
                    })
                }
                _ => {}
            }
        }

        if let Some(milestone) = history.latest_milestone() {
            insights.push(Insight {
                kind: InsightKind::Milestone,
                priority: InsightPriority::Medium,
                title: format!("Milestone: {}", milestone.title()),
                message: format!(
                    "You reached {} level in {} with a score of {:.0}.",
                    milestone.tier,
                    milestone.category,
                    milestone.score * 100.0
                ),
                category: Some(milestone.category),
            });
        }

        let weakest = measured().fold(None, |weakest: Option<(Category, f64)>, (category, metric)| {
            match weakest {
                Some((_, score)) if score <= metric.current_score => weakest,
                _ => Some((category, metric.current_score)),
            }
        });
        if let Some((category, score)) = weakest.filter(|(_, score)| *score < FOCUS_AREA_BELOW) {
            insights.push(Insight {
                kind: InsightKind::FocusArea,
                priority: InsightPriority::High,
                title: format!("Focus area: {}", category),
                message: format!(
                    "{} is your weakest area at {:.0}. A week of targeted practice will lift your overall score.",
                    category,
                    score * 100.0
                ),
                category: Some(category),
            });
        }

        let since = now - Duration::days(CELEBRATION_WINDOW_DAYS);
        let recent_milestones = history
            .milestones()
            .iter()
            .filter(|m| m.achieved_at >= since)
            .count();
        if history.critique_count() >= self.celebration_photo_count && recent_milestones > 0 {
            insights.push(Insight {
                kind: InsightKind::Celebration,
                priority: InsightPriority::Medium,
                title: "Great momentum".to_string(),
                message: format!(
                    "{} photos analyzed and {} milestones this month.",
                    history.critique_count(),
                    recent_milestones
                ),
                category: None,
            });
        }

        if let Some(plan) = plan.filter(|p| p.is_active(now)) {
            let remaining = plan.days_remaining(now);
            if plan.completion_ratio() < PLAN_AT_RISK_COMPLETION && remaining < PLAN_AT_RISK_DAYS {
                insights.push(Insight {
                    kind: InsightKind::PlanAtRisk,
                    priority: InsightPriority::Medium,
                    title: "Weekly plan at risk".to_string(),
                    message: format!(
                        "{} of {} exercises done with {} days left.",
                        plan.completed_exercise_ids.len(),
                        plan.exercises.len(),
                        remaining
                    ),
                    category: Some(plan.primary_focus),
                });
            }
        }

        insights.sort_by_key(|insight| insight.priority);
        debug!("Generated {} insights", insights.len());
        insights
    }

    pub fn achievements(&self, history: &SkillHistory, now: DateTime<Utc>) -> Vec<Achievement> {
        let mut earned = Vec::new();
        // volume badges count critiques, the same unit as the celebration insight
        let total = history.critique_count();

        for (count, achievement) in [
            (1, Achievement::FirstCritique),
            (10, Achievement::TenCritiques),
            (100, Achievement::HundredCritiques),
        ] {
            if total >= count {
                earned.push(achievement);
            }
        }

        for (category, metric) in history.metrics().iter() {
            if metric.has_measurements() && metric.current_score >= MASTERY_SCORE {
                earned.push(Achievement::Mastery(category));
            }
        }

        let all_strong = history
            .metrics()
            .iter()
            .all(|(_, m)| m.has_measurements() && m.current_score >= ALL_ROUNDER_SCORE);
        if all_strong && total >= ALL_ROUNDER_CRITIQUES {
            earned.push(Achievement::AllRounder);
        }

        let since = now - Duration::days(RAPID_GAIN_WINDOW_DAYS);
        for (category, metric) in history.metrics().iter() {
            let (gain, count) = metric.gain_since(since);
            if count >= RAPID_GAIN_MIN_MEASUREMENTS && gain >= RAPID_GAIN {
                earned.push(Achievement::RapidImprovement(category));
            }
        }

        earned
    }

    pub fn snapshot(
        &self,
        history: &SkillHistory,
        plan: Option<&WeeklyFocusPlan>,
        now: DateTime<Utc>,
    ) -> DashboardSnapshot {
        DashboardSnapshot {
            generated_at: now,
            critique_count: history.critique_count(),
            current_scores: history.metrics().map(|_, m| m.current_score),
            trends: history.metrics().map(|_, m| m.trend),
            insights: self.insights(history, plan, now),
            achievements: self.achievements(history, now),
        }
    }
}
