use super::milestone::{Milestone, MilestoneTier};
use super::skill::{Measurement, SkillMetric};
use super::trend::DEFAULT_TREND_WINDOW;
use crate::error::StateError;
use crate::types::{Category, CritiqueResult, PerCategory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};
use uuid::Uuid;

pub const DEFAULT_TARGET_SCORE: f64 = 0.8;

/// A logged block of deliberate practice on one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeSession {
    pub id: Uuid,
    pub category: Category,
    pub exercise_id: Option<String>,
    pub duration_minutes: u32,
    pub completed_at: DateTime<Utc>,
    pub notes: Option<String>,
}

impl PracticeSession {
    pub fn new(category: Category, duration_minutes: u32, completed_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            exercise_id: None,
            duration_minutes,
            completed_at,
            notes: None,
        }
    }

    pub fn for_exercise(mut self, exercise_id: impl Into<String>) -> Self {
        self.exercise_id = Some(exercise_id.into());
        self
    }
}

/// Serialized shape of a history, validated on the way in.
#[derive(Debug, Deserialize)]
pub struct SkillHistoryRecord {
    metrics: PerCategory<SkillMetric>,
    #[serde(default)]
    practice_sessions: Vec<PracticeSession>,
    #[serde(default)]
    milestones: Vec<Milestone>,
    #[serde(default)]
    critique_count: usize,
    #[serde(default = "default_trend_window")]
    trend_window: usize,
}

fn default_trend_window() -> usize {
    DEFAULT_TREND_WINDOW
}

/// Everything the engine knows about one photographer's progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SkillHistoryRecord")]
pub struct SkillHistory {
    metrics: PerCategory<SkillMetric>,
    practice_sessions: Vec<PracticeSession>,
    milestones: Vec<Milestone>,
    critique_count: usize,
    trend_window: usize,
    #[serde(skip)]
    achieved: BTreeSet<(Category, MilestoneTier)>,
}

impl Default for SkillHistory {
    fn default() -> Self {
        Self::new(DEFAULT_TREND_WINDOW, DEFAULT_TARGET_SCORE)
    }
}

impl SkillHistory {
    pub fn new(trend_window: usize, target_score: f64) -> Self {
        Self {
            metrics: PerCategory::from_fn(|c| SkillMetric::new(c, target_score)),
            practice_sessions: Vec::new(),
            milestones: Vec::new(),
            critique_count: 0,
            trend_window: trend_window.max(1),
            achieved: BTreeSet::new(),
        }
    }

    pub fn metrics(&self) -> &PerCategory<SkillMetric> {
        &self.metrics
    }

    pub fn metric(&self, category: Category) -> &SkillMetric {
        self.metrics.get(category)
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    pub fn practice_sessions(&self) -> &[PracticeSession] {
        &self.practice_sessions
    }

    pub fn critique_count(&self) -> usize {
        self.critique_count
    }

    pub fn trend_window(&self) -> usize {
        self.trend_window
    }

    /// Measurements across every category.
    pub fn total_measurements(&self) -> usize {
        self.metrics.iter().map(|(_, m)| m.measurements.len()).sum()
    }

    pub fn latest_milestone(&self) -> Option<&Milestone> {
        self.milestones.iter().max_by_key(|m| m.achieved_at)
    }

    pub fn has_milestone(&self, category: Category, tier: MilestoneTier) -> bool {
        self.achieved.contains(&(category, tier))
    }

    /// Appends one measurement per category and returns the milestones the
    /// critique unlocked.
    pub fn record_critique(&mut self, critique: &CritiqueResult) -> Vec<Milestone> {
        let mut unlocked = Vec::new();

        for (category, score) in critique.categories().iter() {
            let metric = self.metrics.get_mut(category);
            let previous = if metric.has_measurements() {
                metric.current_score
            } else {
                0.0
            };

            metric.record(
                Measurement {
                    score: score.score(),
                    timestamp: critique.timestamp(),
                    photo_id: critique.photo_id().to_string(),
                    critique_id: critique.id(),
                },
                self.trend_window,
            );
            // the new score, not the latest one: a late measurement lands mid-history
            let current = score.score();

            for tier in MilestoneTier::crossed(previous, current) {
                if self.achieved.insert((category, tier)) {
                    info!("Milestone reached: {} {} ({:.2})", category, tier, current);
                    unlocked.push(Milestone {
                        category,
                        tier,
                        score: current,
                        achieved_at: critique.timestamp(),
                        photo_id: critique.photo_id().to_string(),
                    });
                }
            }
        }

        self.critique_count += 1;
        self.milestones.extend(unlocked.iter().cloned());
        debug!(
            "Recorded critique {} ({} critiques, {} milestones)",
            critique.id(),
            self.critique_count,
            self.milestones.len()
        );
        unlocked
    }

    pub fn record_practice_session(&mut self, session: PracticeSession) {
        debug!(
            "Practice session on {}: {} minutes",
            session.category, session.duration_minutes
        );
        self.practice_sessions.push(session);
    }

    pub fn to_json(&self) -> Result<String, StateError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restores a history, reporting malformed state as a typed error.
    pub fn from_json(json: &str) -> Result<Self, StateError> {
        let record: SkillHistoryRecord = serde_json::from_str(json)?;
        Self::try_from(record)
    }
}

impl TryFrom<SkillHistoryRecord> for SkillHistory {
    type Error = StateError;

    fn try_from(record: SkillHistoryRecord) -> Result<Self, Self::Error> {
        let trend_window = record.trend_window.max(1);
        let mut metrics = record.metrics;

        for category in Category::ALL {
            let metric = metrics.get_mut(category);
            metric.category = category;
            for (index, measurement) in metric.measurements.iter().enumerate() {
                if !(0.0..=1.0).contains(&measurement.score) {
                    return Err(StateError::ScoreOutOfRange {
                        category: category.to_string(),
                        score: measurement.score,
                    });
                }
                if index > 0 && metric.measurements[index - 1].timestamp > measurement.timestamp {
                    return Err(StateError::UnorderedMeasurements {
                        category: category.to_string(),
                        index,
                    });
                }
            }
            metric.refresh(trend_window);
        }

        // keep the first record of any duplicated (category, tier)
        let mut achieved = BTreeSet::new();
        let milestones = record
            .milestones
            .into_iter()
            .filter(|m| achieved.insert((m.category, m.tier)))
            .collect();

        Ok(Self {
            metrics,
            practice_sessions: record.practice_sessions,
            milestones,
            critique_count: record.critique_count,
            trend_window,
            achieved,
        })
    }
}
