use crate::analysis::{CritiqueOrchestrator, SignalSource};
use crate::batch::{BatchConsistencyAnalyzer, BatchPhoto, ConsistencyReport};
use crate::coaching::{DashboardGenerator, DashboardSnapshot, PlanGenerator, WeeklyFocusPlan};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::progress::{Milestone, SkillHistory, SkillTracker};
use crate::types::{CritiqueResult, ImageSignals};
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::info;

/// Every engine component wired from one configuration.
#[derive(Clone)]
pub struct PhotoCoach {
    config: EngineConfig,
    orchestrator: CritiqueOrchestrator,
    batch: BatchConsistencyAnalyzer,
    planner: PlanGenerator,
    dashboard: DashboardGenerator,
}

impl PhotoCoach {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        info!(
            "Photo coach ready (trend window {}, outlier threshold {})",
            config.trend_window, config.outlier_threshold
        );
        Ok(Self {
            orchestrator: CritiqueOrchestrator::new(),
            batch: BatchConsistencyAnalyzer::with_outlier_threshold(config.outlier_threshold),
            planner: PlanGenerator::new(config.default_focus),
            dashboard: DashboardGenerator::new(config.celebration_photo_count),
            config,
        })
    }

    /// Loads configuration from `path` and the environment.
    pub fn from_config_file(path: Option<&Path>) -> Result<Self, EngineError> {
        Self::new(EngineConfig::load(path)?)
    }

    pub fn with_orchestrator(mut self, orchestrator: CritiqueOrchestrator) -> Self {
        self.orchestrator = orchestrator;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn orchestrator(&self) -> &CritiqueOrchestrator {
        &self.orchestrator
    }

    pub async fn critique(&self, signals: ImageSignals, photo_id: impl Into<String>) -> CritiqueResult {
        self.orchestrator.critique(signals, photo_id).await
    }

    pub async fn analyze<S: SignalSource>(
        &self,
        source: &S,
        image: &S::Image,
        photo_id: impl Into<String>,
    ) -> CritiqueResult {
        self.orchestrator.analyze(source, image, photo_id).await
    }

    /// Critiques a photo and records it in `tracker`, returning the critique
    /// and any milestones it unlocked.
    pub async fn critique_and_record(
        &self,
        tracker: &SkillTracker,
        signals: ImageSignals,
        photo_id: impl Into<String>,
    ) -> (CritiqueResult, Vec<Milestone>) {
        let critique = self.critique(signals, photo_id).await;
        let milestones = tracker.record_critique(&critique);
        (critique, milestones)
    }

    pub fn analyze_batch(&self, photos: &[BatchPhoto]) -> Result<ConsistencyReport, EngineError> {
        Ok(self.batch.analyze(photos)?)
    }

    pub fn new_history(&self) -> SkillHistory {
        SkillHistory::new(self.config.trend_window, self.config.skill_target_score)
    }

    pub fn new_tracker(&self) -> SkillTracker {
        SkillTracker::new(self.new_history())
    }

    pub fn weekly_plan(&self, history: &SkillHistory, week_start: DateTime<Utc>) -> WeeklyFocusPlan {
        self.planner.generate(history, week_start)
    }

    pub fn dashboard(
        &self,
        history: &SkillHistory,
        plan: Option<&WeeklyFocusPlan>,
        now: DateTime<Utc>,
    ) -> DashboardSnapshot {
        self.dashboard.snapshot(history, plan, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BatchError, ConfigError};
    use crate::types::{Category, ChannelMeans, NormalizedRect, SalientRegion};

    fn portrait_signals(brightness: f64) -> ImageSignals {
        ImageSignals {
            average_brightness: Some(brightness),
            left_brightness: Some(brightness - 5.0),
            right_brightness: Some(brightness + 5.0),
            channel_means: Some(ChannelMeans::new(130.0, 125.0, 122.0)),
            saturation: Some(0.45),
            salient_regions: Some(vec![SalientRegion::new(
                NormalizedRect::new(0.28, 0.28, 0.1, 0.1),
                0.85,
            )]),
            segment_count: Some(3),
            edge_density: Some(0.1),
            sharpness: Some(400.0),
            luminance_histogram: None,
        }
    }

    #[test]
    fn rejects_invalid_config() {
        let config = EngineConfig {
            trend_window: 1,
            ..EngineConfig::default()
        };
        assert!(matches!(
            PhotoCoach::new(config),
            Err(EngineError::Config(ConfigError::Invalid(_)))
        ));
    }

    #[tokio::test]
    async fn critique_feeds_progress_and_plan() {
        let coach = PhotoCoach::new(EngineConfig {
            default_focus: Category::Story,
            ..EngineConfig::default()
        })
        .unwrap();
        let tracker = coach.new_tracker();

        let (critique, milestones) = coach
            .critique_and_record(&tracker, portrait_signals(72.0), "IMG_1")
            .await;
        assert!(critique.top_improvements().iter().any(|i| i.contains("underexposed")));
        assert!(!milestones.is_empty());

        let history = tracker.snapshot();
        let plan = coach.weekly_plan(&history, Utc::now());
        assert_eq!(plan.primary_focus, Category::Light);

        let snapshot = coach.dashboard(&history, Some(&plan), Utc::now());
        assert_eq!(snapshot.critique_count, 1);
    }

    #[test]
    fn batch_errors_are_wrapped() {
        let coach = PhotoCoach::new(EngineConfig::default()).unwrap();
        let photos = [BatchPhoto::new("only", portrait_signals(120.0))];
        assert!(matches!(
            coach.analyze_batch(&photos),
            Err(EngineError::Batch(BatchError::InsufficientPhotos(1)))
        ));
    }
}
