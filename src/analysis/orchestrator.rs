/// Critique Orchestrator - fans one image out to the six category analyzers
/// and assembles the critique from their joined results.
use super::{
    analyzers::{
        BackgroundAnalyzer, ColorAnalyzer, CompositionAnalyzer, FocusAnalyzer, LightAnalyzer,
        StoryAnalyzer,
    },
    core::{unavailable_note, CategoryAnalyzer, SignalSource},
    guidance,
};
use crate::types::{Category, CategoryBreakdown, CategoryScore, CritiqueResult, ImageSignals, PerCategory};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinError;
use tracing::{debug, info, warn};

pub type AnalyzerSet = PerCategory<Arc<dyn CategoryAnalyzer>>;

/// One analyzer per category; swap individual analyzers with
/// [`CritiqueOrchestrator::with_analyzer`].
#[derive(Clone)]
pub struct CritiqueOrchestrator {
    analyzers: AnalyzerSet,
}

impl Default for CritiqueOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl CritiqueOrchestrator {
    pub fn new() -> Self {
        let analyzers = PerCategory::from_fn(|category| -> Arc<dyn CategoryAnalyzer> {
            match category {
                Category::Composition => Arc::new(CompositionAnalyzer::new()),
                Category::Light => Arc::new(LightAnalyzer::new()),
                Category::Focus => Arc::new(FocusAnalyzer::new()),
                Category::Color => Arc::new(ColorAnalyzer::new()),
                Category::Background => Arc::new(BackgroundAnalyzer::new()),
                Category::Story => Arc::new(StoryAnalyzer::new()),
            }
        });
        Self { analyzers }
    }

    /// Replaces the analyzer for the category `analyzer` reports.
    pub fn with_analyzer(mut self, analyzer: Arc<dyn CategoryAnalyzer>) -> Self {
        let category = analyzer.category();
        *self.analyzers.get_mut(category) = analyzer;
        self
    }

    pub fn analyzers(&self) -> &AnalyzerSet {
        &self.analyzers
    }

    /// Measures `image` through `source` and critiques it. A failing source
    /// degrades every category to a neutral score instead of failing.
    pub async fn analyze<S: SignalSource>(
        &self,
        source: &S,
        image: &S::Image,
        photo_id: impl Into<String>,
    ) -> CritiqueResult {
        let photo_id = photo_id.into();
        let signals = match source.measure(image).await {
            Ok(signals) => signals,
            Err(e) => {
                warn!("Signal source failed for {}: {}", photo_id, e);
                ImageSignals::unavailable()
            }
        };
        self.critique(signals, photo_id).await
    }

    /// Critiques an image from already measured signals.
    pub async fn critique(&self, signals: ImageSignals, photo_id: impl Into<String>) -> CritiqueResult {
        let photo_id = photo_id.into();
        let started = Instant::now();

        let categories = self.run_analyzers(Arc::new(signals)).await;

        let overall = guidance::overall_score(&categories);
        let critique = CritiqueResult::new(
            photo_id,
            Utc::now(),
            overall,
            guidance::summary(&categories, overall),
            guidance::top_improvements(&categories),
            categories.clone(),
            guidance::edit_guidance(&categories),
            guidance::practice_recommendation(&categories),
        );

        info!(
            "Critique for {} completed in {}us: overall {:.3} ({})",
            critique.photo_id(),
            started.elapsed().as_micros(),
            overall,
            critique.overall_rating()
        );
        critique
    }

    /// Launches all six analyzers as blocking tasks and waits for every one.
    async fn run_analyzers(&self, signals: Arc<ImageSignals>) -> CategoryBreakdown {
        let spawn = |category: Category| {
            let analyzer = Arc::clone(self.analyzers.get(category));
            let signals = Arc::clone(&signals);
            tokio::task::spawn_blocking(move || analyzer.analyze(&signals))
        };

        let (composition, light, focus, color, background, story) = tokio::join!(
            spawn(Category::Composition),
            spawn(Category::Light),
            spawn(Category::Focus),
            spawn(Category::Color),
            spawn(Category::Background),
            spawn(Category::Story),
        );

        PerCategory {
            composition: settle(Category::Composition, composition),
            light: settle(Category::Light, light),
            focus: settle(Category::Focus, focus),
            color: settle(Category::Color, color),
            background: settle(Category::Background, background),
            story: settle(Category::Story, story),
        }
    }
}

/// A crashed analyzer task counts as a degraded signal.
fn settle(category: Category, joined: Result<CategoryScore, JoinError>) -> CategoryScore {
    match joined {
        Ok(score) => {
            debug!("{}: {:.3} {}", category, score.score(), score.rating());
            score
        }
        Err(e) => {
            warn!("{} analyzer task failed: {}", category, e);
            CategoryScore::neutral(unavailable_note(category))
        }
    }
}
