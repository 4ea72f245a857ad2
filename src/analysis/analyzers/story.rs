use crate::analysis::core::{CategoryAnalyzer, SubMeasurement};
use crate::types::{Category, ImageSignals};

const FOCAL_WEIGHT: f64 = 0.5;
const CONTEXT_WEIGHT: f64 = 0.3;
const MOOD_WEIGHT: f64 = 0.2;

/// Scores focal point, contextual elements and tonal mood.
#[derive(Debug, Default, Clone, Copy)]
pub struct StoryAnalyzer;

impl StoryAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn focal_point(top_confidence: Option<f64>) -> SubMeasurement {
        match top_confidence {
            Some(confidence) if confidence >= 0.6 => {
                SubMeasurement::scored(1.0).with_strength("Clear focal point anchors the story")
            }
            Some(_) => SubMeasurement::scored(0.6),
            None => SubMeasurement::scored(0.3).with_issue("No clear focal point to carry a story"),
        }
    }

    pub(crate) fn context(segment_count: u32) -> SubMeasurement {
        match segment_count {
            0 => SubMeasurement::scored(0.5).with_issue("Scene lacks contextual elements"),
            1 => SubMeasurement::scored(0.7),
            2..=5 => SubMeasurement::scored(1.0).with_strength("Supporting elements add context"),
            _ => SubMeasurement::scored(0.6).with_issue("Too many elements dilute the story"),
        }
    }

    pub(crate) fn mood(dynamic_range: f64) -> SubMeasurement {
        if dynamic_range >= 128.0 {
            SubMeasurement::scored(1.0).with_strength("Strong tonal mood")
        } else if dynamic_range >= 77.0 {
            SubMeasurement::scored(0.7)
        } else {
            SubMeasurement::scored(0.5).with_issue("Flat tonality weakens the mood")
        }
    }
}

impl CategoryAnalyzer for StoryAnalyzer {
    fn category(&self) -> Category {
        Category::Story
    }

    fn name(&self) -> &'static str {
        "StoryAnalyzer"
    }

    fn measure(&self, signals: &ImageSignals) -> Vec<(f64, SubMeasurement)> {
        let focal = match signals.salient_regions {
            Some(_) => Self::focal_point(signals.primary_region().map(|r| r.confidence)),
            None => SubMeasurement::neutral(),
        };
        let context = signals
            .segment_count
            .map(Self::context)
            .unwrap_or_else(SubMeasurement::neutral);
        let mood = signals
            .histogram_stats()
            .map(|s| Self::mood(s.dynamic_range()))
            .unwrap_or_else(SubMeasurement::neutral);

        vec![
            (FOCAL_WEIGHT, focal),
            (CONTEXT_WEIGHT, context),
            (MOOD_WEIGHT, mood),
        ]
    }
}
