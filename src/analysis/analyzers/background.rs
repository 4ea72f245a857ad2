use crate::analysis::core::{CategoryAnalyzer, SubMeasurement};
use crate::types::{Category, ImageSignals};

const CLUTTER_WEIGHT: f64 = 0.4;
const SEPARATION_WEIGHT: f64 = 0.4;
const TEXTURE_WEIGHT: f64 = 0.2;

/// Scores clutter, subject separation and background texture.
#[derive(Debug, Default, Clone, Copy)]
pub struct BackgroundAnalyzer;

impl BackgroundAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn clutter(segment_count: u32) -> SubMeasurement {
        match segment_count {
            0..=2 => SubMeasurement::scored(1.0).with_strength("Clean, uncluttered background"),
            3..=4 => SubMeasurement::scored(0.7),
            5..=7 => SubMeasurement::scored(0.5)
                .with_issue("Several background elements compete for attention"),
            _ => SubMeasurement::scored(0.3)
                .with_issue("Cluttered background distracts from the subject"),
        }
    }

    pub(crate) fn separation(top_confidence: Option<f64>) -> SubMeasurement {
        match top_confidence {
            Some(confidence) if confidence >= 0.7 => SubMeasurement::scored(1.0)
                .with_strength("Subject separates cleanly from the background"),
            Some(confidence) if confidence >= 0.4 => SubMeasurement::scored(0.7),
            _ => SubMeasurement::scored(0.4).with_issue("Subject blends into the background"),
        }
    }

    pub(crate) fn texture(edge_density: f64) -> SubMeasurement {
        if edge_density <= 0.15 {
            SubMeasurement::scored(1.0)
        } else if edge_density <= 0.3 {
            SubMeasurement::scored(0.7)
        } else {
            SubMeasurement::scored(0.4).with_issue("Busy background texture pulls the eye")
        }
    }
}

impl CategoryAnalyzer for BackgroundAnalyzer {
    fn category(&self) -> Category {
        Category::Background
    }

    fn name(&self) -> &'static str {
        "BackgroundAnalyzer"
    }

    fn measure(&self, signals: &ImageSignals) -> Vec<(f64, SubMeasurement)> {
        let clutter = signals
            .segment_count
            .map(Self::clutter)
            .unwrap_or_else(SubMeasurement::neutral);
        let separation = match signals.salient_regions {
            Some(_) => Self::separation(signals.primary_region().map(|r| r.confidence)),
            None => SubMeasurement::neutral(),
        };
        let texture = signals
            .edge_density
            .map(Self::texture)
            .unwrap_or_else(SubMeasurement::neutral);

        vec![
            (CLUTTER_WEIGHT, clutter),
            (SEPARATION_WEIGHT, separation),
            (TEXTURE_WEIGHT, texture),
        ]
    }
}
