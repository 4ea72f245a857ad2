use crate::analysis::core::{CategoryAnalyzer, SubMeasurement};
use crate::types::{Category, ImageSignals};

const SHARPNESS_WEIGHT: f64 = 0.6;
const EDGE_WEIGHT: f64 = 0.4;

// Laplacian variance where the sharpness curve reaches ~63%
const SHARPNESS_K: f64 = 180.0;

/// Maps Laplacian variance onto [0, 1] with a smooth saturating curve.
pub fn detail_level(variance: f64) -> f64 {
    1.0 - (-variance.max(0.0) / SHARPNESS_K).exp()
}

/// [`detail_level`] with a penalty for near-blurred frames.
pub fn sharpness_curve(variance: f64) -> f64 {
    let mut score = detail_level(variance);
    if variance < 25.0 {
        score = (score - 0.2).max(0.0);
    }
    score.clamp(0.0, 1.0)
}

/// Scores edge energy and detail density.
#[derive(Debug, Default, Clone, Copy)]
pub struct FocusAnalyzer;

impl FocusAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn sharpness(variance: f64) -> SubMeasurement {
        let mut measurement = SubMeasurement::scored(sharpness_curve(variance));
        if variance < 60.0 {
            measurement = measurement.with_issue("Image looks soft or slightly out of focus");
        }
        if variance < 25.0 {
            measurement = measurement.with_issue("Very low edge energy; possible motion blur");
        }
        if variance >= SHARPNESS_K {
            measurement = measurement.with_strength("Crisp fine detail");
        }
        measurement
    }

    pub(crate) fn edge_density(density: f64) -> SubMeasurement {
        if (0.05..=0.25).contains(&density) {
            SubMeasurement::scored(1.0).with_strength("Good level of fine detail")
        } else if density < 0.02 {
            SubMeasurement::scored(0.4).with_issue("Almost no fine detail; the frame may be blurred")
        } else if density < 0.05 {
            SubMeasurement::scored(0.7)
        } else if density <= 0.4 {
            SubMeasurement::scored(0.8)
        } else {
            SubMeasurement::scored(0.6).with_issue("Busy, noisy detail across the frame")
        }
    }
}

impl CategoryAnalyzer for FocusAnalyzer {
    fn category(&self) -> Category {
        Category::Focus
    }

    fn name(&self) -> &'static str {
        "FocusAnalyzer"
    }

    fn measure(&self, signals: &ImageSignals) -> Vec<(f64, SubMeasurement)> {
        let sharpness = signals
            .sharpness
            .map(Self::sharpness)
            .unwrap_or_else(SubMeasurement::neutral);
        let edges = signals
            .edge_density
            .map(Self::edge_density)
            .unwrap_or_else(SubMeasurement::neutral);

        vec![(SHARPNESS_WEIGHT, sharpness), (EDGE_WEIGHT, edges)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sharpness_curve_shape() {
        assert_eq!(sharpness_curve(0.0), 0.0);
        assert!((sharpness_curve(180.0) - (1.0 - (-1.0f64).exp())).abs() < 1e-12);
        assert!(sharpness_curve(2000.0) > 0.99);
        // the low-variance penalty never drives the score negative
        assert_eq!(sharpness_curve(10.0), 0.0);
    }

    #[test]
    fn blurry_frame_reports_softness() {
        let measurement = FocusAnalyzer::sharpness(20.0);
        assert_eq!(measurement.issues.len(), 2);
        assert!(measurement.issues[0].contains("soft"));
    }

    #[test]
    fn sharp_detailed_frame() {
        let signals = ImageSignals {
            sharpness: Some(900.0),
            edge_density: Some(0.12),
            ..ImageSignals::default()
        };
        let score = FocusAnalyzer::new().analyze(&signals);
        assert!(score.score() > 0.99);
        assert_eq!(score.strengths().len(), 2);
    }

    #[test]
    fn edge_density_bands() {
        assert_eq!(FocusAnalyzer::edge_density(0.01).score, 0.4);
        assert_eq!(FocusAnalyzer::edge_density(0.03).score, 0.7);
        assert_eq!(FocusAnalyzer::edge_density(0.3).score, 0.8);
        assert_eq!(FocusAnalyzer::edge_density(0.5).score, 0.6);
    }
}
