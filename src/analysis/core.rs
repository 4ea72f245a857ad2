use crate::error::SignalError;
use crate::types::{Category, CategoryScore, ImageSignals, Rating};
use async_trait::async_trait;

/// External provider of raw per-image measurements.
#[async_trait]
pub trait SignalSource: Send + Sync {
    type Image: Send + Sync + ?Sized;

    async fn measure(&self, image: &Self::Image) -> Result<ImageSignals, SignalError>;
}

/// One scored aspect of a category, with the text its thresholds produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SubMeasurement {
    pub score: f64,
    pub issues: Vec<String>,
    pub strengths: Vec<String>,
}

impl SubMeasurement {
    pub fn scored(score: f64) -> Self {
        Self {
            score,
            issues: Vec::new(),
            strengths: Vec::new(),
        }
    }

    /// Stand-in for a sub-measurement whose signal is missing.
    pub fn neutral() -> Self {
        Self::scored(CategoryScore::NEUTRAL)
    }

    pub fn with_issue(mut self, issue: impl Into<String>) -> Self {
        self.issues.push(issue.into());
        self
    }

    pub fn with_strength(mut self, strength: impl Into<String>) -> Self {
        self.strengths.push(strength.into());
        self
    }
}

/// Strategy for scoring one critique category (Template Method: implementors
/// provide the weighted sub-measurements, `analyze` blends them).
pub trait CategoryAnalyzer: Send + Sync {
    fn category(&self) -> Category;

    fn name(&self) -> &'static str;

    /// Weighted sub-measurements; weights sum to 1.0.
    fn measure(&self, signals: &ImageSignals) -> Vec<(f64, SubMeasurement)>;

    fn analyze(&self, signals: &ImageSignals) -> CategoryScore {
        if signals.is_unavailable() {
            tracing::warn!("{}: no signals available, using neutral score", self.name());
            return CategoryScore::neutral(unavailable_note(self.category()));
        }

        let parts = self.measure(signals);
        let score: f64 = parts.iter().map(|(w, m)| w * m.score).sum();
        let mut issues = Vec::new();
        let mut strengths = Vec::new();
        for (_, part) in parts {
            issues.extend(part.issues);
            strengths.extend(part.strengths);
        }

        let score = score.clamp(0.0, 1.0);
        tracing::debug!(
            "{}: score {:.3} ({} issues, {} strengths)",
            self.name(),
            score,
            issues.len(),
            strengths.len()
        );
        CategoryScore::new(
            score,
            rating_note(self.category(), Rating::from_score(score)),
            issues,
            strengths,
        )
    }
}

pub fn rating_note(category: Category, rating: Rating) -> String {
    match rating {
        Rating::Excellent => format!("{} is a real strength in this photo.", category),
        Rating::Good => format!("{} is solid, with minor refinements possible.", category),
        Rating::Fair => format!("{} is acceptable but has clear room to improve.", category),
        Rating::NeedsWork => format!("{} needs attention.", category),
        Rating::Poor => format!("{} is holding this photo back.", category),
    }
}

pub fn unavailable_note(category: Category) -> String {
    format!("{} could not be evaluated for this image.", category)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedParts;

    impl CategoryAnalyzer for FixedParts {
        fn category(&self) -> Category {
            Category::Color
        }

        fn name(&self) -> &'static str {
            "FixedParts"
        }

        fn measure(&self, _signals: &ImageSignals) -> Vec<(f64, SubMeasurement)> {
            vec![
                (0.6, SubMeasurement::scored(1.0).with_strength("good")),
                (0.4, SubMeasurement::scored(0.5).with_issue("bad")),
            ]
        }
    }

    #[test]
    fn blends_weighted_parts_in_order() {
        let signals = ImageSignals {
            saturation: Some(0.4),
            ..ImageSignals::default()
        };
        let score = FixedParts.analyze(&signals);
        assert!((score.score() - 0.8).abs() < 1e-12);
        assert_eq!(score.issues(), ["bad".to_string()]);
        assert_eq!(score.strengths(), ["good".to_string()]);
        assert_eq!(score.rating(), Rating::Good);
    }

    #[test]
    fn unavailable_signals_score_neutral() {
        let score = FixedParts.analyze(&ImageSignals::unavailable());
        assert_eq!(score.score(), 0.5);
        assert!(score.issues().is_empty());
        assert!(score.strengths().is_empty());
    }
}
