use crate::error::StateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Qualitative band derived from a score in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    Excellent,
    Good,
    Fair,
    NeedsWork,
    Poor,
}

impl Rating {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.9 {
            Rating::Excellent
        } else if score >= 0.75 {
            Rating::Good
        } else if score >= 0.6 {
            Rating::Fair
        } else if score >= 0.4 {
            Rating::NeedsWork
        } else {
            Rating::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::Fair => "Fair",
            Rating::NeedsWork => "Needs Work",
            Rating::Poor => "Poor",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Rating {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Excellent" => Ok(Rating::Excellent),
            "Good" => Ok(Rating::Good),
            "Fair" => Ok(Rating::Fair),
            "NeedsWork" | "Needs Work" => Ok(Rating::NeedsWork),
            "Poor" => Ok(Rating::Poor),
            other => Err(StateError::UnknownRating(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_exact() {
        assert_eq!(Rating::from_score(0.9), Rating::Excellent);
        assert_eq!(Rating::from_score(0.89999), Rating::Good);
        assert_eq!(Rating::from_score(0.75), Rating::Good);
        assert_eq!(Rating::from_score(0.6), Rating::Fair);
        assert_eq!(Rating::from_score(0.4), Rating::NeedsWork);
        assert_eq!(Rating::from_score(0.39999), Rating::Poor);
        assert_eq!(Rating::from_score(0.0), Rating::Poor);
    }

    #[test]
    fn rating_is_monotonic() {
        let order = |r: Rating| match r {
            Rating::Poor => 0,
            Rating::NeedsWork => 1,
            Rating::Fair => 2,
            Rating::Good => 3,
            Rating::Excellent => 4,
        };
        let mut previous = 0;
        for step in 0..=1000 {
            let current = order(Rating::from_score(step as f64 / 1000.0));
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn unknown_rating_string_is_rejected() {
        assert_eq!("Needs Work".parse::<Rating>().unwrap(), Rating::NeedsWork);
        let err = "Superb".parse::<Rating>().unwrap_err();
        assert!(matches!(err, StateError::UnknownRating(ref s) if s == "Superb"));
    }

    #[test]
    fn unknown_rating_fails_deserialization() {
        assert!(serde_json::from_str::<Rating>("\"Superb\"").is_err());
        assert_eq!(
            serde_json::from_str::<Rating>("\"Fair\"").unwrap(),
            Rating::Fair
        );
    }
}
