use crate::types::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score thresholds a category can cross, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MilestoneTier {
    Beginner,
    Improving,
    Competent,
    Proficient,
    Expert,
    Master,
}

impl MilestoneTier {
    pub const ALL: [MilestoneTier; 6] = [
        MilestoneTier::Beginner,
        MilestoneTier::Improving,
        MilestoneTier::Competent,
        MilestoneTier::Proficient,
        MilestoneTier::Expert,
        MilestoneTier::Master,
    ];

    pub fn threshold(self) -> f64 {
        match self {
            MilestoneTier::Beginner => 0.5,
            MilestoneTier::Improving => 0.6,
            MilestoneTier::Competent => 0.7,
            MilestoneTier::Proficient => 0.8,
            MilestoneTier::Expert => 0.9,
            MilestoneTier::Master => 0.95,
        }
    }

    /// Tiers with `previous < threshold <= current`, lowest first.
    pub fn crossed(previous: f64, current: f64) -> impl Iterator<Item = MilestoneTier> {
        Self::ALL
            .into_iter()
            .filter(move |tier| previous < tier.threshold() && tier.threshold() <= current)
    }

    pub fn label(self) -> &'static str {
        match self {
            MilestoneTier::Beginner => "Beginner",
            MilestoneTier::Improving => "Improving",
            MilestoneTier::Competent => "Competent",
            MilestoneTier::Proficient => "Proficient",
            MilestoneTier::Expert => "Expert",
            MilestoneTier::Master => "Master",
        }
    }
}

impl fmt::Display for MilestoneTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub category: Category,
    pub tier: MilestoneTier,
    pub score: f64,
    pub achieved_at: DateTime<Utc>,
    pub photo_id: String,
}

impl Milestone {
    pub fn title(&self) -> String {
        format!("{} {}", self.category, self.tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossing_is_half_open() {
        let tiers: Vec<_> = MilestoneTier::crossed(0.55, 0.72).collect();
        assert_eq!(tiers, vec![MilestoneTier::Improving, MilestoneTier::Competent]);
        assert_eq!(MilestoneTier::crossed(0.6, 0.65).count(), 0);
        assert_eq!(MilestoneTier::crossed(0.59, 0.6).count(), 1);
    }

    #[test]
    fn first_measurement_crosses_from_zero() {
        let tiers: Vec<_> = MilestoneTier::crossed(0.0, 0.95).collect();
        assert_eq!(tiers, MilestoneTier::ALL.to_vec());
    }
}
