use serde::{Deserialize, Serialize};

pub const LOW_RISK_CEILING: i32 = 30;
pub const MEDIUM_RISK_CEILING: i32 = 60;

/// Score shown on the demo dashboard alongside the mock metrics.
pub const MOCK_RISK_SCORE: i32 = 68;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Medium => "Moderate Risk",
            Self::High => "Elevated Risk",
        }
    }
}

/// Exposure classification, independent of the compliance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskLevel {
    pub score: i32,
    pub level: RiskBand,
    pub label: &'static str,
}

impl RiskLevel {
    /// Open-ended comparisons: scores below 0 read as low, above 100 as high.
    pub const fn from_score(score: i32) -> Self {
        let level = if score <= LOW_RISK_CEILING {
            RiskBand::Low
        } else if score <= MEDIUM_RISK_CEILING {
            RiskBand::Medium
        } else {
            RiskBand::High
        };

        Self {
            score,
            level,
            label: level.label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(RiskLevel::from_score(30).level, RiskBand::Low);
        assert_eq!(RiskLevel::from_score(31).level, RiskBand::Medium);
        assert_eq!(RiskLevel::from_score(60).level, RiskBand::Medium);
        assert_eq!(RiskLevel::from_score(61).level, RiskBand::High);
    }

    #[test]
    fn scores_outside_range_are_not_clamped() {
        let below = RiskLevel::from_score(-5);
        assert_eq!(below.level, RiskBand::Low);
        assert_eq!(below.score, -5);

        let above = RiskLevel::from_score(250);
        assert_eq!(above.level, RiskBand::High);
        assert_eq!(above.score, 250);
    }

    #[test]
    fn mock_score_reads_as_elevated() {
        let risk = RiskLevel::from_score(MOCK_RISK_SCORE);
        assert_eq!(risk.label, "Elevated Risk");
        assert_eq!(RiskLevel::from_score(45).label, "Moderate Risk");
        assert_eq!(RiskLevel::from_score(0).label, "Low Risk");
    }
}
