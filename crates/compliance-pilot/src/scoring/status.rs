use serde::{Deserialize, Serialize};

pub const EXCELLENT_FLOOR: i32 = 95;
pub const GOOD_FLOOR: i32 = 90;
pub const AT_RISK_FLOOR: i32 = 80;

/// Ordered status bands for an overall compliance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceStatus {
    Excellent,
    Good,
    AtRisk,
    Critical,
}

impl ComplianceStatus {
    pub const fn ordered() -> [Self; 4] {
        [Self::Excellent, Self::Good, Self::AtRisk, Self::Critical]
    }

    /// Bands use inclusive lower bounds checked from the top down, so values
    /// above 100 land in `Excellent` and negative values in `Critical`.
    pub const fn from_level(level: i32) -> Self {
        if level >= EXCELLENT_FLOOR {
            Self::Excellent
        } else if level >= GOOD_FLOOR {
            Self::Good
        } else if level >= AT_RISK_FLOOR {
            Self::AtRisk
        } else {
            Self::Critical
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::AtRisk => "At Risk",
            Self::Critical => "Critical",
        }
    }

    pub const fn tone(self) -> &'static str {
        match self {
            Self::Excellent => "You're in great shape",
            Self::Good => "Minor attention needed",
            Self::AtRisk => "Action recommended",
            Self::Critical => "Immediate focus required",
        }
    }

    pub const fn is_healthy(self) -> bool {
        matches!(self, Self::Excellent | Self::Good)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_inclusive_floors() {
        let cases = [
            (79, ComplianceStatus::Critical),
            (80, ComplianceStatus::AtRisk),
            (89, ComplianceStatus::AtRisk),
            (90, ComplianceStatus::Good),
            (94, ComplianceStatus::Good),
            (95, ComplianceStatus::Excellent),
        ];

        for (level, expected) in cases {
            assert_eq!(ComplianceStatus::from_level(level), expected, "level {level}");
        }
    }

    #[test]
    fn every_level_maps_to_exactly_one_band() {
        for level in 0..=100 {
            let status = ComplianceStatus::from_level(level);
            let matching = ComplianceStatus::ordered()
                .into_iter()
                .filter(|band| {
                    let (floor, ceiling) = match band {
                        ComplianceStatus::Excellent => (EXCELLENT_FLOOR, i32::MAX),
                        ComplianceStatus::Good => (GOOD_FLOOR, EXCELLENT_FLOOR),
                        ComplianceStatus::AtRisk => (AT_RISK_FLOOR, GOOD_FLOOR),
                        ComplianceStatus::Critical => (i32::MIN, AT_RISK_FLOOR),
                    };
                    level >= floor && level < ceiling
                })
                .collect::<Vec<_>>();
            assert_eq!(matching, vec![status], "level {level}");
        }
    }

    #[test]
    fn out_of_range_levels_saturate() {
        assert_eq!(ComplianceStatus::from_level(-12), ComplianceStatus::Critical);
        assert_eq!(ComplianceStatus::from_level(140), ComplianceStatus::Excellent);
    }

    #[test]
    fn labels_and_tones_pair_with_status() {
        assert_eq!(ComplianceStatus::Excellent.tone(), "You're in great shape");
        assert_eq!(ComplianceStatus::Good.tone(), "Minor attention needed");
        assert_eq!(ComplianceStatus::AtRisk.label(), "At Risk");
        assert_eq!(ComplianceStatus::AtRisk.tone(), "Action recommended");
        assert_eq!(ComplianceStatus::Critical.tone(), "Immediate focus required");
    }
}
