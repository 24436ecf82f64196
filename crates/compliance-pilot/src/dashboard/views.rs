use super::insights::key_insight;
use crate::roles::Role;
use crate::scoring::{ComplianceMetrics, ComplianceResult, Dimension, RiskLevel, OCL_WEIGHTS};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickStat {
    pub dimension: Dimension,
    pub label: &'static str,
    pub value: String,
    pub sublabel: &'static str,
}

/// One row of the "How is this calculated?" explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricBreakdownEntry {
    pub dimension: Dimension,
    pub label: &'static str,
    pub weight_pct: u32,
    pub value: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndustryExpectation {
    pub industry: &'static str,
    pub expected_level: i32,
}

/// Display-only benchmarks; they never feed into the score.
pub const INDUSTRY_EXPECTATIONS: [IndustryExpectation; 5] = [
    IndustryExpectation {
        industry: "Aviation",
        expected_level: 97,
    },
    IndustryExpectation {
        industry: "Healthcare / Pharma",
        expected_level: 95,
    },
    IndustryExpectation {
        industry: "Banking / Finance",
        expected_level: 94,
    },
    IndustryExpectation {
        industry: "Oil & Gas",
        expected_level: 94,
    },
    IndustryExpectation {
        industry: "IT / Hospitality",
        expected_level: 90,
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct ComplianceDashboard {
    pub role: Option<Role>,
    pub compliance: ComplianceResult,
    pub headline: String,
    pub risk: RiskLevel,
    pub trend: Trend,
    pub quick_stats: Vec<QuickStat>,
    pub breakdown: Vec<MetricBreakdownEntry>,
    pub key_insight: &'static str,
    pub industry_expectations: Vec<IndustryExpectation>,
}

impl ComplianceDashboard {
    pub fn build(
        role: Option<Role>,
        metrics: ComplianceMetrics,
        risk_score: i32,
        risk_concentration: Option<&str>,
    ) -> Self {
        let compliance = ComplianceResult::evaluate(metrics, role, risk_concentration);
        let headline = compliance.headline().to_string();

        Self {
            role,
            headline,
            risk: RiskLevel::from_score(risk_score),
            trend: Trend::Stable,
            quick_stats: quick_stats(&metrics),
            breakdown: breakdown(&metrics),
            key_insight: key_insight(compliance.status),
            industry_expectations: INDUSTRY_EXPECTATIONS.to_vec(),
            compliance,
        }
    }
}

fn quick_stats(metrics: &ComplianceMetrics) -> Vec<QuickStat> {
    Dimension::ordered()
        .into_iter()
        .map(|dimension| {
            let (label, sublabel) = match dimension {
                Dimension::Ccr => ("Completed", "Training done"),
                Dimension::Otf => ("On-Time", "Timely completion"),
                Dimension::Cvf => ("Valid Certs", "Active certifications"),
                Dimension::Paf => ("Policies", "Acknowledged"),
            };
            QuickStat {
                dimension,
                label,
                value: format!("{}%", metrics.value(dimension)),
                sublabel,
            }
        })
        .collect()
}

fn breakdown(metrics: &ComplianceMetrics) -> Vec<MetricBreakdownEntry> {
    Dimension::ordered()
        .into_iter()
        .map(|dimension| MetricBreakdownEntry {
            dimension,
            label: dimension.label(),
            weight_pct: OCL_WEIGHTS.weight(dimension),
            value: metrics.value(dimension),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{ComplianceStatus, RiskBand, MOCK_RISK_SCORE};

    #[test]
    fn mock_dashboard_for_hr_admin() {
        let dashboard = ComplianceDashboard::build(
            Some(Role::HrAdmin),
            ComplianceMetrics::mock(),
            MOCK_RISK_SCORE,
            None,
        );

        assert_eq!(dashboard.compliance.level, 91);
        assert_eq!(dashboard.compliance.status, ComplianceStatus::Good);
        assert_eq!(dashboard.headline, "Compliance Health");
        assert_eq!(dashboard.risk.level, RiskBand::High);
        assert_eq!(dashboard.trend, Trend::Stable);
        assert!(dashboard.key_insight.starts_with("High compliance"));

        let values: Vec<&str> = dashboard
            .quick_stats
            .iter()
            .map(|stat| stat.value.as_str())
            .collect();
        assert_eq!(values, ["94%", "87%", "91%", "88%"]);
        assert_eq!(dashboard.quick_stats[2].label, "Valid Certs");
    }

    #[test]
    fn breakdown_lists_weights_in_dimension_order() {
        let dashboard =
            ComplianceDashboard::build(None, ComplianceMetrics::mock(), MOCK_RISK_SCORE, None);
        let weights: Vec<(&str, u32)> = dashboard
            .breakdown
            .iter()
            .map(|entry| (entry.label, entry.weight_pct))
            .collect();
        assert_eq!(
            weights,
            [
                ("Completion Rate", 40),
                ("On-Time Factor", 20),
                ("Cert Validity", 25),
                ("Policy Ack", 15),
            ]
        );
        assert_eq!(dashboard.headline, "Compliance Level");
    }

    #[test]
    fn critical_level_switches_key_insight() {
        let metrics = ComplianceMetrics::new(60, 55, 70, 65).expect("valid");
        let dashboard = ComplianceDashboard::build(Some(Role::Clo), metrics, 20, None);
        assert_eq!(dashboard.compliance.status, ComplianceStatus::Critical);
        assert!(dashboard.key_insight.contains("expiring certifications"));
        assert_eq!(dashboard.risk.label, "Low Risk");
    }

    #[test]
    fn industry_expectations_keep_display_order() {
        let industries: Vec<&str> = INDUSTRY_EXPECTATIONS
            .iter()
            .map(|entry| entry.industry)
            .collect();
        assert_eq!(
            industries,
            [
                "Aviation",
                "Healthcare / Pharma",
                "Banking / Finance",
                "Oil & Gas",
                "IT / Hospitality"
            ]
        );
    }
}
