use compliance_pilot::dashboard::ComplianceDashboard;
use compliance_pilot::roles::Role;
use compliance_pilot::scoring::{
    compute_ocl, role_label, ComplianceMetrics, ComplianceResult, ComplianceStatus, Dimension,
    RiskBand, RiskLevel, MOCK_RISK_SCORE,
};

fn metrics(ccr: i32, otf: i32, cvf: i32, paf: i32) -> ComplianceMetrics {
    ComplianceMetrics::new(ccr, otf, cvf, paf).expect("metrics within 0..=100")
}

#[test]
fn mock_metrics_score_ninety_one_for_every_role() {
    let mock = ComplianceMetrics::mock();
    assert_eq!(compute_ocl(&mock), 91);

    for role in Role::ordered() {
        let result = ComplianceResult::evaluate(mock, Some(role), None);
        assert_eq!(result.level, 91, "{role} sees the enterprise level");
        assert_eq!(result.status, ComplianceStatus::Good);
        assert_eq!(result.status_label, "Good");
    }
}

#[test]
fn status_bands_are_inclusive_at_their_floors() {
    let cases = [
        (metrics(100, 100, 100, 100), 100, ComplianceStatus::Excellent),
        (metrics(95, 95, 95, 95), 95, ComplianceStatus::Excellent),
        (metrics(90, 90, 90, 90), 90, ComplianceStatus::Good),
        (metrics(80, 80, 80, 80), 80, ComplianceStatus::AtRisk),
        (metrics(79, 79, 79, 79), 79, ComplianceStatus::Critical),
        (metrics(0, 0, 0, 0), 0, ComplianceStatus::Critical),
    ];

    for (input, level, status) in cases {
        let result = ComplianceResult::evaluate(input, None, None);
        assert_eq!(result.level, level);
        assert_eq!(result.status, status, "level {level}");
    }
}

#[test]
fn weights_favour_completion_rate() {
    let completion_heavy = metrics(100, 0, 0, 0);
    let policy_heavy = metrics(0, 0, 0, 100);

    assert_eq!(compute_ocl(&completion_heavy), 40);
    assert_eq!(compute_ocl(&policy_heavy), 15);
}

#[test]
fn out_of_range_inputs_are_rejected() {
    let err = ComplianceMetrics::new(94, 101, 91, 88).expect_err("101 is out of range");
    assert_eq!(err.dimension, Dimension::Otf);
    assert_eq!(err.value, 101);

    assert!(ComplianceMetrics::new(-1, 87, 91, 88).is_err());
}

#[test]
fn role_labels_for_mock_level() {
    let expectations = [
        (
            Role::Clo,
            "Overall Compliance Level: 91%",
            "Risk concentrated in regulated roles",
        ),
        (
            Role::ChiefOfStaff,
            "Enterprise Compliance: 91%",
            "Two divisions below tolerance",
        ),
        (
            Role::HrAdmin,
            "Compliance Health: 91%",
            "47 items need remediation",
        ),
        (
            Role::LineManager,
            "Your Team Compliance: 87%",
            "3 actions required",
        ),
        (
            Role::DivisionDirector,
            "Division Compliance: 84%",
            "Above enterprise threshold",
        ),
    ];

    for (role, label, subtext) in expectations {
        let computed = role_label(role, 91, None);
        assert_eq!(computed.label, label);
        assert_eq!(computed.subtext, subtext);
    }
}

#[test]
fn risk_bands_use_inclusive_ceilings() {
    assert_eq!(RiskLevel::from_score(30).level, RiskBand::Low);
    assert_eq!(RiskLevel::from_score(31).level, RiskBand::Medium);
    assert_eq!(RiskLevel::from_score(60).level, RiskBand::Medium);

    let mock = RiskLevel::from_score(MOCK_RISK_SCORE);
    assert_eq!(mock.level, RiskBand::High);
    assert_eq!(mock.label, "Elevated Risk");
}

#[test]
fn weak_metrics_change_the_dashboard_insight() {
    let dashboard = ComplianceDashboard::build(
        Some(Role::ChiefOfStaff),
        metrics(70, 60, 80, 75),
        45,
        None,
    );

    assert_eq!(dashboard.compliance.level, 71);
    assert_eq!(dashboard.compliance.status, ComplianceStatus::Critical);
    assert_eq!(dashboard.headline, "Enterprise Compliance");
    assert_eq!(dashboard.risk.level, RiskBand::Medium);
    assert!(dashboard.key_insight.contains("overdue items"));
    assert_eq!(dashboard.industry_expectations.len(), 5);
}
