use super::status::{ComplianceStatus, GOOD_FLOOR};
use crate::roles::Role;
use serde::Serialize;

/// Team figures trail the enterprise level by this many points.
pub const LINE_MANAGER_OFFSET: i32 = 4;
/// Division figures trail the enterprise level by this many points.
pub const DIVISION_DIRECTOR_OFFSET: i32 = 7;

const DEFAULT_RISK_CONCENTRATION: &str = "Risk concentrated in regulated roles";

/// Role-personalized headline and subtext for the compliance level card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleLabel {
    pub label: String,
    pub subtext: String,
}

impl RoleLabel {
    /// Label used when no role has been selected.
    pub fn generic(level: i32) -> Self {
        Self {
            label: format!("Compliance Level: {level}%"),
            subtext: String::new(),
        }
    }
}

/// Derive the role-specific label for an overall compliance level.
///
/// The line manager and division director figures are offset for display only;
/// the status band always comes from the unadjusted `level`.
pub fn role_label(role: Role, level: i32, risk_concentration: Option<&str>) -> RoleLabel {
    let status = ComplianceStatus::from_level(level);

    let (label, subtext) = match role {
        Role::Clo => (
            format!("Overall Compliance Level: {level}%"),
            risk_concentration
                .filter(|text| !text.is_empty())
                .unwrap_or(DEFAULT_RISK_CONCENTRATION)
                .to_string(),
        ),
        Role::ChiefOfStaff => (
            format!("Enterprise Compliance: {level}%"),
            if status == ComplianceStatus::Excellent {
                "All divisions within tolerance"
            } else {
                "Two divisions below tolerance"
            }
            .to_string(),
        ),
        Role::HrAdmin => (
            format!("Compliance Health: {level}%"),
            "47 items need remediation".to_string(),
        ),
        Role::LineManager => (
            format!("Your Team Compliance: {}%", level - LINE_MANAGER_OFFSET),
            "3 actions required".to_string(),
        ),
        Role::DivisionDirector => (
            format!(
                "Division Compliance: {}%",
                level - DIVISION_DIRECTOR_OFFSET
            ),
            if level >= GOOD_FLOOR {
                "Above enterprise threshold"
            } else {
                "Below enterprise threshold"
            }
            .to_string(),
        ),
    };

    RoleLabel { label, subtext }
}
