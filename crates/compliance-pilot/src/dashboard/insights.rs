use crate::scoring::ComplianceStatus;

pub(crate) fn key_insight(status: ComplianceStatus) -> &'static str {
    if status.is_healthy() {
        "High compliance does not always mean low risk. Continue monitoring high-risk roles."
    } else {
        "Focusing on overdue items and expiring certifications will have the biggest impact."
    }
}
