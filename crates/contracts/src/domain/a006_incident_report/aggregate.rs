use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reasons offered by the kitchen; free text is accepted too.
pub const REPORT_REASONS: &[&str] = &["Broken", "Waste", "Refund", "Complaint"];

/// Problem logged against a served item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentReport {
    pub id: String,
    pub order_id: String,
    pub item_name: String,
    pub reason: String,
    pub reported_by: String,
    pub quantity: u32,
    /// Whether a replacement was sent to the kitchen
    pub redo: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload of POST /api/reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentReportDto {
    pub order_id: String,
    pub item_name: String,
    pub reason: String,
    #[serde(default)]
    pub reported_by: Option<String>,
    #[serde(default = "one")]
    pub quantity: u32,
    #[serde(default)]
    pub redo: bool,
}

fn one() -> u32 {
    1
}

impl IncidentReportDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.order_id.trim().is_empty() {
            return Err("Order id is required".into());
        }
        if self.item_name.trim().is_empty() {
            return Err("Item name is required".into());
        }
        if self.reason.trim().is_empty() {
            return Err("Give a reason".into());
        }
        if self.quantity == 0 {
            return Err("Quantity must be at least 1".into());
        }
        Ok(())
    }

    /// `reported_by` falls back to the logged-in user.
    pub fn into_report(self, current_user: &str) -> IncidentReport {
        let reported_by = self
            .reported_by
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| current_user.to_string());
        IncidentReport {
            id: uuid::Uuid::new_v4().to_string(),
            order_id: self.order_id,
            item_name: self.item_name.trim().to_string(),
            reason: normalize_reason(&self.reason),
            reported_by,
            quantity: self.quantity,
            redo: self.redo,
            created_at: Utc::now(),
        }
    }
}

/// Known reasons are matched case-insensitively and stored in their canonical spelling.
pub fn normalize_reason(reason: &str) -> String {
    let trimmed = reason.trim();
    REPORT_REASONS
        .iter()
        .find(|r| r.eq_ignore_ascii_case(trimmed))
        .map(|r| r.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Note put on the replacement line sent to the kitchen
pub fn redo_note(reason: &str) -> String {
    format!("REDO: {}", normalize_reason(reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dto_defaults_and_reporter_fallback() {
        let dto: IncidentReportDto = serde_json::from_str(
            r#"{"order_id":"abc","item_name":"Full English","reason":"complaint"}"#,
        )
        .unwrap();
        assert_eq!(dto.quantity, 1);
        assert!(!dto.redo);
        assert!(dto.validate().is_ok());

        let report = dto.into_report("max");
        assert_eq!(report.reason, "Complaint");
        assert_eq!(report.reported_by, "max");
    }

    #[test]
    fn test_free_text_reason_is_kept() {
        assert_eq!(normalize_reason("  cold food "), "cold food");
        assert_eq!(redo_note("WASTE"), "REDO: Waste");
    }
}
