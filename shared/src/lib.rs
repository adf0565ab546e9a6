use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod roster;

pub use roster::{FilterOptions, PaymentSync, RosterState, RosterSummary};

/// Billing years accepted by the server
pub const MIN_YEAR: i32 = 2000;
pub const MAX_YEAR: i32 = 2100;

/// Month in 1..=12 and year in MIN_YEAR..=MAX_YEAR
pub fn is_valid_period(month: u32, year: i32) -> bool {
    (1..=12).contains(&month) && (MIN_YEAR..=MAX_YEAR).contains(&year)
}

/// Payment status for one billing period
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    #[default]
    Unpaid,
}

impl PaymentStatus {
    /// The opposite status, used by the toggle
    pub fn toggled(self) -> Self {
        match self {
            PaymentStatus::Paid => PaymentStatus::Unpaid,
            PaymentStatus::Unpaid => PaymentStatus::Paid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Unpaid => "unpaid",
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, PaymentStatus::Paid)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive match on "paid" / "unpaid"
impl FromStr for PaymentStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paid" => Ok(PaymentStatus::Paid),
            "unpaid" => Ok(PaymentStatus::Unpaid),
            other => Err(StatusParseError::new("payment status", other)),
        }
    }
}

/// Priority of a team notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(StatusParseError::new("priority", other)),
        }
    }
}

/// Kind of team event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Meeting,
    Competition,
    Training,
    Other,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Meeting => "meeting",
            EventType::Competition => "competition",
            EventType::Training => "training",
            EventType::Other => "other",
        }
    }
}

impl FromStr for EventType {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "meeting" => Ok(EventType::Meeting),
            "competition" => Ok(EventType::Competition),
            "training" => Ok(EventType::Training),
            "other" => Ok(EventType::Other),
            other => Err(StatusParseError::new("event type", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusParseError {
    kind: &'static str,
    value: String,
}

impl StatusParseError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for StatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid {}: '{}'", self.kind, self.value)
    }
}

impl std::error::Error for StatusParseError {}

/// A club member. Payments are ordered by year descending, then month ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub payments: Vec<Payment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// Payment row for a period, if one exists
    pub fn payment_for(&self, month: u32, year: i32) -> Option<&Payment> {
        self.payments
            .iter()
            .find(|p| p.month == month && p.year == year)
    }

    /// Status for a period; a missing row counts as unpaid
    pub fn payment_status(&self, month: u32, year: i32) -> PaymentStatus {
        self.payment_for(month, year)
            .map(|p| p.status)
            .unwrap_or_default()
    }
}

/// One (student, month, year) payment row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Server ids are positive; optimistic rows created on the client are negative
    pub id: i64,
    pub student_id: i64,
    pub month: u32,
    pub year: i32,
    pub status: PaymentStatus,
    pub paid_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    pub name: String,
    pub phone: String,
}

/// Body of `PUT /api/students/{id}/payment`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentRequest {
    pub month: u32,
    pub year: i32,
    pub status: PaymentStatus,
    /// Informational only, the server stamps its own time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeRequest {
    pub title: String,
    pub content: String,
    pub priority: Priority,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// RFC 3339 timestamp
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    pub title: String,
    pub description: String,
    /// RFC 3339 or plain `YYYY-MM-DD`
    pub date: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub location: Option<String>,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_status_parse_is_exact() {
        assert_eq!("paid".parse::<PaymentStatus>(), Ok(PaymentStatus::Paid));
        assert_eq!("unpaid".parse::<PaymentStatus>(), Ok(PaymentStatus::Unpaid));
        assert!("PAID".parse::<PaymentStatus>().is_err());
        assert!("".parse::<PaymentStatus>().is_err());
        assert!(" paid".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn test_payment_status_toggled() {
        assert_eq!(PaymentStatus::Paid.toggled(), PaymentStatus::Unpaid);
        assert_eq!(PaymentStatus::Unpaid.toggled(), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::default(), PaymentStatus::Unpaid);
    }

    #[test]
    fn test_period_bounds() {
        assert!(is_valid_period(1, MIN_YEAR));
        assert!(is_valid_period(12, MAX_YEAR));
        assert!(!is_valid_period(0, 2024));
        assert!(!is_valid_period(13, 2024));
        assert!(!is_valid_period(6, MIN_YEAR - 1));
        assert!(!is_valid_period(6, MAX_YEAR + 1));
    }

    #[test]
    fn test_student_wire_shape_is_camel_case() {
        let json = serde_json::json!({
            "id": 7,
            "name": "Ana",
            "phone": "555-0101",
            "payments": [{
                "id": 1,
                "studentId": 7,
                "month": 3,
                "year": 2024,
                "status": "paid",
                "paidAt": "2024-03-05T10:00:00Z"
            }],
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        });

        let student: Student = serde_json::from_value(json).expect("student should deserialize");
        assert_eq!(student.payments.len(), 1);
        assert_eq!(student.payment_status(3, 2024), PaymentStatus::Paid);
        assert_eq!(student.payment_status(4, 2024), PaymentStatus::Unpaid);

        let back = serde_json::to_value(&student).expect("student should serialize");
        assert_eq!(back["payments"][0]["studentId"], 7);
        assert_eq!(back["payments"][0]["status"], "paid");
    }

    #[test]
    fn test_update_payment_request_omits_missing_paid_at() {
        let request = UpdatePaymentRequest {
            month: 3,
            year: 2024,
            status: PaymentStatus::Unpaid,
            paid_at: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, serde_json::json!({"month": 3, "year": 2024, "status": "unpaid"}));
    }

    #[test]
    fn test_event_type_field_is_named_type() {
        let event = Event {
            id: 1,
            title: "Regional cup".to_string(),
            description: "Away match".to_string(),
            date: "2024-05-01T09:00:00Z".parse().unwrap(),
            event_type: EventType::Competition,
            location: None,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "competition");
        assert!(value.get("eventType").is_none());
    }

    #[test]
    fn test_priority_and_event_type_parse() {
        assert_eq!("high".parse::<Priority>(), Ok(Priority::High));
        assert!("urgent".parse::<Priority>().is_err());
        assert_eq!("training".parse::<EventType>(), Ok(EventType::Training));
        assert_eq!(
            "party".parse::<EventType>().unwrap_err().to_string(),
            "Invalid event type: 'party'"
        );
    }
}
