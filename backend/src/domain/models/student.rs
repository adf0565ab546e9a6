use chrono::{DateTime, Utc};

use super::payment::DomainPayment;

#[derive(Debug, Clone, PartialEq)]
pub struct DomainStudent {
    pub id: i64,
    pub name: String,
    pub phone: String,
    /// Ordered by year descending, then month ascending
    pub payments: Vec<DomainPayment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
