use chrono::{DateTime, Utc};
use shared::{is_valid_period, PaymentStatus};
use std::fmt;

pub use shared::{MAX_YEAR, MIN_YEAR};

/// One billing cycle: month in 1..=12, year in MIN_YEAR..=MAX_YEAR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaymentPeriod {
    pub month: u32,
    pub year: i32,
}

impl PaymentPeriod {
    pub fn new(month: u32, year: i32) -> Option<Self> {
        is_valid_period(month, year).then_some(Self { month, year })
    }
}

impl fmt::Display for PaymentPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DomainPayment {
    pub id: i64,
    pub student_id: i64,
    pub period: PaymentPeriod,
    pub status: PaymentStatus,
    pub paid_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_bounds() {
        assert!(PaymentPeriod::new(1, 2000).is_some());
        assert!(PaymentPeriod::new(12, 2100).is_some());
        assert!(PaymentPeriod::new(0, 2024).is_none());
        assert!(PaymentPeriod::new(13, 2024).is_none());
        assert!(PaymentPeriod::new(6, 1999).is_none());
        assert!(PaymentPeriod::new(6, 2101).is_none());
    }

    #[test]
    fn test_period_display() {
        assert_eq!(PaymentPeriod::new(3, 2024).unwrap().to_string(), "03/2024");
    }
}
