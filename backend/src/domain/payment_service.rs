//! # Payment Reconciliation
//!
//! Sets the status of one student's payment for one period and returns the
//! refreshed student.
//!
//! Flow of `update_payment`:
//! 1. validate id, month, year and status (nothing is written on failure)
//! 2. make sure the student exists
//! 3. find-or-create the (student, month, year) row and set status/paid_at
//!    in a single upsert
//! 4. reload the student with all payments
//! 5. check that the row we wrote is there with the requested status
//!
//! `paid_at` is stamped with the server clock whenever the new status is paid,
//! including paid→paid, so it always records the last confirmation. It is
//! cleared when the status becomes unpaid.

use chrono::Utc;
use shared::PaymentStatus;
use tracing::{error, info, warn};

use super::commands::payments::UpdatePaymentCommand;
use super::error::{DomainError, DomainResult};
use super::models::payment::{MAX_YEAR, MIN_YEAR};
use super::models::{DomainStudent, PaymentPeriod};
use super::student_service::StudentService;
use super::validation::parse_record_id;
use crate::storage::PaymentRepository;

/// A payment toggle that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedPaymentUpdate {
    pub student_id: i64,
    pub period: PaymentPeriod,
    pub status: PaymentStatus,
}

impl ValidatedPaymentUpdate {
    pub fn parse(command: &UpdatePaymentCommand) -> DomainResult<Self> {
        let student_id = parse_record_id(&command.student_id, "student")?;

        let month = parse_integer(command.month.as_deref(), "month")?;
        if !(1..=12).contains(&month) {
            return Err(DomainError::invalid(format!(
                "Month must be between 1 and 12, got {month}"
            )));
        }

        let year = parse_integer(command.year.as_deref(), "year")?;
        if !(i64::from(MIN_YEAR)..=i64::from(MAX_YEAR)).contains(&year) {
            return Err(DomainError::invalid(format!(
                "Year must be between {MIN_YEAR} and {MAX_YEAR}, got {year}"
            )));
        }

        let status = command
            .status
            .as_deref()
            .ok_or_else(|| DomainError::invalid("Status is required"))?
            .parse::<PaymentStatus>()
            .map_err(|e| DomainError::invalid(format!("{e}: expected 'paid' or 'unpaid'")))?;

        // both values were range-checked above
        let period = PaymentPeriod::new(month as u32, year as i32)
            .ok_or_else(|| DomainError::invalid("Invalid payment period"))?;

        Ok(Self {
            student_id,
            period,
            status,
        })
    }
}

fn parse_integer(raw: Option<&str>, field: &str) -> DomainResult<i64> {
    let raw = raw.ok_or_else(|| DomainError::invalid(format!("{field} is required")))?;
    raw.parse::<i64>()
        .map_err(|_| DomainError::invalid(format!("Invalid {field}: '{raw}' is not an integer")))
}

/// Check that the refreshed student carries the row we just wrote
pub fn verify_written_payment(
    student: &DomainStudent,
    payment_id: i64,
    expected: &ValidatedPaymentUpdate,
) -> DomainResult<()> {
    let written = student.payments.iter().find(|p| p.id == payment_id);

    match written {
        Some(payment) if payment.period == expected.period && payment.status == expected.status => {
            Ok(())
        }
        Some(payment) => {
            let details = format!(
                "payment {} expected {} for {}, found {} for {}",
                payment_id, expected.status, expected.period, payment.status, payment.period
            );
            error!("Payment verification failed for student {}: {}", student.id, details);
            Err(DomainError::Internal {
                message: "Payment update could not be verified".to_string(),
                details: Some(details),
            })
        }
        None => {
            let details = format!(
                "payment {} for {} missing from student {} after write",
                payment_id, expected.period, student.id
            );
            error!("Payment verification failed: {}", details);
            Err(DomainError::Internal {
                message: "Payment update could not be verified".to_string(),
                details: Some(details),
            })
        }
    }
}

#[derive(Clone)]
pub struct PaymentService {
    student_service: StudentService,
    payments: PaymentRepository,
}

impl PaymentService {
    pub fn new(student_service: StudentService, payments: PaymentRepository) -> Self {
        Self {
            student_service,
            payments,
        }
    }

    /// Set the status for one (student, month, year) and return the refreshed student
    pub async fn update_payment(&self, command: UpdatePaymentCommand) -> DomainResult<DomainStudent> {
        let update = ValidatedPaymentUpdate::parse(&command)?;
        info!(
            "Updating payment: student={} period={} status={}",
            update.student_id, update.period, update.status
        );

        if !self.student_service.student_exists(update.student_id).await? {
            warn!("Payment update for unknown student: {}", update.student_id);
            return Err(DomainError::not_found(format!(
                "Student not found: {}",
                update.student_id
            )));
        }

        let paid_at = update.status.is_paid().then(Utc::now);
        let payment_id = self
            .payments
            .upsert_payment(update.student_id, update.period, update.status, paid_at)
            .await?;

        let refreshed = self
            .student_service
            .load_student(update.student_id)
            .await?
            .ok_or_else(|| DomainError::Internal {
                message: "Payment update could not be verified".to_string(),
                details: Some(format!(
                    "student {} disappeared after payment write",
                    update.student_id
                )),
            })?;

        verify_written_payment(&refreshed, payment_id, &update)?;

        info!(
            "Payment {} for student {} is now {} ({})",
            payment_id, update.student_id, update.status, update.period
        );
        Ok(refreshed)
    }
}
