//! # Client Roster State
//!
//! The student list as held by the UI, plus the optimistic payment toggle.
//!
//! `RosterState` is a value: every operation returns a new state with a new
//! student collection, and only the affected student entry differs from the
//! previous one. The UI layer owns the current state and swaps it wholesale,
//! which keeps change detection trivial.
//!
//! A toggle flips the local status first and hands back the request to send.
//! `sync_payment` then pushes that request through a `PaymentSync`
//! implementation. A failed sync is logged and otherwise ignored: the local
//! view keeps the optimistic value and nothing is retried.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use tracing::{error, info};

use crate::{is_valid_period, Payment, PaymentStatus, Student, UpdatePaymentRequest};

/// Backend seam used to push an optimistic change to the server
#[async_trait(?Send)]
pub trait PaymentSync {
    async fn update_payment(
        &self,
        student_id: i64,
        request: &UpdatePaymentRequest,
    ) -> Result<Student, String>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct RosterState {
    students: Vec<Student>,
    next_temp_id: i64,
}

impl Default for RosterState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Result of an optimistic toggle: the new local state and the request to sync
#[derive(Debug, Clone, PartialEq)]
pub struct OptimisticToggle {
    pub state: RosterState,
    pub student_id: i64,
    pub request: UpdatePaymentRequest,
}

impl RosterState {
    pub fn new(students: Vec<Student>) -> Self {
        Self {
            students,
            next_temp_id: -1,
        }
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn student(&self, student_id: i64) -> Option<&Student> {
        self.students.iter().find(|s| s.id == student_id)
    }

    /// Replace the whole list, e.g. after the initial load
    pub fn with_students(&self, students: Vec<Student>) -> Self {
        Self {
            students,
            next_temp_id: self.next_temp_id,
        }
    }

    /// Append a newly created student
    pub fn with_added(&self, student: Student) -> Self {
        let mut students = self.students.clone();
        students.push(student);
        self.with_students(students)
    }

    /// Swap in a single student, leaving every other entry untouched
    pub fn with_replaced(&self, student: Student) -> Self {
        let students = self
            .students
            .iter()
            .map(|s| if s.id == student.id { student.clone() } else { s.clone() })
            .collect();
        self.with_students(students)
    }

    /// Flip the payment status of one student for (month, year).
    ///
    /// Returns `None` when the student is not in the local view or the period
    /// is one the server would reject.
    pub fn toggle_payment(
        &self,
        student_id: i64,
        month: u32,
        year: i32,
        now: DateTime<Utc>,
    ) -> Option<OptimisticToggle> {
        if !is_valid_period(month, year) {
            return None;
        }
        let current = self.student(student_id)?;
        let new_status = current.payment_status(month, year).toggled();
        let paid_at = new_status.is_paid().then_some(now);

        let mut updated = current.clone();
        let mut next_temp_id = self.next_temp_id;
        match updated
            .payments
            .iter_mut()
            .find(|p| p.month == month && p.year == year)
        {
            Some(payment) => {
                payment.status = new_status;
                payment.paid_at = paid_at;
            }
            None => {
                updated.payments.push(Payment {
                    id: next_temp_id,
                    student_id,
                    month,
                    year,
                    status: new_status,
                    paid_at,
                });
                next_temp_id -= 1;
            }
        }

        let mut state = self.with_replaced(updated);
        state.next_temp_id = next_temp_id;

        Some(OptimisticToggle {
            state,
            student_id,
            request: UpdatePaymentRequest {
                month,
                year,
                status: new_status,
                paid_at,
            },
        })
    }

    /// Students shown for the given filter
    pub fn filtered(&self, filter: &FilterOptions) -> Vec<&Student> {
        self.students
            .iter()
            .filter(|s| {
                !filter.show_only_unpaid
                    || s.payment_status(filter.month, filter.year) == PaymentStatus::Unpaid
            })
            .collect()
    }

    /// Dashboard counters for one period
    pub fn summary(&self, month: u32, year: i32) -> RosterSummary {
        let total = self.students.len();
        let paid = self
            .students
            .iter()
            .filter(|s| s.payment_status(month, year).is_paid())
            .count();
        let paid_percentage = if total == 0 {
            0.0
        } else {
            paid as f64 / total as f64 * 100.0
        };

        RosterSummary {
            total,
            paid,
            unpaid: total - paid,
            paid_percentage,
        }
    }
}

/// Push an optimistic toggle to the server.
///
/// Returns whether the server accepted it. The local state is never reverted.
pub async fn sync_payment<S>(sync: &S, toggle: &OptimisticToggle) -> bool
where
    S: PaymentSync + ?Sized,
{
    match sync.update_payment(toggle.student_id, &toggle.request).await {
        Ok(_) => {
            info!(
                "Payment synced: student={} period={}/{} status={}",
                toggle.student_id, toggle.request.month, toggle.request.year, toggle.request.status
            );
            true
        }
        Err(e) => {
            error!(
                "Failed to sync payment for student {} ({}/{}): {}",
                toggle.student_id, toggle.request.month, toggle.request.year, e
            );
            false
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOptions {
    pub show_only_unpaid: bool,
    pub month: u32,
    pub year: i32,
}

impl FilterOptions {
    pub fn for_period(month: u32, year: i32) -> Self {
        Self {
            show_only_unpaid: false,
            month,
            year,
        }
    }
}

impl Default for FilterOptions {
    fn default() -> Self {
        let now = Utc::now();
        Self::for_period(now.month(), now.year())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RosterSummary {
    pub total: usize,
    pub paid: usize,
    pub unpaid: usize,
    pub paid_percentage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn student(id: i64, name: &str, payments: Vec<Payment>) -> Student {
        let created: DateTime<Utc> = "2024-01-01T00:00:00Z".parse().unwrap();
        Student {
            id,
            name: name.to_string(),
            phone: "555-0100".to_string(),
            payments,
            created_at: created,
            updated_at: created,
        }
    }

    fn paid(id: i64, student_id: i64, month: u32, year: i32) -> Payment {
        Payment {
            id,
            student_id,
            month,
            year,
            status: PaymentStatus::Paid,
            paid_at: Some("2024-03-02T12:00:00Z".parse().unwrap()),
        }
    }

    fn now() -> DateTime<Utc> {
        "2024-03-10T08:30:00Z".parse().unwrap()
    }

    struct OfflineSync;

    #[async_trait(?Send)]
    impl PaymentSync for OfflineSync {
        async fn update_payment(
            &self,
            _student_id: i64,
            _request: &UpdatePaymentRequest,
        ) -> Result<Student, String> {
            Err("Network error: connection refused".to_string())
        }
    }

    struct RecordingSync {
        calls: RefCell<Vec<(i64, UpdatePaymentRequest)>>,
    }

    #[async_trait(?Send)]
    impl PaymentSync for RecordingSync {
        async fn update_payment(
            &self,
            student_id: i64,
            request: &UpdatePaymentRequest,
        ) -> Result<Student, String> {
            self.calls.borrow_mut().push((student_id, request.clone()));
            Ok(student(student_id, "server", vec![]))
        }
    }

    #[test]
    fn test_toggle_creates_local_row_with_temp_id() {
        let state = RosterState::new(vec![student(1, "Ana", vec![])]);

        let toggle = state.toggle_payment(1, 3, 2024, now()).expect("student exists");
        let updated = toggle.state.student(1).unwrap();
        let payment = updated.payment_for(3, 2024).expect("row synthesized");

        assert_eq!(payment.status, PaymentStatus::Paid);
        assert_eq!(payment.paid_at, Some(now()));
        assert!(payment.id < 0);
        assert_eq!(toggle.request.status, PaymentStatus::Paid);
        assert_eq!(toggle.request.paid_at, Some(now()));

        // the previous state is untouched
        assert!(state.student(1).unwrap().payments.is_empty());
    }

    #[test]
    fn test_toggle_existing_row_updates_in_place() {
        let state = RosterState::new(vec![student(1, "Ana", vec![paid(42, 1, 3, 2024)])]);

        let toggle = state.toggle_payment(1, 3, 2024, now()).unwrap();
        let payments = &toggle.state.student(1).unwrap().payments;

        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].id, 42);
        assert_eq!(payments[0].status, PaymentStatus::Unpaid);
        assert_eq!(payments[0].paid_at, None);
        assert_eq!(toggle.request.status, PaymentStatus::Unpaid);
    }

    #[test]
    fn test_toggle_twice_restores_status() {
        let state = RosterState::new(vec![student(1, "Ana", vec![])]);

        let first = state.toggle_payment(1, 5, 2024, now()).unwrap();
        let second = first.state.toggle_payment(1, 5, 2024, now()).unwrap();
        let payments = &second.state.student(1).unwrap().payments;

        assert_eq!(payments.len(), 1, "second toggle reuses the synthesized row");
        assert_eq!(payments[0].status, PaymentStatus::Unpaid);
        assert_eq!(payments[0].paid_at, None);
    }

    #[test]
    fn test_temp_ids_are_unique() {
        let state = RosterState::new(vec![student(1, "Ana", vec![]), student(2, "Bia", vec![])]);

        let a = state.toggle_payment(1, 1, 2024, now()).unwrap();
        let b = a.state.toggle_payment(2, 1, 2024, now()).unwrap();

        let id_a = b.state.student(1).unwrap().payments[0].id;
        let id_b = b.state.student(2).unwrap().payments[0].id;
        assert_ne!(id_a, id_b);
    }

    #[test]
    fn test_toggle_only_replaces_affected_student() {
        let other = student(2, "Bia", vec![paid(9, 2, 3, 2024)]);
        let state = RosterState::new(vec![student(1, "Ana", vec![]), other.clone()]);

        let toggle = state.toggle_payment(1, 3, 2024, now()).unwrap();

        assert_eq!(toggle.state.students().len(), 2);
        assert_eq!(toggle.state.student(2), Some(&other));
    }

    #[test]
    fn test_toggle_unknown_student_is_noop() {
        let state = RosterState::new(vec![student(1, "Ana", vec![])]);
        assert!(state.toggle_payment(99, 3, 2024, now()).is_none());
    }

    #[test]
    fn test_toggle_out_of_range_period_is_noop() {
        let state = RosterState::new(vec![student(1, "Ana", vec![])]);

        assert!(state.toggle_payment(1, 13, 2024, now()).is_none());
        assert!(state.toggle_payment(1, 0, 2024, now()).is_none());
        assert!(state.toggle_payment(1, 12, 1999, now()).is_none());
        assert!(state.toggle_payment(1, 1, 2101, now()).is_none());
        assert!(state.toggle_payment(1, 12, 2100, now()).is_some());
        assert!(state.student(1).unwrap().payments.is_empty());
    }

    #[tokio::test]
    async fn test_offline_toggle_keeps_optimistic_state() {
        let state = RosterState::new(vec![student(1, "Ana", vec![])]);

        let toggle = state.toggle_payment(1, 3, 2024, now()).unwrap();
        // the view already reflects the change before any network call
        assert_eq!(
            toggle.state.student(1).unwrap().payment_status(3, 2024),
            PaymentStatus::Paid
        );

        let synced = sync_payment(&OfflineSync, &toggle).await;

        assert!(!synced);
        assert_eq!(
            toggle.state.student(1).unwrap().payment_status(3, 2024),
            PaymentStatus::Paid
        );
    }

    #[tokio::test]
    async fn test_sync_sends_toggle_request() {
        let state = RosterState::new(vec![student(4, "Caio", vec![])]);
        let toggle = state.toggle_payment(4, 12, 2025, now()).unwrap();
        let sync = RecordingSync {
            calls: RefCell::new(Vec::new()),
        };

        assert!(sync_payment(&sync, &toggle).await);

        let calls = sync.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, 4);
        assert_eq!(calls[0].1.month, 12);
        assert_eq!(calls[0].1.year, 2025);
        assert_eq!(calls[0].1.status, PaymentStatus::Paid);
    }

    #[test]
    fn test_filter_only_unpaid() {
        let state = RosterState::new(vec![
            student(1, "Ana", vec![paid(1, 1, 3, 2024)]),
            student(2, "Bia", vec![]),
        ]);

        let mut filter = FilterOptions::for_period(3, 2024);
        assert_eq!(state.filtered(&filter).len(), 2);

        filter.show_only_unpaid = true;
        let shown = state.filtered(&filter);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].id, 2);
    }

    #[test]
    fn test_summary_counts() {
        let state = RosterState::new(vec![
            student(1, "Ana", vec![paid(1, 1, 3, 2024)]),
            student(2, "Bia", vec![paid(2, 2, 4, 2024)]),
            student(3, "Caio", vec![]),
            student(4, "Duda", vec![paid(3, 4, 3, 2024)]),
        ]);

        let summary = state.summary(3, 2024);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.paid, 2);
        assert_eq!(summary.unpaid, 2);
        assert!((summary.paid_percentage - 50.0).abs() < f64::EPSILON);

        assert_eq!(RosterState::default().summary(3, 2024).paid_percentage, 0.0);
    }

    #[test]
    fn test_with_added_and_replaced() {
        let state = RosterState::default().with_added(student(1, "Ana", vec![]));
        assert_eq!(state.students().len(), 1);

        let renamed = student(1, "Ana Paula", vec![paid(5, 1, 1, 2024)]);
        let state = state.with_replaced(renamed.clone());
        assert_eq!(state.student(1), Some(&renamed));
    }
}
