//! # Domain Module
//!
//! Business rules for the club: students, their monthly payments, notices and
//! events. Services validate commands, talk to the repositories and return
//! domain models; they know nothing about HTTP.
//!
//! ## Module Organization
//!
//! - **payment_service**: payment reconciliation (find-or-create + verify)
//! - **student_service**: student creation and loading with payment history
//! - **notice_service** / **event_service**: notice board and calendar CRUD
//! - **commands**: service inputs mapped from the public DTOs
//! - **validation**: shared parsing of ids, text fields and dates

pub mod commands;
pub mod error;
pub mod event_service;
pub mod models;
pub mod notice_service;
pub mod payment_service;
pub mod student_service;
pub mod validation;

pub use error::{DomainError, DomainResult};
pub use event_service::EventService;
pub use notice_service::NoticeService;
pub use payment_service::PaymentService;
pub use student_service::StudentService;
