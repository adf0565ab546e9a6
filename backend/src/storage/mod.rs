//! # Storage Module
//!
//! SQLite persistence for students, payments, notices and events.
//!
//! `DbConnection` owns the pool and the schema; each repository wraps a clone
//! of it and maps rows to domain models. Timestamps are stored as fixed-width
//! RFC 3339 text so ordering by the column is chronological.

pub mod connection;
pub mod repositories;

pub use connection::DbConnection;
pub use repositories::{
    EventRepository,
    NoticeRepository,
    PaymentRepository,
    StudentRepository,
};
