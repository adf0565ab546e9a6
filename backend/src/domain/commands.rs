//! Domain-level command types.
//!
//! These are what the services accept. The REST layer maps the public DTOs from
//! the `shared` crate (or raw request bodies) onto them.

pub mod students {
    #[derive(Debug, Clone)]
    pub struct CreateStudentCommand {
        pub name: String,
        pub phone: String,
    }
}

pub mod payments {
    /// Unvalidated payment toggle as received from the wire.
    ///
    /// Numeric fields arrive in textual form so that `"3"` and `3` are treated
    /// alike; `None` means the field was missing or null.
    #[derive(Debug, Clone, Default)]
    pub struct UpdatePaymentCommand {
        pub student_id: String,
        pub month: Option<String>,
        pub year: Option<String>,
        pub status: Option<String>,
    }
}

pub mod notices {
    use chrono::{DateTime, Utc};
    use shared::Priority;

    #[derive(Debug, Clone)]
    pub struct NoticeCommand {
        pub title: String,
        pub content: String,
        pub priority: Priority,
        pub expires_at: Option<DateTime<Utc>>,
    }
}

pub mod events {
    use shared::EventType;

    #[derive(Debug, Clone)]
    pub struct EventCommand {
        pub title: String,
        pub description: String,
        /// RFC 3339 or `YYYY-MM-DD`
        pub date: String,
        pub event_type: EventType,
        pub location: Option<String>,
    }
}
