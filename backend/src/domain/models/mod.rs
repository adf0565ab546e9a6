pub mod event;
pub mod notice;
pub mod payment;
pub mod student;

pub use event::DomainEvent;
pub use notice::DomainNotice;
pub use payment::{DomainPayment, PaymentPeriod};
pub use student::DomainStudent;
