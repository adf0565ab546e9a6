pub mod error;
pub mod event_apis;
pub mod mappers;
pub mod notice_apis;
pub mod payment_apis;
pub mod student_apis;

pub use error::{ApiError, ApiResult};
