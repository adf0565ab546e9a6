pub mod event_mapper;
pub mod notice_mapper;
pub mod student_mapper;

pub use event_mapper::EventMapper;
pub use notice_mapper::NoticeMapper;
pub use student_mapper::{PaymentUpdateBody, StudentMapper};
