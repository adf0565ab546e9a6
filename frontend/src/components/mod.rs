pub mod add_student;
pub mod notice_board;
pub mod student_list;
