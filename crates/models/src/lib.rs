pub mod class_teacher_role;
pub mod interval;
pub mod role;
pub mod session_status;
pub mod timestamp;
