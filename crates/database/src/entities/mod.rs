pub mod class_sessions;
pub mod class_students;
pub mod class_teachers;
pub mod classes;
pub mod schedules;
pub mod students;
pub mod teachers;
