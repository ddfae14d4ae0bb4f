pub mod class_session;
pub mod schedule;
