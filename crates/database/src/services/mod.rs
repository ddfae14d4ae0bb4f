pub mod actor;
pub mod bulk_schedule;
pub mod class_session;
pub mod draft;
pub mod mirror;
pub mod overlap;
pub mod query_schedule;
pub mod schedule;

use bulk_schedule::BulkScheduleService;
use class_session::ClassSessionService;
use query_schedule::QueryScheduleService;
use schedule::ScheduleService;

/// Schedule services wired to the class session module
pub type Schedules = ScheduleService<ClassSessionService>;
pub type BulkSchedules = BulkScheduleService<ClassSessionService>;
pub type ScheduleQueries = QueryScheduleService<ClassSessionService>;
