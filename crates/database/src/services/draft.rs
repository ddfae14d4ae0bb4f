use crate::error::ServiceError;
use chrono::{DateTime, NaiveDate, Utc};
use models::{
    interval::{Interval, first_overlap},
    timestamp::{parse_day, parse_timestamp},
};
use uuid::Uuid;

/// Raw schedule fields as they arrive on the wire
#[derive(Debug, Clone, Default)]
pub struct ScheduleInput {
    pub class_id: Option<Uuid>,
    pub day: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Partial schedule update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default)]
pub struct SchedulePatch {
    pub class_id: Option<Uuid>,
    pub day: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// A schedule whose fields are present, well-formed and correctly ordered
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleDraft {
    pub class_id: Uuid,
    pub day: NaiveDate,
    pub interval: Interval,
}

/// A [`SchedulePatch`] with every supplied field parsed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPatch {
    pub class_id: Option<Uuid>,
    pub day: Option<NaiveDate>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl TryFrom<ScheduleInput> for ScheduleDraft {
    type Error = ServiceError;

    fn try_from(input: ScheduleInput) -> Result<Self, Self::Error> {
        let class_id = required(input.class_id, "class_id")?;
        let day = parse_day_field(&required(input.day, "day")?)?;
        let start = parse_time_field(&required(input.start_time, "start_time")?, "start_time")?;
        let end = parse_time_field(&required(input.end_time, "end_time")?, "end_time")?;

        Ok(Self {
            class_id,
            day,
            interval: ordered(start, end)?,
        })
    }
}

impl SchedulePatch {
    /// Parses the supplied fields; ordering is checked later against the stored values
    pub fn parse(self) -> Result<ParsedPatch, ServiceError> {
        Ok(ParsedPatch {
            class_id: self.class_id,
            day: self.day.as_deref().map(parse_day_field).transpose()?,
            start_time: self
                .start_time
                .as_deref()
                .map(|v| parse_time_field(v, "start_time"))
                .transpose()?,
            end_time: self
                .end_time
                .as_deref()
                .map(|v| parse_time_field(v, "end_time"))
                .transpose()?,
        })
    }
}

impl ParsedPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Rejects a batch in which two drafts for the same class overlap
pub fn check_batch(drafts: &[ScheduleDraft]) -> Result<(), ServiceError> {
    let entries: Vec<(Uuid, Interval)> = drafts.iter().map(|d| (d.class_id, d.interval)).collect();

    match first_overlap(&entries) {
        Some((i, j)) => Err(ServiceError::Conflict(format!(
            "Schedules #{} and #{} overlap for class {}",
            i + 1,
            j + 1,
            drafts[i].class_id
        ))),
        None => Ok(()),
    }
}

/// Builds the interval, failing when `start` is not before `end`
pub(crate) fn ordered(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Interval, ServiceError> {
    Interval::new(start, end)
        .ok_or_else(|| ServiceError::Validation("start_time must be before end_time".into()))
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, ServiceError> {
    value.ok_or_else(|| ServiceError::Validation(format!("{field} is required")))
}

fn parse_time_field(value: &str, field: &str) -> Result<DateTime<Utc>, ServiceError> {
    parse_timestamp(value).ok_or_else(|| {
        ServiceError::Validation(format!("{field} must be an ISO-8601 date-time, got {value:?}"))
    })
}

fn parse_day_field(value: &str) -> Result<NaiveDate, ServiceError> {
    parse_day(value).ok_or_else(|| {
        ServiceError::Validation(format!("day must be an ISO-8601 date, got {value:?}"))
    })
}
