use crate::{
    entities::{
        class_sessions, class_students, class_teachers, classes, schedules, students, teachers,
    },
    error::ServiceError,
    services::{mirror::SessionMirror, schedule::find_class},
};
use chrono::NaiveDate;
use models::{class_teacher_role::ClassTeacherRole, timestamp::parse_day};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use std::{collections::HashMap, marker::PhantomData};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct AssignedTeacher {
    pub teacher: teachers::Model,
    pub role: ClassTeacherRole,
}

/// A schedule with its class, the class's teachers and its derived sessions
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleDetail {
    pub schedule: schedules::Model,
    pub class: classes::Model,
    pub teachers: Vec<AssignedTeacher>,
    pub sessions: Vec<class_sessions::Model>,
}

/// A schedule labelled with its class name and teachers, as listed for a
/// student or a teacher
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedSchedule {
    pub schedule: schedules::Model,
    pub class_name: String,
    pub teachers: Vec<AssignedTeacher>,
}

/// Result of [`QueryScheduleService::get_by_class_or_day`]
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleLookup {
    ByClass(Vec<schedules::Model>),
    ByDay(Vec<ScheduleDetail>),
}

pub struct QueryScheduleService<M>(PhantomData<M>);

impl<M: SessionMirror> QueryScheduleService<M> {
    pub async fn get_by_id(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<schedules::Model, ServiceError> {
        schedules::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Schedule", id))
    }

    /// Schedules of one class, optionally limited to a single day
    pub async fn get_by_class(
        db: &DatabaseConnection,
        class_id: Uuid,
        day: Option<NaiveDate>,
    ) -> Result<Vec<schedules::Model>, ServiceError> {
        find_class(db, class_id).await?;

        let mut query = schedules::Entity::find().filter(schedules::Column::ClassId.eq(class_id));
        if let Some(day) = day {
            query = query.filter(schedules::Column::Day.eq(day));
        }

        Ok(query
            .order_by_asc(schedules::Column::Day)
            .order_by_asc(schedules::Column::StartTime)
            .all(db)
            .await?)
    }

    /// Every schedule on `day`, with class, teachers and sessions nested
    pub async fn get_by_day(
        db: &DatabaseConnection,
        day: NaiveDate,
    ) -> Result<Vec<ScheduleDetail>, ServiceError> {
        let rows = schedules::Entity::find()
            .filter(schedules::Column::Day.eq(day))
            .find_also_related(classes::Entity)
            .order_by_asc(schedules::Column::StartTime)
            .all(db)
            .await?;

        let schedule_ids: Vec<Uuid> = rows.iter().map(|(schedule, _)| schedule.id).collect();
        let class_ids: Vec<Uuid> = rows.iter().map(|(schedule, _)| schedule.class_id).collect();

        let teachers_by_class = teachers_by_class(db, class_ids).await?;

        let mut sessions_by_schedule: HashMap<Uuid, Vec<class_sessions::Model>> = HashMap::new();
        for session in M::find_for_schedules(db, schedule_ids).await? {
            if let Some(schedule_id) = session.schedule_id {
                sessions_by_schedule
                    .entry(schedule_id)
                    .or_default()
                    .push(session);
            }
        }

        // The class FK cascades, so every schedule has its class
        Ok(rows
            .into_iter()
            .filter_map(|(schedule, class)| {
                let class = class?;
                Some(ScheduleDetail {
                    teachers: teachers_by_class.get(&class.id).cloned().unwrap_or_default(),
                    sessions: sessions_by_schedule.remove(&schedule.id).unwrap_or_default(),
                    schedule,
                    class,
                })
            })
            .collect())
    }

    /// Looks schedules up by class when a class id is given, otherwise by day
    pub async fn get_by_class_or_day(
        db: &DatabaseConnection,
        class_id: Option<Uuid>,
        day: Option<&str>,
    ) -> Result<ScheduleLookup, ServiceError> {
        let day = day
            .map(|value| {
                parse_day(value).ok_or_else(|| {
                    ServiceError::Validation(format!("day must be an ISO-8601 date, got {value:?}"))
                })
            })
            .transpose()?;

        match (class_id, day) {
            (Some(class_id), day) => Ok(ScheduleLookup::ByClass(
                Self::get_by_class(db, class_id, day).await?,
            )),
            (None, Some(day)) => Ok(ScheduleLookup::ByDay(Self::get_by_day(db, day).await?)),
            (None, None) => Err(ServiceError::BadRequest(
                "at least one filter required: class_id or day".into(),
            )),
        }
    }

    /// Schedules of several classes in one query
    pub async fn get_by_classes(
        db: &DatabaseConnection,
        class_ids: Vec<Uuid>,
    ) -> Result<Vec<schedules::Model>, ServiceError> {
        if class_ids.is_empty() {
            return Err(ServiceError::Validation(
                "At least one class id is required".into(),
            ));
        }

        let schedules = schedules::Entity::find()
            .filter(schedules::Column::ClassId.is_in(class_ids))
            .order_by_asc(schedules::Column::Day)
            .order_by_asc(schedules::Column::StartTime)
            .all(db)
            .await?;

        if schedules.is_empty() {
            return Err(ServiceError::NotFound(
                "No schedules found for the given classes".into(),
            ));
        }

        Ok(schedules)
    }

    /// Schedules of every class the student is enrolled in
    pub async fn get_by_student(
        db: &DatabaseConnection,
        student_id: Uuid,
    ) -> Result<Vec<AnnotatedSchedule>, ServiceError> {
        students::Entity::find_by_id(student_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Student", student_id))?;

        let class_ids: Vec<Uuid> = class_students::Entity::find()
            .filter(class_students::Column::StudentId.eq(student_id))
            .all(db)
            .await?
            .into_iter()
            .map(|enrollment| enrollment.class_id)
            .collect();

        annotate(db, class_ids).await
    }

    /// Schedules of every class the teacher is assigned to, in any role
    pub async fn get_by_teacher(
        db: &DatabaseConnection,
        teacher_id: Uuid,
    ) -> Result<Vec<AnnotatedSchedule>, ServiceError> {
        teachers::Entity::find_by_id(teacher_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Teacher", teacher_id))?;

        let class_ids: Vec<Uuid> = class_teachers::Entity::find()
            .filter(class_teachers::Column::TeacherId.eq(teacher_id))
            .all(db)
            .await?
            .into_iter()
            .map(|assignment| assignment.class_id)
            .collect();

        annotate(db, class_ids).await
    }
}

/// Loads the teachers of each class in `class_ids`, keyed by class id
async fn teachers_by_class<C: ConnectionTrait>(
    conn: &C,
    class_ids: Vec<Uuid>,
) -> Result<HashMap<Uuid, Vec<AssignedTeacher>>, ServiceError> {
    if class_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let assignments = class_teachers::Entity::find()
        .filter(class_teachers::Column::ClassId.is_in(class_ids))
        .find_also_related(teachers::Entity)
        // MAIN_TEACHER sorts after ASSISTANT_TEACHER
        .order_by_desc(class_teachers::Column::Role)
        .all(conn)
        .await?;

    let mut by_class: HashMap<Uuid, Vec<AssignedTeacher>> = HashMap::new();
    for (assignment, teacher) in assignments {
        if let Some(teacher) = teacher {
            by_class
                .entry(assignment.class_id)
                .or_default()
                .push(AssignedTeacher {
                    teacher,
                    role: assignment.role,
                });
        }
    }

    Ok(by_class)
}

/// Fetches the schedules of `class_ids` and labels each with its class name and teachers
async fn annotate<C: ConnectionTrait>(
    conn: &C,
    class_ids: Vec<Uuid>,
) -> Result<Vec<AnnotatedSchedule>, ServiceError> {
    if class_ids.is_empty() {
        return Ok(vec![]);
    }

    let rows = schedules::Entity::find()
        .filter(schedules::Column::ClassId.is_in(class_ids.clone()))
        .find_also_related(classes::Entity)
        .order_by_asc(schedules::Column::Day)
        .order_by_asc(schedules::Column::StartTime)
        .all(conn)
        .await?;

    let teachers = teachers_by_class(conn, class_ids).await?;

    Ok(rows
        .into_iter()
        .map(|(schedule, class)| AnnotatedSchedule {
            class_name: class.map(|c| c.name).unwrap_or_default(),
            teachers: teachers.get(&schedule.class_id).cloned().unwrap_or_default(),
            schedule,
        })
        .collect())
}
