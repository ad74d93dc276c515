use chrono::{DateTime, Utc};
use skill_core::model::{
    Completion, CompletionTarget, Course, CourseId, Enrollment, ExamEntry, ExamEntryId, Module,
    ModuleId, QuizQuestion, UserId, UserProfile,
};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::{AccountRecord, StorageError};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

pub(crate) fn bool_to_i64(v: bool) -> i64 {
    i64::from(v)
}

fn i64_to_bool(field: &'static str, v: i64) -> Result<bool, StorageError> {
    match v {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(StorageError::Serialization(format!(
            "invalid {field}: {other}"
        ))),
    }
}

pub(crate) fn quiz_to_json(quiz: &[QuizQuestion]) -> Result<String, StorageError> {
    serde_json::to_string(quiz).map_err(ser)
}

pub(crate) fn question_to_json(question: &QuizQuestion) -> Result<String, StorageError> {
    serde_json::to_string(question).map_err(ser)
}

pub(crate) fn parse_target(kind: &str, id: String) -> Result<CompletionTarget, StorageError> {
    match kind {
        "module" => Ok(CompletionTarget::Module(ModuleId::new(id).map_err(ser)?)),
        "exam" => Ok(CompletionTarget::ExamEntry(
            ExamEntryId::new(id).map_err(ser)?,
        )),
        _ => Err(StorageError::Serialization(format!(
            "invalid completion kind: {kind}"
        ))),
    }
}

pub(crate) fn map_course_row(row: &SqliteRow) -> Result<Course, StorageError> {
    Course::new(
        CourseId::new(row.try_get::<String, _>("id").map_err(ser)?).map_err(ser)?,
        row.try_get::<String, _>("name").map_err(ser)?,
        row.try_get::<String, _>("image").map_err(ser)?,
        row.try_get::<Option<String>, _>("genre").map_err(ser)?,
        row.try_get::<String, _>("description").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_module_row(row: &SqliteRow) -> Result<Module, StorageError> {
    let link: Option<String> = row.try_get("content_link").map_err(ser)?;
    let content_link = Module::parse_content_link(link.as_deref()).map_err(ser)?;
    let quiz_json: String = row.try_get("quiz").map_err(ser)?;
    let quiz: Vec<QuizQuestion> = serde_json::from_str(&quiz_json).map_err(ser)?;

    Module::new(
        ModuleId::new(row.try_get::<String, _>("id").map_err(ser)?).map_err(ser)?,
        CourseId::new(row.try_get::<String, _>("course_id").map_err(ser)?).map_err(ser)?,
        row.try_get::<String, _>("name").map_err(ser)?,
        content_link,
        quiz,
    )
    .map_err(ser)
}

pub(crate) fn map_exam_entry_row(row: &SqliteRow) -> Result<ExamEntry, StorageError> {
    let question_json: String = row.try_get("question").map_err(ser)?;
    let question: QuizQuestion = serde_json::from_str(&question_json).map_err(ser)?;
    Ok(ExamEntry::new(
        ExamEntryId::new(row.try_get::<String, _>("id").map_err(ser)?).map_err(ser)?,
        question,
    ))
}

pub(crate) fn map_enrollment_row(row: &SqliteRow) -> Result<Enrollment, StorageError> {
    let joined_at: DateTime<Utc> = row.try_get("joined_at").map_err(ser)?;
    let mut enrollment = Enrollment::new(
        UserId::new(row.try_get::<String, _>("user_id").map_err(ser)?).map_err(ser)?,
        CourseId::new(row.try_get::<String, _>("course_id").map_err(ser)?).map_err(ser)?,
        joined_at,
    );
    enrollment.completed = i64_to_bool("completed", row.try_get("completed").map_err(ser)?)?;
    Ok(enrollment)
}

pub(crate) fn map_completion_row(row: &SqliteRow) -> Result<Completion, StorageError> {
    let kind: String = row.try_get("kind").map_err(ser)?;
    Ok(Completion {
        user_id: UserId::new(row.try_get::<String, _>("user_id").map_err(ser)?).map_err(ser)?,
        course_id: CourseId::new(row.try_get::<String, _>("course_id").map_err(ser)?)
            .map_err(ser)?,
        target: parse_target(&kind, row.try_get("target_id").map_err(ser)?)?,
        completed: i64_to_bool("completed", row.try_get("completed").map_err(ser)?)?,
    })
}

pub(crate) fn map_profile_row(row: &SqliteRow) -> Result<UserProfile, StorageError> {
    UserProfile::from_persisted(
        UserId::new(row.try_get::<String, _>("id").map_err(ser)?).map_err(ser)?,
        row.try_get("email").map_err(ser)?,
        row.try_get("name").map_err(ser)?,
        row.try_get("profile_picture").map_err(ser)?,
        row.try_get("phone_number").map_err(ser)?,
        row.try_get("address").map_err(ser)?,
        row.try_get("created_at").map_err(ser)?,
        row.try_get("updated_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_account_row(row: &SqliteRow) -> Result<AccountRecord, StorageError> {
    Ok(AccountRecord {
        email: row.try_get("email").map_err(ser)?,
        user_id: UserId::new(row.try_get::<String, _>("user_id").map_err(ser)?).map_err(ser)?,
        password_hash: row.try_get("password_hash").map_err(ser)?,
        created_at: row.try_get("created_at").map_err(ser)?,
    })
}
