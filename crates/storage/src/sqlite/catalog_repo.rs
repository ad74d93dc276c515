use skill_core::model::{Course, CourseId, ExamEntry, Module, ModuleId};

use super::SqliteRepository;
use super::mapping::{
    conn, map_course_row, map_exam_entry_row, map_module_row, question_to_json, quiz_to_json,
};
use crate::repository::{CatalogRepository, StorageError};

/// Maps a foreign key violation on a child row to `NotFound`.
fn missing_parent(e: sqlx::Error) -> StorageError {
    match &e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => StorageError::NotFound,
        _ => conn(e),
    }
}

#[async_trait::async_trait]
impl CatalogRepository for SqliteRepository {
    async fn upsert_course(&self, course: &Course) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO courses (id, name, image, genre, description)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                image = excluded.image,
                genre = excluded.genre,
                description = excluded.description
            ",
        )
        .bind(course.id().as_str())
        .bind(course.name())
        .bind(course.image())
        .bind(course.genre())
        .bind(course.description())
        .execute(&self.pool)
        .await
        .map_err(conn)?;
        Ok(())
    }

    async fn get_course(&self, id: &CourseId) -> Result<Option<Course>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, name, image, genre, description
            FROM courses WHERE id = ?1
            ",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_course_row).transpose()
    }

    async fn list_courses(&self) -> Result<Vec<Course>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, name, image, genre, description
            FROM courses
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_course_row).collect()
    }

    async fn upsert_module(&self, module: &Module) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO modules (course_id, id, name, content_link, quiz)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(course_id, id) DO UPDATE SET
                name = excluded.name,
                content_link = excluded.content_link,
                quiz = excluded.quiz
            ",
        )
        .bind(module.course_id().as_str())
        .bind(module.id().as_str())
        .bind(module.name())
        .bind(module.content_link().map(|link| link.as_str().to_owned()))
        .bind(quiz_to_json(module.quiz())?)
        .execute(&self.pool)
        .await
        .map_err(missing_parent)?;
        Ok(())
    }

    async fn get_module(
        &self,
        course_id: &CourseId,
        module_id: &ModuleId,
    ) -> Result<Option<Module>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT course_id, id, name, content_link, quiz
            FROM modules WHERE course_id = ?1 AND id = ?2
            ",
        )
        .bind(course_id.as_str())
        .bind(module_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_module_row).transpose()
    }

    async fn list_modules(&self, course_id: &CourseId) -> Result<Vec<Module>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT course_id, id, name, content_link, quiz
            FROM modules
            WHERE course_id = ?1
            ORDER BY id ASC
            ",
        )
        .bind(course_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        Ok(rows
            .iter()
            .filter_map(|row| match map_module_row(row) {
                Ok(module) => Some(module),
                Err(e) => {
                    tracing::warn!(course = %course_id, error = %e, "skipping malformed module row");
                    None
                }
            })
            .collect())
    }

    async fn upsert_exam_entry(
        &self,
        course_id: &CourseId,
        entry: &ExamEntry,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO exam_entries (course_id, id, question)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(course_id, id) DO UPDATE SET
                question = excluded.question
            ",
        )
        .bind(course_id.as_str())
        .bind(entry.id.as_str())
        .bind(question_to_json(&entry.question)?)
        .execute(&self.pool)
        .await
        .map_err(missing_parent)?;
        Ok(())
    }

    async fn list_exam_entries(
        &self,
        course_id: &CourseId,
    ) -> Result<Vec<ExamEntry>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, question
            FROM exam_entries
            WHERE course_id = ?1
            ORDER BY id ASC
            ",
        )
        .bind(course_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        Ok(rows
            .iter()
            .filter_map(|row| match map_exam_entry_row(row) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(course = %course_id, error = %e, "skipping malformed exam row");
                    None
                }
            })
            .collect())
    }
}
