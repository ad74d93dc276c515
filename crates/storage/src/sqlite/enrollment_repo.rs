use skill_core::model::{Completion, CompletionTarget, CourseId, Enrollment, EnrollmentBatch, UserId};

use super::SqliteRepository;
use super::mapping::{bool_to_i64, conn, map_completion_row, map_enrollment_row};
use crate::repository::{EnrollmentRepository, StorageError};

#[async_trait::async_trait]
impl EnrollmentRepository for SqliteRepository {
    async fn get_enrollment(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Option<Enrollment>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT user_id, course_id, completed, joined_at
            FROM enrollments WHERE user_id = ?1 AND course_id = ?2
            ",
        )
        .bind(user_id.as_str())
        .bind(course_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_enrollment_row).transpose()
    }

    async fn list_enrollments(&self, user_id: &UserId) -> Result<Vec<Enrollment>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT user_id, course_id, completed, joined_at
            FROM enrollments
            WHERE user_id = ?1
            ORDER BY course_id ASC
            ",
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_enrollment_row).collect()
    }

    async fn write_enrollment(&self, batch: &EnrollmentBatch) -> Result<(), StorageError> {
        let enrollment = &batch.enrollment;
        let mut tx = self.pool.begin().await.map_err(conn)?;

        sqlx::query(
            r"
            INSERT INTO enrollments (user_id, course_id, completed, joined_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(user_id, course_id) DO UPDATE SET
                joined_at = excluded.joined_at,
                completed = MAX(enrollments.completed, excluded.completed)
            ",
        )
        .bind(enrollment.user_id.as_str())
        .bind(enrollment.course_id.as_str())
        .bind(bool_to_i64(enrollment.completed))
        .bind(enrollment.joined_at)
        .execute(&mut *tx)
        .await
        .map_err(conn)?;

        for completion in &batch.completions {
            sqlx::query(
                r"
                INSERT INTO completions (user_id, course_id, kind, target_id, completed)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT(user_id, course_id, kind, target_id) DO UPDATE SET
                    completed = MAX(completions.completed, excluded.completed)
                ",
            )
            .bind(completion.user_id.as_str())
            .bind(completion.course_id.as_str())
            .bind(completion.target.kind())
            .bind(completion.target.id())
            .bind(bool_to_i64(completion.completed))
            .execute(&mut *tx)
            .await
            .map_err(conn)?;
        }

        tx.commit().await.map_err(conn)?;
        Ok(())
    }

    async fn mark_exam_completed(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<(), StorageError> {
        let res = sqlx::query(
            r"
            UPDATE enrollments SET completed = 1
            WHERE user_id = ?1 AND course_id = ?2
            ",
        )
        .bind(user_id.as_str())
        .bind(course_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn list_completions(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Vec<Completion>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT user_id, course_id, kind, target_id, completed
            FROM completions
            WHERE user_id = ?1 AND course_id = ?2
            ORDER BY kind DESC, target_id ASC
            ",
        )
        .bind(user_id.as_str())
        .bind(course_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_completion_row).collect()
    }

    async fn mark_completed(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
        target: &CompletionTarget,
    ) -> Result<(), StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO completions (user_id, course_id, kind, target_id, completed)
            VALUES (?1, ?2, ?3, ?4, 1)
            ON CONFLICT(user_id, course_id, kind, target_id) DO UPDATE SET
                completed = 1
            ",
        )
        .bind(user_id.as_str())
        .bind(course_id.as_str())
        .bind(target.kind())
        .bind(target.id())
        .execute(&self.pool)
        .await;

        match res {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
                Err(StorageError::NotFound)
            }
            Err(e) => Err(conn(e)),
        }
    }
}
