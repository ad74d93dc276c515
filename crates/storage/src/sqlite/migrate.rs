use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

const SCHEMA_V1: &[&str] = &[
    r"
        CREATE TABLE IF NOT EXISTS courses (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            image TEXT NOT NULL DEFAULT '',
            genre TEXT,
            description TEXT NOT NULL DEFAULT ''
        );
    ",
    r"
        CREATE TABLE IF NOT EXISTS modules (
            course_id TEXT NOT NULL,
            id TEXT NOT NULL,
            name TEXT NOT NULL,
            content_link TEXT,
            quiz TEXT NOT NULL DEFAULT '[]',
            PRIMARY KEY (course_id, id),
            FOREIGN KEY (course_id) REFERENCES courses(id) ON DELETE CASCADE
        );
    ",
    r"
        CREATE TABLE IF NOT EXISTS exam_entries (
            course_id TEXT NOT NULL,
            id TEXT NOT NULL,
            question TEXT NOT NULL,
            PRIMARY KEY (course_id, id),
            FOREIGN KEY (course_id) REFERENCES courses(id) ON DELETE CASCADE
        );
    ",
    r"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL,
            name TEXT,
            profile_picture TEXT,
            phone_number TEXT,
            address TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
    ",
    r"
        CREATE TABLE IF NOT EXISTS enrollments (
            user_id TEXT NOT NULL,
            course_id TEXT NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0 CHECK (completed IN (0, 1)),
            joined_at TEXT NOT NULL,
            PRIMARY KEY (user_id, course_id)
        );
    ",
    r"
        CREATE TABLE IF NOT EXISTS completions (
            user_id TEXT NOT NULL,
            course_id TEXT NOT NULL,
            kind TEXT NOT NULL CHECK (kind IN ('module', 'exam')),
            target_id TEXT NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0 CHECK (completed IN (0, 1)),
            PRIMARY KEY (user_id, course_id, kind, target_id),
            FOREIGN KEY (user_id, course_id)
                REFERENCES enrollments(user_id, course_id) ON DELETE CASCADE
        );
    ",
    r"
        CREATE TABLE IF NOT EXISTS accounts (
            email TEXT PRIMARY KEY,
            user_id TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
    ",
];

/// Runs the consolidated migration for the current schema.
///
/// Creates catalog tables (courses, modules, exam entries), per-user progress
/// tables (enrollments, completions), profiles and local accounts.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    async fn is_applied(pool: &SqlitePool, version: i64) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM schema_migrations WHERE version = ?1")
            .bind(version)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
            ",
    )
    .execute(pool)
    .await?;

    // Version 1: full schema.
    if !is_applied(pool, 1).await? {
        let mut tx = pool.begin().await?;

        for statement in SCHEMA_V1.iter().copied() {
            sqlx::query(statement).execute(&mut *tx).await?;
        }

        sqlx::query(
            r"
                INSERT INTO schema_migrations (version, applied_at)
                VALUES (?1, ?2)
                ON CONFLICT(version) DO NOTHING
            ",
        )
        .bind(1_i64)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::info!(version = 1, "applied sqlite schema migration");
    }

    Ok(())
}
