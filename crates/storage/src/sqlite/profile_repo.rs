use skill_core::model::{UserId, UserProfile};

use super::SqliteRepository;
use super::mapping::{conn, map_profile_row};
use crate::repository::{ProfileRepository, StorageError};

#[async_trait::async_trait]
impl ProfileRepository for SqliteRepository {
    async fn put_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO users (id, email, name, profile_picture, phone_number, address, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(id) DO UPDATE SET
                email = excluded.email,
                name = excluded.name,
                profile_picture = excluded.profile_picture,
                phone_number = excluded.phone_number,
                address = excluded.address,
                created_at = excluded.created_at,
                updated_at = excluded.updated_at
            ",
        )
        .bind(profile.id().as_str())
        .bind(profile.email())
        .bind(profile.name())
        .bind(profile.profile_picture())
        .bind(profile.phone_number())
        .bind(profile.address())
        .bind(profile.created_at())
        .bind(profile.updated_at())
        .execute(&self.pool)
        .await
        .map_err(conn)?;
        Ok(())
    }

    async fn get_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, email, name, profile_picture, phone_number, address, created_at, updated_at
            FROM users WHERE id = ?1
            ",
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_profile_row).transpose()
    }

    async fn update_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        let res = sqlx::query(
            r"
            UPDATE users SET
                name = ?2,
                profile_picture = ?3,
                phone_number = ?4,
                address = ?5,
                updated_at = ?6
            WHERE id = ?1
            ",
        )
        .bind(profile.id().as_str())
        .bind(profile.name())
        .bind(profile.profile_picture())
        .bind(profile.phone_number())
        .bind(profile.address())
        .bind(profile.updated_at())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn list_profiles(&self) -> Result<Vec<UserProfile>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, email, name, profile_picture, phone_number, address, created_at, updated_at
            FROM users
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_profile_row).collect()
    }
}
