use super::SqliteRepository;
use super::mapping::{conn, map_account_row};
use crate::repository::{AccountRecord, AccountRepository, StorageError};

#[async_trait::async_trait]
impl AccountRepository for SqliteRepository {
    async fn insert_account(&self, account: &AccountRecord) -> Result<(), StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO accounts (email, user_id, password_hash, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(account.email.as_str())
        .bind(account.user_id.as_str())
        .bind(account.password_hash.as_str())
        .bind(account.created_at)
        .execute(&self.pool)
        .await;

        match res {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StorageError::Conflict)
            }
            Err(e) => Err(conn(e)),
        }
    }

    async fn find_account(&self, email: &str) -> Result<Option<AccountRecord>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT email, user_id, password_hash, created_at
            FROM accounts WHERE email = ?1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_account_row).transpose()
    }
}
