use async_trait::async_trait;

use super::{write_error, PgStore};
use crate::database::manager::DatabaseError;
use crate::database::models::{NewUser, User};
use crate::database::repository::{Change, UserRepository};

const USER_COLUMNS: &str = "id, username, email, full_name, role, is_active, created_at, updated_at";

#[async_trait]
impl UserRepository for PgStore {
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let sql = format!(
            "INSERT INTO users (username, email, password_hash, full_name, role, is_active, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7) RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.full_name)
            .bind(user.role)
            .bind(user.is_active)
            .bind(user.created_at)
            .fetch_one(self.pool())
            .await
            .map_err(write_error("user", "users"))
    }

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC, id DESC");
        Ok(sqlx::query_as::<_, User>(&sql).fetch_all(self.pool()).await?)
    }

    async fn update_user(&self, id: i32, change: Change<User>) -> Result<User, DatabaseError> {
        let mut tx = self.pool().begin().await?;

        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1 FOR UPDATE");
        let mut user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(DatabaseError::not_found("user", id))?;
        change(&mut user);

        let sql = format!(
            "UPDATE users SET username = $2, email = $3, full_name = $4, role = $5, is_active = $6, updated_at = $7 \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.full_name)
            .bind(user.role)
            .bind(user.is_active)
            .bind(user.updated_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(write_error("user", "users"))?;

        tx.commit().await?;
        Ok(updated)
    }
}
