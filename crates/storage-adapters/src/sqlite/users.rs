use async_trait::async_trait;
use domains::{DomainError, DomainResult, NewUser, ProfileUpdate, User, UserRepository};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use tokio::sync::Mutex;

use super::{open_pool, storage_err};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (
    id          INTEGER PRIMARY KEY,
    first_name  TEXT NOT NULL,
    second_name TEXT NOT NULL,
    nickname    TEXT NOT NULL UNIQUE,
    password    TEXT NOT NULL,
    email       TEXT NOT NULL,
    phone       TEXT NOT NULL
)";

/// SQLite-backed `UserRepository`.
pub struct SqliteUserRepository {
    pool: SqlitePool,
    last_id: Mutex<i64>,
}

impl SqliteUserRepository {
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let pool = open_pool(url).await?;
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        let last_id: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(id), 0) FROM users")
            .fetch_one(&pool)
            .await?;
        tracing::info!(url, last_id, "users table ready");
        Ok(Self {
            pool,
            last_id: Mutex::new(last_id),
        })
    }

    async fn fetch_where(&self, sql: &str, key: &str) -> DomainResult<Option<User>> {
        let row = sqlx::query(sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)?;
        row.map(|row| user_from_row(&row).map_err(storage_err))
            .transpose()
    }

    async fn fetch(&self, id: i64) -> DomainResult<User> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)?;
        match row {
            Some(row) => user_from_row(&row).map_err(storage_err),
            None => Err(DomainError::user_not_found(id)),
        }
    }
}

fn user_from_row(row: &SqliteRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        second_name: row.try_get("second_name")?,
        nickname: row.try_get("nickname")?,
        password: row.try_get("password")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
    })
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, new_user: NewUser) -> DomainResult<User> {
        let mut last_id = self.last_id.lock().await;

        let taken = self
            .fetch_where("SELECT * FROM users WHERE nickname = ?", &new_user.nickname)
            .await?;
        if taken.is_some() {
            return Err(DomainError::Conflict(format!(
                "nickname {} is already taken",
                new_user.nickname
            )));
        }

        let user = User::from_new(*last_id + 1, new_user);
        sqlx::query(
            "INSERT INTO users (id, first_name, second_name, nickname, password, email, phone) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.second_name)
        .bind(&user.nickname)
        .bind(&user.password)
        .bind(&user.email)
        .bind(&user.phone)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        *last_id = user.id;
        Ok(user)
    }

    async fn get(&self, id: i64) -> DomainResult<User> {
        let _guard = self.last_id.lock().await;
        self.fetch(id).await
    }

    async fn get_by_nickname(&self, nickname: &str) -> DomainResult<User> {
        let _guard = self.last_id.lock().await;
        self.fetch_where("SELECT * FROM users WHERE nickname = ?", nickname)
            .await?
            .ok_or_else(|| DomainError::nickname_not_found(nickname))
    }

    async fn update(&self, id: i64, profile: ProfileUpdate) -> DomainResult<User> {
        let _guard = self.last_id.lock().await;
        let mut user = self.fetch(id).await?;
        user.apply(profile);

        sqlx::query(
            "UPDATE users SET first_name = ?, second_name = ?, email = ?, phone = ? WHERE id = ?",
        )
        .bind(&user.first_name)
        .bind(&user.second_name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(user.id)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(user)
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let _guard = self.last_id.lock().await;
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::user_not_found(id));
        }
        Ok(())
    }
}
