//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use roomhub_core::error::{AppError, ErrorKind};
use roomhub_core::result::AppResult;
use roomhub_core::traits::credentials::{CredentialStore, IdentityRecord, LoginCredential};
use roomhub_core::types::pagination::{PageRequest, PageResponse};
use roomhub_entity::user::{CreateUser, UpdateUser, User};

/// Repository for user CRUD, role assignment and identity lookups.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by username.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// List users with optional filters on username, nickname and email.
    pub async fn find_all(
        &self,
        username: Option<&str>,
        nick_name: Option<&str>,
        email: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        let username_pattern = username.map(|v| format!("%{v}%"));
        let nick_pattern = nick_name.map(|v| format!("%{v}%"));
        let email_pattern = email.map(|v| format!("%{v}%"));

        let filter = "($1::text IS NULL OR username ILIKE $1) \
             AND ($2::text IS NULL OR nick_name ILIKE $2) \
             AND ($3::text IS NULL OR email ILIKE $3)";

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM users WHERE {filter}"))
                .bind(&username_pattern)
                .bind(&nick_pattern)
                .bind(&email_pattern)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count users", e)
                })?;

        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT * FROM users WHERE {filter} ORDER BY created_at DESC LIMIT $4 OFFSET $5"
        ))
        .bind(&username_pattern)
        .bind(&nick_pattern)
        .bind(&email_pattern)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))?;

        Ok(PageResponse::new(
            users,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new user and assign it the default "regular user" role.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password_hash, nick_name, email) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(&data.username)
        .bind(&data.password_hash)
        .bind(&data.nick_name)
        .bind(&data.email)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("users_username_key") =>
            {
                AppError::conflict(format!("Username '{}' already exists", data.username))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })?;

        sqlx::query(
            "INSERT INTO user_roles (user_id, role_id) \
             SELECT $1, id FROM roles WHERE name = 'regular user'",
        )
        .bind(user.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to assign default role", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(user)
    }

    /// Update a user's profile fields.
    pub async fn update(&self, user_id: Uuid, data: &UpdateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET nick_name = COALESCE($2, nick_name), \
                              head_pic = COALESCE($3, head_pic), \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(user_id)
        .bind(&data.nick_name)
        .bind(&data.head_pic)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user", e))?
        .ok_or_else(|| AppError::user_not_found(format!("User {user_id} not found")))
    }

    /// Update a user's password hash.
    pub async fn update_password(&self, user_id: Uuid, password_hash: &str) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(user_id)
                .bind(password_hash)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update password", e)
                })?;

        if result.rows_affected() == 0 {
            return Err(AppError::user_not_found(format!("User {user_id} not found")));
        }
        Ok(())
    }

    /// Mark a user as frozen.
    pub async fn freeze(&self, user_id: Uuid) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE users SET is_frozen = TRUE, updated_at = NOW() WHERE id = $1")
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to freeze user", e)
                })?;

        if result.rows_affected() == 0 {
            return Err(AppError::user_not_found(format!("User {user_id} not found")));
        }
        Ok(())
    }

    /// Load role names and deduplicated permission codes for a user.
    async fn load_grants(&self, user_id: Uuid) -> AppResult<(Vec<String>, Vec<String>)> {
        let roles: Vec<String> = sqlx::query_scalar(
            "SELECT r.name FROM roles r \
             JOIN user_roles ur ON ur.role_id = r.id \
             WHERE ur.user_id = $1 \
             ORDER BY r.name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load user roles", e))?;

        let permissions: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT p.code FROM permissions p \
             JOIN role_permissions rp ON rp.permission_id = p.id \
             JOIN user_roles ur ON ur.role_id = rp.role_id \
             WHERE ur.user_id = $1 \
             ORDER BY p.code",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load user permissions", e)
        })?;

        Ok((roles, permissions))
    }

    async fn identity_from(&self, user: User) -> AppResult<IdentityRecord> {
        let (roles, permissions) = self.load_grants(user.id).await?;
        Ok(IdentityRecord {
            user_id: user.id,
            username: user.username,
            email: user.email,
            is_admin: user.is_admin,
            roles,
            permissions,
        })
    }
}

#[async_trait]
impl CredentialStore for UserRepository {
    async fn find_identity(
        &self,
        user_id: Uuid,
        is_admin: bool,
    ) -> AppResult<Option<IdentityRecord>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND is_admin = $2")
            .bind(user_id)
            .bind(is_admin)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to resolve identity", e)
            })?;

        match user {
            Some(user) => Ok(Some(self.identity_from(user).await?)),
            None => Ok(None),
        }
    }

    async fn find_login(
        &self,
        username: &str,
        is_admin: bool,
    ) -> AppResult<Option<LoginCredential>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE username = $1 AND is_admin = $2",
        )
        .bind(username)
        .bind(is_admin)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to resolve login credential", e)
        })?;

        match user {
            Some(user) => {
                let password_hash = user.password_hash.clone();
                let is_frozen = user.is_frozen;
                Ok(Some(LoginCredential {
                    identity: self.identity_from(user).await?,
                    password_hash,
                    is_frozen,
                }))
            }
            None => Ok(None),
        }
    }

    async fn first_admin(&self) -> AppResult<Option<IdentityRecord>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE is_admin = TRUE ORDER BY created_at ASC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find admin", e))?;

        match user {
            Some(user) => Ok(Some(self.identity_from(user).await?)),
            None => Ok(None),
        }
    }
}
