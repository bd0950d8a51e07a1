//! User registration, captcha flows, profile updates and administration.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use uuid::Uuid;

use roomhub_auth::captcha;
use roomhub_auth::password::PasswordHasher;
use roomhub_cache::{CacheManager, keys};
use roomhub_core::config::AuthConfig;
use roomhub_core::error::AppError;
use roomhub_core::result::AppResult;
use roomhub_core::traits::cache::CacheProvider;
use roomhub_core::traits::mailer::OutboundEmail;
use roomhub_core::types::pagination::{PageRequest, PageResponse};
use roomhub_database::repositories::UserRepository;
use roomhub_entity::user::{CreateUser, UpdateUser, User};
use roomhub_mailer::MailDispatcher;

/// Data for a self-service registration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub nick_name: String,
    pub password: String,
    pub email: String,
    pub captcha: String,
}

/// Data for a captcha-verified password change.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UpdatePasswordRequest {
    pub password: String,
    pub captcha: String,
}

/// Data for a captcha-verified profile update.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UpdateProfileRequest {
    pub nick_name: Option<String>,
    pub head_pic: Option<String>,
    pub captcha: String,
}

/// Handles registration, captcha flows, profile updates and user
/// administration.
#[derive(Debug, Clone)]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    hasher: Arc<PasswordHasher>,
    cache: CacheManager,
    mail: MailDispatcher,
    config: AuthConfig,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        cache: CacheManager,
        mail: MailDispatcher,
        config: AuthConfig,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            cache,
            mail,
            config,
        }
    }

    /// Generate a registration captcha and email it to the address.
    pub async fn send_register_captcha(&self, email: &str) -> AppResult<()> {
        self.send_captcha(
            keys::register_captcha(email),
            email,
            "Your registration code",
            Duration::from_secs(self.config.register_captcha_ttl_seconds),
        )
        .await
    }

    /// Generate a password-change captcha and email it to the address.
    pub async fn send_update_password_captcha(&self, email: &str) -> AppResult<()> {
        self.send_captcha(
            keys::update_password_captcha(email),
            email,
            "Your password change code",
            Duration::from_secs(self.config.update_captcha_ttl_seconds),
        )
        .await
    }

    /// Generate a profile-update captcha and email it to the address.
    pub async fn send_update_user_captcha(&self, email: &str) -> AppResult<()> {
        self.send_captcha(
            keys::update_user_captcha(email),
            email,
            "Your profile update code",
            Duration::from_secs(self.config.update_captcha_ttl_seconds),
        )
        .await
    }

    async fn send_captcha(
        &self,
        key: String,
        email: &str,
        subject: &str,
        ttl: Duration,
    ) -> AppResult<()> {
        let code = captcha::generate_code();
        self.cache.set(&key, &code, Some(ttl)).await?;
        self.mail.enqueue(OutboundEmail {
            to: email.to_string(),
            subject: subject.to_string(),
            html_body: format!("<p>Your verification code is <b>{code}</b></p>"),
        })?;
        Ok(())
    }

    async fn verify_captcha(&self, key: &str, provided: &str) -> AppResult<()> {
        let stored = self
            .cache
            .get(key)
            .await?
            .ok_or_else(|| AppError::validation("Captcha has expired"))?;
        if stored != provided {
            return Err(AppError::validation("Incorrect captcha"));
        }
        Ok(())
    }

    /// Register a new ordinary user after captcha verification.
    pub async fn register(&self, req: RegisterRequest) -> AppResult<User> {
        let captcha_key = keys::register_captcha(&req.email);
        self.verify_captcha(&captcha_key, &req.captcha).await?;

        if req.password.len() < self.config.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.config.password_min_length
            )));
        }

        let password_hash = self.hasher.hash_password(&req.password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                username: req.username,
                password_hash,
                nick_name: req.nick_name,
                email: req.email,
            })
            .await?;

        // A captcha is single-use.
        self.cache.delete(&captcha_key).await?;

        info!(username = %user.username, "User registered");
        Ok(user)
    }

    /// Fetch a user's profile.
    pub async fn info(&self, user_id: Uuid) -> AppResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::user_not_found(format!("User {user_id} not found")))
    }

    /// Change a user's password after captcha verification.
    pub async fn update_password(
        &self,
        user_id: Uuid,
        req: UpdatePasswordRequest,
    ) -> AppResult<()> {
        let user = self.info(user_id).await?;
        let captcha_key = keys::update_password_captcha(&user.email);
        self.verify_captcha(&captcha_key, &req.captcha).await?;

        if req.password.len() < self.config.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.config.password_min_length
            )));
        }

        let password_hash = self.hasher.hash_password(&req.password)?;
        self.user_repo.update_password(user_id, &password_hash).await?;
        self.cache.delete(&captcha_key).await?;

        info!(%user_id, "Password updated");
        Ok(())
    }

    /// Update a user's profile after captcha verification.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        req: UpdateProfileRequest,
    ) -> AppResult<User> {
        let user = self.info(user_id).await?;
        let captcha_key = keys::update_user_captcha(&user.email);
        self.verify_captcha(&captcha_key, &req.captcha).await?;

        let updated = self
            .user_repo
            .update(
                user_id,
                &UpdateUser {
                    nick_name: req.nick_name,
                    head_pic: req.head_pic,
                },
            )
            .await?;
        self.cache.delete(&captcha_key).await?;

        Ok(updated)
    }

    /// Freeze a user account (admin operation).
    pub async fn freeze(&self, user_id: Uuid) -> AppResult<()> {
        self.user_repo.freeze(user_id).await?;
        info!(%user_id, "User frozen");
        Ok(())
    }

    /// List users with optional filters (admin operation).
    pub async fn list(
        &self,
        username: Option<&str>,
        nick_name: Option<&str>,
        email: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        self.user_repo.find_all(username, nick_name, email, page).await
    }
}
