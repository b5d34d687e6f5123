//! Registration, login, and profile lookups.

use std::sync::Arc;

use tracing::{info, warn};

use arbor_auth::jwt::encoder::{IssuedToken, JwtEncoder};
use arbor_auth::password::hasher::PasswordHasher;
use arbor_core::config::AuthConfig;
use arbor_core::error::AppError;
use arbor_core::result::AppResult;
use arbor_database::repositories::user::UserRepository;
use arbor_entity::user::model::{CreateUser, User};
use arbor_entity::user::role::UserRole;

use crate::context::RequestContext;

/// Maximum username length, matching the storage schema.
const MAX_USERNAME_LENGTH: usize = 50;

/// Manages user accounts and credential verification.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher (Argon2id).
    password_hasher: Arc<PasswordHasher>,
    /// JWT encoder.
    jwt_encoder: Arc<JwtEncoder>,
    /// Minimum accepted password length.
    password_min_length: usize,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The authenticated user.
    pub user: User,
    /// The issued access token.
    pub token: IssuedToken,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        password_hasher: Arc<PasswordHasher>,
        jwt_encoder: Arc<JwtEncoder>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            user_repo,
            password_hasher,
            jwt_encoder,
            password_min_length: config.password_min_length,
        }
    }

    /// Registers a new account with the given role.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        role: UserRole,
    ) -> AppResult<User> {
        let username = username.trim();
        if username.is_empty() || username.len() > MAX_USERNAME_LENGTH {
            return Err(AppError::validation(format!(
                "Username must be between 1 and {MAX_USERNAME_LENGTH} characters"
            )));
        }
        if password.len() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }

        if self.user_repo.find_by_username(username).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Username '{username}' already exists"
            )));
        }

        let password_hash = self.password_hasher.hash_password(password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                username: username.to_string(),
                password_hash,
                role,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, role = %user.role, "User registered");

        Ok(user)
    }

    /// Verifies credentials and issues an access token.
    ///
    /// The error message does not distinguish an unknown username from a
    /// wrong password.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginOutcome> {
        let Some(user) = self.user_repo.find_by_username(username).await? else {
            warn!(username = %username, "Login failed: unknown username");
            return Err(AppError::authentication("Invalid username or password"));
        };

        if !self
            .password_hasher
            .verify_password(password, &user.password_hash)?
        {
            warn!(username = %username, "Login failed: wrong password");
            return Err(AppError::authentication("Invalid username or password"));
        }

        let token = self.jwt_encoder.generate_token(&user)?;

        info!(user_id = %user.id, username = %user.username, "Login successful");

        Ok(LoginOutcome { user, token })
    }

    /// Returns the profile of the authenticated user.
    pub async fn get_profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
