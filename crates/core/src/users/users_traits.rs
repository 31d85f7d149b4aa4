//! User repository and service traits.
//!
//! These traits define the contract for user operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::users_model::{LoginForm, NewUser, PasswordChange, ProfileUpdate, RegisterForm, User};
use crate::errors::Result;

/// Trait defining the contract for User repository operations.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Retrieves a user by ID.
    fn get_by_id(&self, user_id: &str) -> Result<User>;

    /// Looks a user up by normalised email.
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Email addresses of every active superuser.
    fn list_superuser_emails(&self) -> Result<Vec<String>>;

    async fn create(&self, new_user: NewUser) -> Result<User>;

    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<User>;

    /// Stores a new password hash and increments the session version.
    async fn set_password(&self, user_id: &str, password_hash: String) -> Result<User>;

    async fn record_login(&self, user_id: &str) -> Result<()>;

    /// Grants superuser rights, optionally resetting the password.
    async fn promote_to_superuser(
        &self,
        user_id: &str,
        password_hash: Option<String>,
    ) -> Result<User>;
}

/// Trait for user service operations.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    fn get_user(&self, user_id: &str) -> Result<User>;
    async fn register(&self, form: RegisterForm) -> Result<User>;
    async fn authenticate(&self, form: LoginForm) -> Result<User>;
    fn confirm_password(&self, user: &User, password: &str) -> Result<()>;
    async fn update_profile(&self, user: &User, update: ProfileUpdate) -> Result<User>;
    async fn change_password(&self, user: &User, change: PasswordChange) -> Result<User>;
    fn list_superuser_emails(&self) -> Result<Vec<String>>;
    async fn ensure_superuser(&self, email: &str, password: &str) -> Result<User>;
}
