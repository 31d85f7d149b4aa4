use log::{debug, info};
use std::sync::Arc;

use super::password::{hash_password, verify_password};
use super::users_model::{LoginForm, NewUser, PasswordChange, ProfileUpdate, RegisterForm, User};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::{AuthError, Error, Result, ValidationError};
use crate::utils::validation::{normalize_email, validate_new_password};

/// Service for registration, login and account settings.
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Fails when `email` already belongs to a user other than `except_id`.
    fn ensure_email_available(&self, email: &str, except_id: Option<&str>) -> Result<()> {
        match self.repository.find_by_email(email)? {
            Some(existing) if Some(existing.id.as_str()) != except_id => Err(Error::Validation(
                ValidationError::field("email", "a user with this email already exists"),
            )),
            _ => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository.get_by_id(user_id)
    }

    async fn register(&self, form: RegisterForm) -> Result<User> {
        let form = form.validated()?;
        self.ensure_email_available(&form.email, None)?;

        let user = self
            .repository
            .create(NewUser {
                email: form.email,
                first_name: form.first_name,
                last_name: form.last_name,
                password_hash: hash_password(&form.password)?,
                is_superuser: false,
            })
            .await?;
        info!("Registered user {}", user.id);
        Ok(user)
    }

    async fn authenticate(&self, form: LoginForm) -> Result<User> {
        let form = form.validated()?;
        let user = self
            .repository
            .find_by_email(&form.email)?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(&user.password_hash, &form.password)?;
        if !user.is_active {
            return Err(AuthError::Inactive.into());
        }

        self.repository.record_login(&user.id).await?;
        debug!("User {} logged in", user.id);
        Ok(user)
    }

    fn confirm_password(&self, user: &User, password: &str) -> Result<()> {
        if password.is_empty() {
            return Err(ValidationError::MissingField("password".to_string()).into());
        }
        verify_password(&user.password_hash, password)
    }

    async fn update_profile(&self, user: &User, update: ProfileUpdate) -> Result<User> {
        let update = update.validated()?;
        if update.email != user.email {
            self.ensure_email_available(&update.email, Some(&user.id))?;
        }
        self.repository.update_profile(&user.id, update).await
    }

    async fn change_password(&self, user: &User, change: PasswordChange) -> Result<User> {
        change.validate()?;
        let hash = hash_password(&change.new_password)?;
        let updated = self.repository.set_password(&user.id, hash).await?;
        info!("Password changed for user {}", user.id);
        Ok(updated)
    }

    fn list_superuser_emails(&self) -> Result<Vec<String>> {
        self.repository.list_superuser_emails()
    }

    async fn ensure_superuser(&self, email: &str, password: &str) -> Result<User> {
        let email = normalize_email("email", email)?;
        validate_new_password("password", password, password)?;

        match self.repository.find_by_email(&email)? {
            Some(existing) => {
                info!("Ensuring superuser rights for {}", existing.email);
                // An unchanged password keeps existing sessions valid.
                let new_hash = match verify_password(&existing.password_hash, password) {
                    Ok(()) => None,
                    Err(_) => Some(hash_password(password)?),
                };
                self.repository
                    .promote_to_superuser(&existing.id, new_hash)
                    .await
            }
            None => {
                info!("Creating superuser {}", email);
                self.repository
                    .create(NewUser {
                        email,
                        first_name: "Admin".to_string(),
                        last_name: String::new(),
                        password_hash: hash_password(password)?,
                        is_superuser: true,
                    })
                    .await
            }
        }
    }
}
