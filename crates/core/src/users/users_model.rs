//! User domain models and the forms that create or change them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_NAME_LENGTH;
use crate::errors::{Result, ValidationError};
use crate::utils::validation::{normalize_email, required_text, validate_new_password};

/// Domain model representing a registered user.
///
/// The email address doubles as the login name.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_superuser: bool,
    pub is_active: bool,
    /// Bumped on every password change; sessions carrying an older value are void.
    pub session_version: i32,
    pub last_login: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Input model for inserting a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub is_superuser: bool,
}

/// Registration form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl RegisterForm {
    /// Returns the form with names trimmed and the email normalised.
    pub fn validated(self) -> Result<Self> {
        let first_name = required_text("firstName", &self.first_name, MAX_NAME_LENGTH)?;
        let last_name = required_text("lastName", &self.last_name, MAX_NAME_LENGTH)?;
        let email = normalize_email("email", &self.email)?;
        validate_new_password("password", &self.password, &self.password_confirmation)?;
        Ok(Self {
            first_name,
            last_name,
            email,
            ..self
        })
    }
}

/// Login form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validated(self) -> Result<Self> {
        let email = normalize_email("email", &self.email)?;
        if self.password.is_empty() {
            return Err(ValidationError::MissingField("password".to_string()).into());
        }
        Ok(Self { email, ..self })
    }
}

/// Personal data part of the account settings page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl ProfileUpdate {
    pub fn validated(self) -> Result<Self> {
        Ok(Self {
            first_name: required_text("firstName", &self.first_name, MAX_NAME_LENGTH)?,
            last_name: required_text("lastName", &self.last_name, MAX_NAME_LENGTH)?,
            email: normalize_email("email", &self.email)?,
        })
    }
}

impl From<&User> for ProfileUpdate {
    fn from(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Password part of the account settings page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub new_password: String,
    pub new_password_confirmation: String,
}

impl PasswordChange {
    pub fn validate(&self) -> Result<()> {
        validate_new_password(
            "newPassword",
            &self.new_password,
            &self.new_password_confirmation,
        )?;
        Ok(())
    }
}
