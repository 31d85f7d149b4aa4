//! Users module - accounts of donors and administrators, credentials and forms.

mod password;
mod users_model;
mod users_service;
mod users_traits;


pub use password::{hash_password, verify_password};
pub use users_model::{LoginForm, NewUser, PasswordChange, ProfileUpdate, RegisterForm, User};
pub use users_service::UserService;
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
