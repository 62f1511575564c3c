//! Account endpoints: login, registration, profile and password.
//!
//! These are thin calls; token persistence and the current-user state live in
//! [`Session`](crate::Session).

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::{ApiError, FieldErrors, Result};
use crate::models::User;
use crate::transport::Transport;

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if !looks_like_email(&self.email) {
            errors.insert("email".into(), "Enter a valid email address.".into());
        }
        if self.password.is_empty() {
            errors.insert("password".into(), "Password is required.".into());
        }
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl Registration {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.insert("name".into(), "Name is required.".into());
        }
        if !looks_like_email(&self.email) {
            errors.insert("email".into(), "Enter a valid email address.".into());
        }
        if let Some(msg) = password_problem(&self.password, &self.password_confirmation) {
            errors.insert("password".into(), msg.into());
        }
        errors
    }
}

/// Body of a successful login or registration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
}

impl ProfileUpdate {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone().unwrap_or_default(),
            email: user.email.clone(),
        }
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.insert("name".into(), "Name is required.".into());
        }
        if !looks_like_email(&self.email) {
            errors.insert("email".into(), "Enter a valid email address.".into());
        }
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub password: String,
    pub password_confirmation: String,
}

impl PasswordChange {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.current_password.is_empty() {
            errors.insert("current_password".into(), "Current password is required.".into());
        }
        if let Some(msg) = password_problem(&self.password, &self.password_confirmation) {
            errors.insert("password".into(), msg.into());
        }
        errors
    }
}

fn password_problem(password: &str, confirmation: &str) -> Option<&'static str> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        Some("Password must be at least 8 characters.")
    } else if password != confirmation {
        Some("Passwords do not match.")
    } else {
        None
    }
}

/// Loose shape check; the backend does the real validation.
pub fn looks_like_email(s: &str) -> bool {
    let s = s.trim();
    match s.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

fn check(errors: FieldErrors) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::invalid(errors))
    }
}

impl<T: Transport> ApiClient<T> {
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        check(credentials.validate())?;
        self.post("/login", credentials).await
    }

    pub async fn register(&self, registration: &Registration) -> Result<AuthResponse> {
        check(registration.validate())?;
        self.post("/register", registration).await
    }

    pub async fn me(&self) -> Result<User> {
        self.get("/me").await
    }

    pub async fn logout(&self) -> Result<()> {
        self.post_empty("/logout").await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        check(update.validate())?;
        self.put("/profile", update).await
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<()> {
        check(change.validate())?;
        self.put_unit("/password", change).await
    }
}
