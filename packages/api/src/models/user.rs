//! # Dashboard account
//!
//! [`User`] is what `/login`, `/register` and `/me` return. Owners manage their
//! own villas; admins see every owner's data. Stripe fields describe the
//! owner's Connect account used for payouts.
//!
//! The helper [`User::display_name`] returns the user's name or falls back to
//! their email address.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Owner,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub stripe_account_id: Option<String>,
    #[serde(default)]
    pub stripe_onboarding_complete: bool,
}

impl User {
    /// Get display name, falling back to email if name is not set.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.email)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_email() {
        let mut user: User =
            serde_json::from_str(r#"{"id": 1, "email": "ana@villa.example"}"#).unwrap();
        assert_eq!(user.display_name(), "ana@villa.example");
        assert_eq!(user.role, Role::Owner);

        user.name = Some("Ana".to_string());
        assert_eq!(user.display_name(), "Ana");
    }

    #[test]
    fn test_admin_role() {
        let user: User =
            serde_json::from_str(r#"{"id": 2, "email": "a@b.c", "role": "admin"}"#).unwrap();
        assert!(user.is_admin());
    }
}
