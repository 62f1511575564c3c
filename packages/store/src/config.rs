//! # Dashboard configuration: `Dashboard.toml`
//!
//! Defines the TOML file the web package embeds at build time (filename:
//! [`DashboardConfig::filename`] = `"Dashboard.toml"`). It tells the dashboard
//! where the backend lives and where the guest app links should point.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000/api"
//!
//! [guest]
//! app_url = "http://localhost:5174/guest"
//!
//! [analytics]
//! default_days = 30        # window for the revenue chart and CSV export
//!
//! [notifications]
//! toast_secs = 4           # 0 keeps toasts until dismissed
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`DashboardConfig`] | Top-level config, parsed from TOML, with builder helpers (`with_api_url`, `with_guest_url`) for build-time overrides. |
//! | [`ApiConfig`] | REST backend base URL. |
//! | [`GuestConfig`] | Base URL of the guest-facing app, joined with a property's access token. |
//! | [`AnalyticsConfig`] | Default day window, **30** unless set. |
//! | [`NotificationConfig`] | Toast lifetime, **4 seconds** unless set. |
//!
//! Every section derives `Default`, so a missing or partial file is equivalent
//! to the defaults.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub guest: GuestConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuestConfig {
    #[serde(default = "default_guest_url")]
    pub app_url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_days")]
    pub default_days: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_toast_secs")]
    pub toast_secs: u32,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_guest_url() -> String {
    "http://localhost:5174/guest".to_string()
}

fn default_days() -> u32 {
    30
}

fn default_toast_secs() -> u32 {
    4
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for GuestConfig {
    fn default() -> Self {
        Self {
            app_url: default_guest_url(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            default_days: default_days(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            toast_secs: default_toast_secs(),
        }
    }
}

impl DashboardConfig {
    /// Builder method to point at another backend.
    pub fn with_api_url(mut self, base_url: String) -> Self {
        self.api.base_url = base_url;
        self
    }

    /// Builder method to set the guest app URL.
    pub fn with_guest_url(mut self, app_url: String) -> Self {
        self.guest.app_url = app_url;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "Dashboard.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = DashboardConfig::from_toml("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.analytics.default_days, 30);
        assert_eq!(config.notifications.toast_secs, 4);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = DashboardConfig::from_toml(
            "[api]\nbase_url = \"https://api.villas.example/api\"\n",
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://api.villas.example/api");
        assert_eq!(config.guest, GuestConfig::default());
    }

    #[test]
    fn test_overrides_replace_only_their_url() {
        let config = DashboardConfig::from_toml("[analytics]\ndefault_days = 7\n")
            .unwrap()
            .with_api_url("https://a.example".to_string())
            .with_guest_url("https://g.example".to_string());
        assert_eq!(config.api.base_url, "https://a.example");
        assert_eq!(config.guest.app_url, "https://g.example");
        assert_eq!(config.analytics.default_days, 7);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(DashboardConfig::from_toml("[api\nbase_url = 1").is_err());
    }
}
