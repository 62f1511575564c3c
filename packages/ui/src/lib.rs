//! Shared UI for the villa admin dashboard.
//!
//! | Module | Role |
//! |--------|------|
//! | [`auth`] | `SessionProvider` owns the session and every app-wide context |
//! | [`query`] | Reactive wrapper over the query cache |
//! | [`notify`] | Toasts, mirrored into the [`activity_log`] |
//! | [`layout`] | Sidebar shell around every signed-in page |
//! | [`views`] | One component per page; platform crates route to them |
//! | [`components`] | Buttons, form fields, badges, dialogs, toasts |
//! | [`browser`] | Downloads, clipboard and external redirects |

use dioxus::prelude::*;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

pub const DASHBOARD_CSS: Asset = asset!("/assets/dashboard.css");

mod auth;
pub use auth::{
    use_auth, use_config, use_session, AuthState, LogoutButton, SessionHandle, SessionProvider,
};

pub mod activity_log;
pub use activity_log::{log_activity, use_activity_log, ActivityLog, LogLevel};

mod activity_log_panel;
pub use activity_log_panel::{ActivityLogPanel, ActivityLogToggle};

pub mod browser;

mod layout;
pub use layout::{AppShell, NavSection};

pub mod notify;
pub use notify::{use_notifier, Notifier};

pub mod query;
pub use query::{use_cached, use_query_client, QueryClient};
