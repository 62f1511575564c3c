//! Toast notifications.
//!
//! [`Notifier`] is the single way views report outcomes. Each call shows a
//! toast through the `dioxus-primitives` toast system, mirrors it into the
//! activity log and emits a `tracing` event. Request errors that mean the
//! session is gone (HTTP 401) also end the session, which sends the user back
//! to the login screen.

use api::ApiError;
use dioxus::prelude::*;

use crate::activity_log::{log_activity, ActivityLog, LogLevel};
use crate::auth::{AuthState, SessionHandle};
use crate::components::{toast_options, use_toast};

#[derive(Clone, Copy, PartialEq)]
pub struct Notifier {
    pub(crate) toast: Callback<(LogLevel, String)>,
    pub(crate) log: Signal<ActivityLog>,
    pub(crate) auth: Signal<AuthState>,
    pub(crate) session: SessionHandle,
}

pub fn use_notifier() -> Notifier {
    use_context::<Notifier>()
}

/// Bridge from [`Notifier`] levels to the toast handle. Must be called below
/// a `ToastProvider`.
pub(crate) fn use_toast_callback(toast_secs: u32) -> Callback<(LogLevel, String)> {
    let toasts = use_toast();
    use_callback(move |(level, message): (LogLevel, String)| {
        let options = toast_options(toast_secs);
        match level {
            LogLevel::Success => toasts.success(message, options),
            LogLevel::Error => toasts.error(message, options),
            LogLevel::Warning => toasts.warning(message, options),
            LogLevel::Info => toasts.info(message, options),
        }
    })
}

impl Notifier {
    pub fn success(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{message}");
        self.show(LogLevel::Success, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{message}");
        self.show(LogLevel::Info, message);
    }

    /// Report a failed request. Validation errors are rendered inline by the
    /// form that caused them, so callers should route those elsewhere first.
    pub fn error(&self, err: &ApiError) {
        tracing::warn!("{err}");
        if err.is_unauthorized() {
            self.session.peek().expire();
            let mut auth = self.auth;
            auth.set(AuthState {
                user: None,
                loading: false,
            });
        }
        self.show(LogLevel::Error, err.user_message());
    }

    fn show(&self, level: LogLevel, message: String) {
        let mut log = self.log;
        log_activity(&mut log, level, &message);
        self.toast.call((level, message));
    }
}
