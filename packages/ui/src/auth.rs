//! Session context and hooks for the UI.

use api::{Session, User};
use dioxus::prelude::*;
use store::{DashboardConfig, TokenStore};

use crate::activity_log::ActivityLog;
use crate::notify::{use_toast_callback, Notifier};
use crate::query::QueryClient;

/// Shared handle to the session; clones of the inner value share state.
pub type SessionHandle = Signal<Session>;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    /// True until the persisted token has been checked.
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>()
}

pub fn use_config() -> DashboardConfig {
    use_context::<DashboardConfig>()
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
fn token_store() -> impl TokenStore {
    store::LocalStorageTokenStore::new()
}

#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
fn token_store() -> impl TokenStore {
    store::MemoryTokenStore::new()
}

/// Provider component that owns the session and every app-wide context:
/// config, auth state, query cache, notifications and the activity log.
/// Wrap your app with this component, inside a `ToastProvider`.
#[component]
pub fn SessionProvider(config: DashboardConfig, children: Element) -> Element {
    let toast_secs = config.notifications.toast_secs;
    let base_url = config.api.base_url.clone();
    use_context_provider(|| config);

    let session: SessionHandle = use_context_provider(|| {
        Signal::new(Session::new(api::ApiClient::new(&base_url), token_store()))
    });
    let mut auth_state = use_context_provider(|| Signal::new(AuthState::default()));
    let log = use_context_provider(|| Signal::new(ActivityLog::default()));
    let toast = use_toast_callback(toast_secs);
    use_context_provider(|| Notifier {
        toast,
        log,
        auth: auth_state,
        session,
    });
    let queries = use_context_provider(QueryClient::new);

    // Validate the persisted token once on mount
    let _ = use_resource(move || async move {
        let session = session.peek().clone();
        let user = session.init().await;
        auth_state.set(AuthState {
            user,
            loading: false,
        });
    });

    // Cached data belongs to whoever fetched it
    use_effect(move || {
        if auth_state().user.is_none() {
            queries.clear();
        }
    });

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();
    let session = use_session();
    let mut busy = use_signal(|| false);

    let onclick = move |_| async move {
        busy.set(true);
        let session = session.peek().clone();
        session.logout().await;
        auth_state.set(AuthState {
            user: None,
            loading: false,
        });
        busy.set(false);
    };

    rsx! {
        button {
            class: "{class}",
            disabled: busy(),
            onclick: onclick,
            "{label}"
        }
    }
}
