//! # Session: the authenticated user and their token
//!
//! [`Session`] is an explicitly scoped handle rather than a global: the web
//! package builds one at startup and the UI injects it through context. Clones
//! share state, so every component sees the same user.
//!
//! | Phase | Effect |
//! |-------|--------|
//! | [`Session::init`] | Read the persisted token, validate it with `GET /me`. A rejected token is cleared and the session falls back to logged out. |
//! | [`Session::login`] / [`Session::register`] | Store the returned token (client and persisted store) and the user. |
//! | [`Session::logout`] | Best-effort `POST /logout`, then clear the token and the user whatever the backend said. |
//! | [`Session::expire`] | Local teardown after any request came back 401. |
//!
//! If `/me` fails for a reason other than rejection (backend unreachable) the
//! token is kept so a reload can retry, but no user is set.

use std::sync::{Arc, Mutex, PoisonError};

use store::TokenStore;

use crate::auth::{Credentials, Registration};
use crate::client::ApiClient;
use crate::error::{ApiError, Result};
use crate::models::User;
use crate::transport::{HttpTransport, Transport};

#[derive(Clone)]
pub struct Session<T = HttpTransport> {
    client: ApiClient<T>,
    tokens: Arc<dyn TokenStore>,
    user: Arc<Mutex<Option<User>>>,
}

impl<T: Transport + Clone> Session<T> {
    pub fn new(client: ApiClient<T>, tokens: impl TokenStore + 'static) -> Self {
        Self {
            client,
            tokens: Arc::new(tokens),
            user: Arc::new(Mutex::new(None)),
        }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub fn current_user(&self) -> Option<User> {
        self.user.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Replace the cached user, e.g. after a profile update.
    pub fn set_user(&self, user: Option<User>) {
        *self.user.lock().unwrap_or_else(PoisonError::into_inner) = user;
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// Resume a persisted session, returning the user when the token is valid.
    pub async fn init(&self) -> Option<User> {
        let token = self.tokens.load()?;
        self.client.set_token(Some(token));

        match self.client.me().await {
            Ok(user) => {
                tracing::info!("session restored for {}", user.email);
                self.set_user(Some(user.clone()));
                Some(user)
            }
            Err(ApiError::Transport(e)) => {
                tracing::warn!("could not validate session: {e}");
                self.set_user(None);
                None
            }
            Err(e) => {
                tracing::info!("stored token rejected: {e}");
                self.expire();
                None
            }
        }
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<User> {
        let response = self.client.login(credentials).await?;
        self.start(response.token, response.user.clone());
        tracing::info!("logged in as {}", response.user.email);
        Ok(response.user)
    }

    pub async fn register(&self, registration: &Registration) -> Result<User> {
        let response = self.client.register(registration).await?;
        self.start(response.token, response.user.clone());
        tracing::info!("registered {}", response.user.email);
        Ok(response.user)
    }

    fn start(&self, token: String, user: User) {
        self.tokens.save(&token);
        self.client.set_token(Some(token));
        self.set_user(Some(user));
    }

    pub async fn logout(&self) {
        if let Err(e) = self.client.logout().await {
            tracing::warn!("logout request failed: {e}");
        }
        self.expire();
        tracing::info!("logged out");
    }

    /// Drop the token and user without calling the backend.
    pub fn expire(&self) {
        self.tokens.clear();
        self.client.set_token(None);
        self.set_user(None);
    }
}
