//! Page-level views. Platform packages wrap these in routes and supply the
//! navigation callbacks.

use api::resource::Resource as Entity;
use api::{invalidate_after_write, ApiClient, ApiError, EntityForm, FieldErrors, ImageUpload};
use dioxus::prelude::*;

use crate::auth::{use_session, SessionHandle};
use crate::notify::{use_notifier, Notifier};
use crate::query::{use_cached, use_query_client, QueryClient};

mod analytics;
pub use analytics::AnalyticsView;

mod login;
pub use login::{LoginView, RegisterView};

mod orders;
pub use orders::OrdersView;

mod properties;
pub use properties::{PropertiesView, PropertyFormView};

mod settings;
pub use settings::SettingsView;

mod upsells;
pub use upsells::{UpsellFormView, UpsellsView};

mod vendors;
pub use vendors::{VendorFormView, VendorsView};

/// Everything a view needs to talk to the backend and report the outcome.
#[derive(Clone, Copy, PartialEq)]
pub(crate) struct Backend {
    session: SessionHandle,
    queries: QueryClient,
    notifier: Notifier,
}

pub(crate) fn use_backend() -> Backend {
    Backend {
        session: use_session(),
        queries: use_query_client(),
        notifier: use_notifier(),
    }
}

impl Backend {
    pub fn client(&self) -> ApiClient {
        self.session.peek().client().clone()
    }

    pub fn session(&self) -> SessionHandle {
        self.session
    }

    pub fn queries(&self) -> QueryClient {
        self.queries
    }

    pub fn notifier(&self) -> Notifier {
        self.notifier
    }

    /// Submit a create/edit form. Validation problems land in `errors`,
    /// anything else becomes a toast. Returns true once saved.
    pub async fn save<F: EntityForm>(
        &self,
        id: Option<i64>,
        form: F,
        image: Option<ImageUpload>,
        mut errors: Signal<FieldErrors>,
    ) -> bool {
        errors.set(FieldErrors::new());
        match self.client().submit(id, &form, image).await {
            Ok(saved) => {
                let saved_id = saved.id();
                self.queries
                    .invalidate_with(|cache| invalidate_after_write::<F::Entity>(cache, Some(saved_id)));
                let verb = if id.is_some() { "updated" } else { "created" };
                self.notifier
                    .success(format!("{} {verb}", <F::Entity as Entity>::NOUN));
                true
            }
            Err(ApiError::Validation { fields, message }) if !fields.is_empty() => {
                tracing::debug!("form rejected: {message}");
                errors.set(fields);
                false
            }
            Err(e) => {
                self.notifier.error(&e);
                false
            }
        }
    }

    pub async fn delete<R: Entity>(&self, id: i64) -> bool {
        match self.client().remove::<R>(id).await {
            Ok(()) => {
                self.queries
                    .invalidate_with(|cache| invalidate_after_write::<R>(cache, Some(id)));
                self.notifier.success(format!("{} deleted", R::NOUN));
                true
            }
            Err(e) => {
                self.notifier.error(&e);
                false
            }
        }
    }

    pub async fn toggle_active<R: Entity>(&self, item: R) {
        match self.client().toggle_active(&item).await {
            Ok(updated) => {
                self.queries
                    .invalidate_with(|cache| invalidate_after_write::<R>(cache, Some(updated.id())));
                let state = if updated.is_active() { "activated" } else { "deactivated" };
                self.notifier.success(format!("{} {state}", R::NOUN));
            }
            Err(e) => self.notifier.error(&e),
        }
    }
}

/// The cached collection of `R`.
pub(crate) fn use_collection<R: Entity>() -> Resource<Result<Vec<R>, ApiError>> {
    let backend = use_backend();
    use_cached(R::collection_key, move || {
        let client = backend.client();
        async move { client.list::<R>().await }
    })
}

/// One `R` in edit mode; resolves to `None` without a request in create mode.
pub(crate) fn use_entity<R: Entity>(id: Option<i64>) -> Resource<Result<Option<R>, ApiError>> {
    let backend = use_backend();
    use_cached(
        move || match id {
            Some(id) => R::entity_key(id),
            None => format!("{}/new", R::PATH),
        },
        move || {
            let client = backend.client();
            async move {
                match id {
                    Some(id) => client.fetch::<R>(id).await.map(Some),
                    None => Ok(None),
                }
            }
        },
    )
}

/// What an entity form can show for the current fetch state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum FormState {
    Loading,
    /// Edit mode whose record failed to load; the form must not be offered,
    /// since saving it would overwrite the record with defaults.
    Unavailable,
    Ready,
}

pub(crate) fn form_state<R>(id: Option<i64>, existing: Option<&Result<Option<R>, ApiError>>) -> FormState {
    match (id, existing) {
        (None, _) => FormState::Ready,
        (Some(_), None) => FormState::Loading,
        (Some(_), Some(Err(_))) => FormState::Unavailable,
        (Some(_), Some(Ok(_))) => FormState::Ready,
    }
}

/// Field error lookup for `FormField { error: ... }`.
pub(crate) fn field_error(errors: &Signal<FieldErrors>, field: &str) -> Option<String> {
    errors.read().get(field).cloned()
}
