use api::{ApiError, Credentials, FieldErrors, Registration, User};
use dioxus::prelude::*;

use super::field_error;
use crate::auth::{use_auth, use_session, AuthState};
use crate::components::{Button, FormField, TextInput};
use crate::notify::use_notifier;

/// Route a failed sign-in to the form or to a toast.
fn report(err: ApiError, mut errors: Signal<FieldErrors>, mut message: Signal<Option<String>>) {
    match err {
        ApiError::Validation { fields, .. } if !fields.is_empty() => errors.set(fields),
        other => message.set(Some(other.user_message())),
    }
}

fn signed_in(mut auth: Signal<AuthState>, user: User) {
    tracing::info!("signed in as {}", user.email);
    auth.set(AuthState {
        user: Some(user),
        loading: false,
    });
}

#[component]
pub fn LoginView(on_success: EventHandler<()>, on_register: EventHandler<()>) -> Element {
    let session = use_session();
    let auth = use_auth();
    let mut form = use_signal(Credentials::default);
    let mut errors = use_signal(FieldErrors::new);
    let mut message = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            busy.set(true);
            errors.set(FieldErrors::new());
            message.set(None);
            let session = session.peek().clone();
            match session.login(&form()).await {
                Ok(user) => {
                    signed_in(auth, user);
                    on_success.call(());
                }
                Err(e) => report(e, errors, message),
            }
            busy.set(false);
        });
    };

    let f = form();
    rsx! {
        div {
            class: "auth-page",
            form {
                class: "auth-card",
                onsubmit: onsubmit,
                h1 { class: "auth-title", "Villa admin" }
                p { class: "view-muted", "Sign in to manage properties, upsells and orders." }
                if let Some(text) = message() {
                    p { class: "form-error", "{text}" }
                }
                FormField { label: "Email", html_for: "email", error: field_error(&errors, "email"),
                    TextInput { id: "email", r#type: "email", value: f.email.clone(), oninput: move |v| form.write().email = v }
                }
                FormField { label: "Password", html_for: "password", error: field_error(&errors, "password"),
                    TextInput { id: "password", r#type: "password", value: f.password.clone(), oninput: move |v| form.write().password = v }
                }
                Button { r#type: "submit", disabled: busy(), if busy() { "Signing in..." } else { "Sign in" } }
                p {
                    class: "auth-switch",
                    "No account yet? "
                    a { href: "#", onclick: move |evt: MouseEvent| { evt.prevent_default(); on_register.call(()) }, "Create one" }
                }
            }
        }
    }
}

#[component]
pub fn RegisterView(on_success: EventHandler<()>, on_login: EventHandler<()>) -> Element {
    let session = use_session();
    let auth = use_auth();
    let notifier = use_notifier();
    let mut form = use_signal(Registration::default);
    let mut errors = use_signal(FieldErrors::new);
    let mut message = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            busy.set(true);
            errors.set(FieldErrors::new());
            message.set(None);
            let session = session.peek().clone();
            match session.register(&form()).await {
                Ok(user) => {
                    signed_in(auth, user);
                    notifier.success("Welcome! Add your first property to get started.");
                    on_success.call(());
                }
                Err(e) => report(e, errors, message),
            }
            busy.set(false);
        });
    };

    let f = form();
    rsx! {
        div {
            class: "auth-page",
            form {
                class: "auth-card",
                onsubmit: onsubmit,
                h1 { class: "auth-title", "Create your account" }
                if let Some(text) = message() {
                    p { class: "form-error", "{text}" }
                }
                FormField { label: "Name", html_for: "name", error: field_error(&errors, "name"),
                    TextInput { id: "name", value: f.name.clone(), oninput: move |v| form.write().name = v }
                }
                FormField { label: "Email", html_for: "email", error: field_error(&errors, "email"),
                    TextInput { id: "email", r#type: "email", value: f.email.clone(), oninput: move |v| form.write().email = v }
                }
                FormField { label: "Password", html_for: "password", error: field_error(&errors, "password"),
                    TextInput { id: "password", r#type: "password", value: f.password.clone(), oninput: move |v| form.write().password = v }
                }
                FormField { label: "Confirm password", html_for: "password_confirmation", error: field_error(&errors, "password_confirmation"),
                    TextInput { id: "password_confirmation", r#type: "password", value: f.password_confirmation.clone(), oninput: move |v| form.write().password_confirmation = v }
                }
                Button { r#type: "submit", disabled: busy(), if busy() { "Creating account..." } else { "Create account" } }
                p {
                    class: "auth-switch",
                    "Already registered? "
                    a { href: "#", onclick: move |evt: MouseEvent| { evt.prevent_default(); on_login.call(()) }, "Sign in" }
                }
            }
        }
    }
}
