use api::{ApiError, FieldErrors, PasswordChange, ProfileUpdate, StripeStatus};
use dioxus::prelude::*;

use super::{field_error, use_backend};
use crate::auth::{use_auth, AuthState};
use crate::browser::open_external;
use crate::components::{Button, ButtonVariant, Empty, FormField, Loading, TextInput};
use crate::icons::FaCreditCard;
use crate::query::use_cached;
use crate::Icon;

#[component]
pub fn SettingsView() -> Element {
    rsx! {
        div {
            class: "view-page form-page",
            ProfileSection {}
            PasswordSection {}
            PayoutSection {}
        }
    }
}

#[component]
fn ProfileSection() -> Element {
    let backend = use_backend();
    let mut auth = use_auth();
    let mut form = use_signal(|| {
        auth.peek()
            .user
            .as_ref()
            .map(ProfileUpdate::from_user)
            .unwrap_or_default()
    });
    let mut errors = use_signal(FieldErrors::new);
    let mut saving = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            saving.set(true);
            errors.set(FieldErrors::new());
            let update = form();
            match backend.client().update_profile(&update).await {
                Ok(user) => {
                    backend.session().peek().set_user(Some(user.clone()));
                    auth.set(AuthState {
                        user: Some(user),
                        loading: false,
                    });
                    backend.notifier().success("Profile updated");
                }
                Err(ApiError::Validation { fields, .. }) if !fields.is_empty() => errors.set(fields),
                Err(e) => backend.notifier().error(&e),
            }
            saving.set(false);
        });
    };

    let f = form();
    rsx! {
        form {
            class: "panel",
            onsubmit: onsubmit,
            h3 { class: "view-section-title", "Profile" }
            FormField { label: "Name", html_for: "profile_name", error: field_error(&errors, "name"),
                TextInput { id: "profile_name", value: f.name.clone(), oninput: move |v| form.write().name = v }
            }
            FormField { label: "Email", html_for: "profile_email", error: field_error(&errors, "email"),
                TextInput { id: "profile_email", r#type: "email", value: f.email.clone(), oninput: move |v| form.write().email = v }
            }
            div {
                class: "form-actions",
                Button { r#type: "submit", disabled: saving(), if saving() { "Saving..." } else { "Save profile" } }
            }
        }
    }
}

#[component]
fn PasswordSection() -> Element {
    let backend = use_backend();
    let mut form = use_signal(PasswordChange::default);
    let mut errors = use_signal(FieldErrors::new);
    let mut saving = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            saving.set(true);
            errors.set(FieldErrors::new());
            match backend.client().change_password(&form()).await {
                Ok(()) => {
                    form.set(PasswordChange::default());
                    backend.notifier().success("Password changed");
                }
                Err(ApiError::Validation { fields, .. }) if !fields.is_empty() => errors.set(fields),
                Err(e) => backend.notifier().error(&e),
            }
            saving.set(false);
        });
    };

    let f = form();
    rsx! {
        form {
            class: "panel",
            onsubmit: onsubmit,
            h3 { class: "view-section-title", "Password" }
            FormField { label: "Current password", html_for: "current_password", error: field_error(&errors, "current_password"),
                TextInput { id: "current_password", r#type: "password", value: f.current_password.clone(), oninput: move |v| form.write().current_password = v }
            }
            div {
                class: "form-row",
                FormField { label: "New password", html_for: "new_password", error: field_error(&errors, "password"),
                    TextInput { id: "new_password", r#type: "password", value: f.password.clone(), oninput: move |v| form.write().password = v }
                }
                FormField { label: "Confirm", html_for: "password_confirmation", error: field_error(&errors, "password_confirmation"),
                    TextInput { id: "password_confirmation", r#type: "password", value: f.password_confirmation.clone(), oninput: move |v| form.write().password_confirmation = v }
                }
            }
            div {
                class: "form-actions",
                Button { r#type: "submit", disabled: saving(), if saving() { "Saving..." } else { "Change password" } }
            }
        }
    }
}

#[component]
fn PayoutSection() -> Element {
    let backend = use_backend();
    let mut connecting = use_signal(|| false);
    let status = use_cached(
        || "stripe/status".to_string(),
        move || {
            let client = backend.client();
            async move { client.stripe_status().await }
        },
    );

    let connect = move |_| async move {
        connecting.set(true);
        match backend.client().stripe_connect().await {
            Ok(url) => open_external(&url),
            Err(e) => {
                backend.notifier().error(&e);
                connecting.set(false);
            }
        }
    };

    let body = match &*status.read() {
        None => rsx! { Loading {} },
        Some(Err(_)) => rsx! { Empty { message: "Payout status is unavailable." } },
        Some(Ok(s)) => {
            let s: StripeStatus = s.clone();
            let label = s.label();
            let account = s.account_id.clone().unwrap_or_default();
            let ready = s.connected && s.onboarding_complete;
            rsx! {
                p {
                    span { class: if ready { "badge badge--active" } else { "badge badge--pending" }, "{label}" }
                    if !account.is_empty() {
                        code { class: "view-muted", " {account}" }
                    }
                }
                if s.connected {
                    ul {
                        class: "view-muted",
                        li { if s.charges_enabled { "Charges enabled" } else { "Charges not yet enabled" } }
                        li { if s.payouts_enabled { "Payouts enabled" } else { "Payouts not yet enabled" } }
                    }
                }
                if !ready {
                    Button {
                        variant: ButtonVariant::Primary,
                        disabled: connecting(),
                        onclick: connect,
                        Icon { icon: FaCreditCard, width: 14, height: 14 }
                        if s.connected { " Finish onboarding" } else { " Connect with Stripe" }
                    }
                }
            }
        }
    };

    rsx! {
        section {
            class: "panel",
            h3 { class: "view-section-title", "Payouts" }
            p { class: "view-muted", "Guests pay through Stripe. Connect an account to receive your share." }
            {body}
        }
    }
}
