use api::{EntityForm, FieldErrors, ImageUpload, PropertyForm};
use dioxus::prelude::*;
use store::search::filter;
use store::{PaymentProcessor, PayoutSchedule, Property};

use super::{field_error, form_state, use_backend, use_collection, use_entity, FormState};
use crate::auth::use_config;
use crate::browser::copy_to_clipboard;
use crate::components::{
    ActiveBadge, Button, ButtonVariant, Checkbox, ConfirmDialog, Empty, FormField, Loading,
    SearchBox, Select, TextInput,
};
use crate::icons::{FaCopy, FaPen, FaPlus, FaTrash};
use crate::Icon;

#[component]
pub fn PropertiesView(on_create: EventHandler<()>, on_edit: EventHandler<i64>) -> Element {
    let backend = use_backend();
    let config = use_config();
    let properties = use_collection::<Property>();
    let mut search = use_signal(String::new);
    let mut pending_delete = use_signal(|| Option::<Property>::None);
    let mut deleting = use_signal(|| false);

    let guest_url = config.guest.app_url.clone();

    let body = match &*properties.read() {
        None => rsx! { Loading {} },
        Some(Err(_)) => rsx! { Empty { message: "Properties could not be loaded." } },
        Some(Ok(all)) if all.is_empty() => rsx! {
            Empty {
                message: "No properties yet.",
                Button { onclick: move |_| on_create.call(()), "Add your first property" }
            }
        },
        Some(Ok(all)) => {
            let query = search();
            let visible: Vec<Property> = filter(all, &query).into_iter().cloned().collect();
            rsx! {
                if visible.is_empty() {
                    Empty { message: "No properties match \"{query}\"." }
                }
                div {
                    class: "card-grid",
                    for property in visible {
                        PropertyCard {
                            key: "{property.id}",
                            guest_link: property.guest_link(&guest_url),
                            property: property.clone(),
                            on_edit,
                            on_toggle: move |p: Property| async move { backend.toggle_active(p).await },
                            on_delete: move |p: Property| pending_delete.set(Some(p)),
                        }
                    }
                }
            }
        }
    };

    rsx! {
        div {
            class: "view-page",
            div {
                class: "view-toolbar",
                SearchBox {
                    value: search(),
                    placeholder: "Search name, address or city",
                    oninput: move |q| search.set(q),
                }
                Button {
                    onclick: move |_| on_create.call(()),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    " New property"
                }
            }
            {body}
        }

        if let Some((property_id, name)) = pending_delete().map(|p| (p.id, p.name)) {
            ConfirmDialog {
                title: "Delete property",
                message: format!("Delete \"{name}\"? Its upsells stop being offered to guests."),
                busy: deleting(),
                on_cancel: move |_| pending_delete.set(None),
                on_confirm: move |_| async move {
                    deleting.set(true);
                    if backend.delete::<Property>(property_id).await {
                        pending_delete.set(None);
                    }
                    deleting.set(false);
                },
            }
        }
    }
}

#[component]
fn PropertyCard(
    property: Property,
    guest_link: String,
    on_edit: EventHandler<i64>,
    on_toggle: EventHandler<Property>,
    on_delete: EventHandler<Property>,
) -> Element {
    let backend = use_backend();
    let id = property.id;
    let location = property.location();
    let processor = property.payment_processor.as_str();
    let link = guest_link.clone();
    let toggled = property.clone();
    let deleted = property.clone();

    rsx! {
        div {
            class: "card",
            if let Some(url) = property.hero_image_url.as_ref().filter(|u| !u.is_empty()) {
                img { class: "card-image", src: "{url}", alt: "{property.name}" }
            }
            div {
                class: "card-body",
                div {
                    class: "card-title-row",
                    h3 { class: "card-title", "{property.name}" }
                    ActiveBadge { active: property.is_active }
                }
                if !location.is_empty() {
                    p { class: "view-muted", "{location}" }
                }
                p { class: "view-muted", "{property.currency} · {property.locale} · payouts via {processor}" }
                div {
                    class: "guest-link",
                    code { "{guest_link}" }
                    button {
                        class: "btn btn-ghost",
                        title: "Copy guest link",
                        onclick: move |_| {
                            copy_to_clipboard(&link);
                            backend.notifier().info("Guest link copied");
                        },
                        Icon { icon: FaCopy, width: 12, height: 12 }
                    }
                }
            }
            div {
                class: "card-actions",
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| on_edit.call(id),
                    Icon { icon: FaPen, width: 12, height: 12 }
                    " Edit"
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    onclick: move |_| on_toggle.call(toggled.clone()),
                    if property.is_active { "Deactivate" } else { "Activate" }
                }
                Button {
                    variant: ButtonVariant::Danger,
                    onclick: move |_| on_delete.call(deleted.clone()),
                    Icon { icon: FaTrash, width: 12, height: 12 }
                }
            }
        }
    }
}

#[component]
pub fn PropertyFormView(id: Option<i64>, on_done: EventHandler<()>) -> Element {
    let backend = use_backend();
    let config = use_config();
    let existing = use_entity::<Property>(id);
    let mut form = use_signal(PropertyForm::default);
    let errors = use_signal(FieldErrors::new);
    let mut image = use_signal(|| Option::<ImageUpload>::None);
    let mut saving = use_signal(|| false);
    let mut access_token = use_signal(String::new);

    // Seed the form once the record arrives in edit mode
    use_effect(move || {
        if let Some(Ok(Some(property))) = &*existing.read() {
            form.set(PropertyForm::from_entity(property));
            access_token.set(property.access_token.clone());
        }
    });

    match form_state(id, existing.read().as_ref()) {
        FormState::Loading => return rsx! { Loading {} },
        FormState::Unavailable => {
            return rsx! { Empty { message: "This property could not be loaded." } };
        }
        FormState::Ready => {}
    }

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            saving.set(true);
            let saved = backend.save(id, form(), image(), errors).await;
            saving.set(false);
            if saved {
                on_done.call(());
            }
        });
    };

    let f = form();
    let processor_options = vec![
        ("stripe".to_string(), "Stripe".to_string()),
        ("wise".to_string(), "Wise".to_string()),
    ];
    let schedule_options: Vec<(String, String)> = PayoutSchedule::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), capitalize(s.as_str())))
        .collect();

    rsx! {
        form {
            class: "view-page form-page",
            onsubmit: onsubmit,
            h2 { class: "view-title", if id.is_some() { "Edit property" } else { "New property" } }

            if id.is_some() && !access_token().is_empty() {
                div {
                    class: "guest-link",
                    span { class: "view-muted", "Guest link: " }
                    code { {format!("{}/{}", config.guest.app_url.trim_end_matches('/'), access_token())} }
                }
            }

            FormField { label: "Name", html_for: "name", error: field_error(&errors, "name"),
                TextInput { id: "name", value: f.name.clone(), oninput: move |v| form.write().name = v }
            }
            FormField { label: "Address", html_for: "address", error: field_error(&errors, "address"),
                TextInput { id: "address", value: f.address.clone(), oninput: move |v| form.write().address = v }
            }
            div {
                class: "form-row",
                FormField { label: "City", html_for: "city", error: field_error(&errors, "city"),
                    TextInput { id: "city", value: f.city.clone(), oninput: move |v| form.write().city = v }
                }
                FormField { label: "Country", html_for: "country", error: field_error(&errors, "country"),
                    TextInput { id: "country", value: f.country.clone(), oninput: move |v| form.write().country = v }
                }
            }
            div {
                class: "form-row",
                FormField { label: "Locale", html_for: "locale", error: field_error(&errors, "locale"),
                    TextInput { id: "locale", value: f.locale.clone(), oninput: move |v| form.write().locale = v }
                }
                FormField { label: "Currency", html_for: "currency", error: field_error(&errors, "currency"),
                    TextInput { id: "currency", value: f.currency.clone(), placeholder: "EUR", oninput: move |v| form.write().currency = v }
                }
            }

            ImagePicker {
                label: "Hero image",
                current_url: f.hero_image_url.clone(),
                error: field_error(&errors, "hero_image_url"),
                on_pick: move |picked| image.set(Some(picked)),
            }

            h3 { class: "view-section-title", "Payouts" }
            div {
                class: "form-row",
                FormField { label: "Processor", html_for: "payment_processor", error: field_error(&errors, "payment_processor"),
                    Select {
                        id: "payment_processor",
                        value: f.payment_processor.as_str().to_string(),
                        options: processor_options,
                        onchange: move |v: String| {
                            form.write().payment_processor = if v == "wise" { PaymentProcessor::Wise } else { PaymentProcessor::Stripe };
                        },
                    }
                }
                FormField { label: "Schedule", html_for: "payout_schedule", error: field_error(&errors, "payout_schedule"),
                    Select {
                        id: "payout_schedule",
                        value: f.payout_schedule.as_str().to_string(),
                        options: schedule_options,
                        onchange: move |v: String| {
                            if let Some(s) = PayoutSchedule::ALL.into_iter().find(|s| s.as_str() == v) {
                                form.write().payout_schedule = s;
                            }
                        },
                    }
                }
            }
            if f.payment_processor == PaymentProcessor::Stripe {
                FormField { label: "Stripe account id", html_for: "stripe_account_id", error: field_error(&errors, "stripe_account_id"),
                    hint: "Leave empty to use your own connected account.",
                    TextInput { id: "stripe_account_id", value: f.stripe_account_id.clone(), placeholder: "acct_...", oninput: move |v| form.write().stripe_account_id = v }
                }
            } else {
                FormField { label: "Account holder", html_for: "wise_account_holder", error: field_error(&errors, "wise_account_holder"),
                    TextInput { id: "wise_account_holder", value: f.wise_account_holder.clone(), oninput: move |v| form.write().wise_account_holder = v }
                }
                div {
                    class: "form-row",
                    FormField { label: "IBAN", html_for: "wise_iban", error: field_error(&errors, "wise_iban"),
                        TextInput { id: "wise_iban", value: f.wise_iban.clone(), oninput: move |v| form.write().wise_iban = v }
                    }
                    FormField { label: "Wise email", html_for: "wise_email", error: field_error(&errors, "wise_email"),
                        TextInput { id: "wise_email", r#type: "email", value: f.wise_email.clone(), oninput: move |v| form.write().wise_email = v }
                    }
                }
            }

            Checkbox {
                id: "is_active",
                label: "Active (visible to guests)",
                checked: f.is_active,
                onchange: move |v| form.write().is_active = v,
            }

            div {
                class: "form-actions",
                Button { variant: ButtonVariant::Outline, onclick: move |_| on_done.call(()), "Cancel" }
                Button { r#type: "submit", disabled: saving(), if saving() { "Saving..." } else { "Save" } }
            }
        }
    }
}

/// File input that reads the chosen image into memory. The upload itself
/// happens on submit.
#[component]
pub(crate) fn ImagePicker(
    label: String,
    current_url: String,
    error: Option<String>,
    on_pick: EventHandler<ImageUpload>,
) -> Element {
    let mut picked_name = use_signal(|| Option::<String>::None);

    let onchange = move |evt: FormEvent| async move {
        let Some(engine) = evt.files() else {
            return;
        };
        let Some(name) = engine.files().into_iter().next() else {
            return;
        };
        match engine.read_file(&name).await {
            Some(bytes) => {
                picked_name.set(Some(name.clone()));
                on_pick.call(ImageUpload::new(name, bytes));
            }
            None => tracing::warn!("could not read {name}"),
        }
    };

    rsx! {
        FormField { label: label, html_for: "image", error: error,
            if let Some(name) = picked_name() {
                p { class: "view-muted", "Will upload {name} on save." }
            } else if !current_url.is_empty() {
                img { class: "form-image-preview", src: "{current_url}" }
            }
            input {
                id: "image",
                r#type: "file",
                accept: "image/*",
                onchange: onchange,
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("weekly"), "Weekly");
        assert_eq!(capitalize(""), "");
    }
}
