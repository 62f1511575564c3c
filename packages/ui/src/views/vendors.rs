use api::forms::VENDOR_SERVICE_TYPES;
use api::{EntityForm, FieldErrors, VendorForm};
use dioxus::prelude::*;
use store::search::filter;
use store::Vendor;

use super::{field_error, form_state, use_backend, use_collection, use_entity, FormState};
use crate::components::{
    ActiveBadge, Button, ButtonVariant, Checkbox, ConfirmDialog, Empty, FormField, Loading,
    SearchBox, Select, TextArea, TextInput,
};
use crate::icons::{FaPen, FaPlus, FaTrash};
use crate::Icon;

#[component]
pub fn VendorsView(on_create: EventHandler<()>, on_edit: EventHandler<i64>) -> Element {
    let backend = use_backend();
    let vendors = use_collection::<Vendor>();
    let mut search = use_signal(String::new);
    let mut pending_delete = use_signal(|| Option::<(i64, String)>::None);
    let mut deleting = use_signal(|| false);

    let body = match &*vendors.read() {
        None => rsx! { Loading {} },
        Some(Err(_)) => rsx! { Empty { message: "Vendors could not be loaded." } },
        Some(Ok(all)) if all.is_empty() => rsx! {
            Empty {
                message: "No vendors yet.",
                Button { onclick: move |_| on_create.call(()), "Add a vendor" }
            }
        },
        Some(Ok(all)) => {
            let query = search();
            let visible: Vec<Vendor> = filter(all, &query).into_iter().cloned().collect();
            rsx! {
                if visible.is_empty() {
                    Empty { message: "No vendors match \"{query}\"." }
                } else {
                    table {
                        class: "data-table",
                        thead {
                            tr {
                                th { "Name" }
                                th { "Service" }
                                th { "Contact" }
                                th { "Status" }
                                th {}
                            }
                        }
                        tbody {
                            for vendor in visible {
                                VendorRow {
                                    key: "{vendor.id}",
                                    vendor: vendor.clone(),
                                    on_edit,
                                    on_toggle: move |v: Vendor| async move { backend.toggle_active(v).await },
                                    on_delete: move |v: Vendor| pending_delete.set(Some((v.id, v.name))),
                                }
                            }
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
                    placeholder: "Search name, email or service",
                    oninput: move |q| search.set(q),
                }
                Button {
                    onclick: move |_| on_create.call(()),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    " New vendor"
                }
            }
            {body}
        }

        if let Some((vendor_id, name)) = pending_delete() {
            ConfirmDialog {
                title: "Delete vendor",
                message: format!("Delete \"{name}\"? Upsells assigned to this vendor must be reassigned."),
                busy: deleting(),
                on_cancel: move |_| pending_delete.set(None),
                on_confirm: move |_| async move {
                    deleting.set(true);
                    if backend.delete::<Vendor>(vendor_id).await {
                        pending_delete.set(None);
                    }
                    deleting.set(false);
                },
            }
        }
    }
}

#[component]
fn VendorRow(
    vendor: Vendor,
    on_edit: EventHandler<i64>,
    on_toggle: EventHandler<Vendor>,
    on_delete: EventHandler<Vendor>,
) -> Element {
    let id = vendor.id;
    let contact = [&vendor.email, &vendor.phone, &vendor.whatsapp]
        .into_iter()
        .flatten()
        .filter(|c| !c.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" · ");
    let toggled = vendor.clone();
    let deleted = vendor.clone();

    rsx! {
        tr {
            td { "{vendor.name}" }
            td { span { class: "tag", "{vendor.service_type}" } }
            td { class: "view-muted", "{contact}" }
            td { ActiveBadge { active: vendor.is_active } }
            td {
                class: "row-actions",
                Button {
                    variant: ButtonVariant::Ghost,
                    title: "Edit",
                    onclick: move |_| on_edit.call(id),
                    Icon { icon: FaPen, width: 12, height: 12 }
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    onclick: move |_| on_toggle.call(toggled.clone()),
                    if vendor.is_active { "Deactivate" } else { "Activate" }
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    title: "Delete",
                    onclick: move |_| on_delete.call(deleted.clone()),
                    Icon { icon: FaTrash, width: 12, height: 12 }
                }
            }
        }
    }
}

#[component]
pub fn VendorFormView(id: Option<i64>, on_done: EventHandler<()>) -> Element {
    let backend = use_backend();
    let existing = use_entity::<Vendor>(id);
    let mut form = use_signal(VendorForm::default);
    let errors = use_signal(FieldErrors::new);
    let mut saving = use_signal(|| false);

    use_effect(move || {
        if let Some(Ok(Some(vendor))) = &*existing.read() {
            form.set(VendorForm::from_entity(vendor));
        }
    });

    match form_state(id, existing.read().as_ref()) {
        FormState::Loading => return rsx! { Loading {} },
        FormState::Unavailable => {
            return rsx! { Empty { message: "This vendor could not be loaded." } };
        }
        FormState::Ready => {}
    }

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            saving.set(true);
            let saved = backend.save(id, form(), None, errors).await;
            saving.set(false);
            if saved {
                on_done.call(());
            }
        });
    };

    let f = form();
    let mut service_options: Vec<(String, String)> = VENDOR_SERVICE_TYPES
        .iter()
        .map(|t| (t.to_string(), t.to_string()))
        .collect();
    // Keep a backend-provided tag selectable even if it is not in the preset list
    if !f.service_type.is_empty() && !VENDOR_SERVICE_TYPES.contains(&f.service_type.as_str()) {
        service_options.push((f.service_type.clone(), f.service_type.clone()));
    }

    rsx! {
        form {
            class: "view-page form-page",
            onsubmit: onsubmit,
            h2 { class: "view-title", if id.is_some() { "Edit vendor" } else { "New vendor" } }

            FormField { label: "Name", html_for: "name", error: field_error(&errors, "name"),
                TextInput { id: "name", value: f.name.clone(), oninput: move |v| form.write().name = v }
            }
            FormField { label: "Service type", html_for: "service_type", error: field_error(&errors, "service_type"),
                Select {
                    id: "service_type",
                    value: f.service_type.clone(),
                    options: service_options,
                    placeholder: Some("Choose a service".to_string()),
                    onchange: move |v| form.write().service_type = v,
                }
            }
            div {
                class: "form-row",
                FormField { label: "Email", html_for: "email", error: field_error(&errors, "email"),
                    TextInput { id: "email", r#type: "email", value: f.email.clone(), oninput: move |v| form.write().email = v }
                }
                FormField { label: "Phone", html_for: "phone", error: field_error(&errors, "phone"),
                    TextInput { id: "phone", r#type: "tel", value: f.phone.clone(), oninput: move |v| form.write().phone = v }
                }
                FormField { label: "WhatsApp", html_for: "whatsapp", error: field_error(&errors, "whatsapp"),
                    TextInput { id: "whatsapp", r#type: "tel", value: f.whatsapp.clone(), oninput: move |v| form.write().whatsapp = v }
                }
            }
            FormField { label: "Notes", html_for: "notes", error: field_error(&errors, "notes"),
                TextArea { id: "notes", value: f.notes.clone(), oninput: move |v| form.write().notes = v }
            }
            Checkbox {
                id: "is_active",
                label: "Active",
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
