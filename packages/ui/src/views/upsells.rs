use std::collections::HashMap;

use api::forms::UPSELL_CATEGORIES;
use api::{EntityForm, FieldErrors, ImageUpload, UpsellForm};
use dioxus::prelude::*;
use store::search::filter;
use store::{format_money, Property, Upsell, Vendor};

use super::properties::ImagePicker;
use super::{field_error, form_state, use_backend, use_collection, use_entity, FormState};
use crate::components::{
    ActiveBadge, Button, ButtonVariant, Checkbox, ConfirmDialog, Empty, FormField, Loading,
    SearchBox, Select, TextArea, TextInput,
};
use crate::icons::{FaPen, FaPlus, FaTrash};
use crate::Icon;

#[component]
pub fn UpsellsView(on_create: EventHandler<()>, on_edit: EventHandler<i64>) -> Element {
    let backend = use_backend();
    let upsells = use_collection::<Upsell>();
    let properties = use_collection::<Property>();
    let mut search = use_signal(String::new);
    let mut property_filter = use_signal(|| Option::<i64>::None);
    let mut pending_delete = use_signal(|| Option::<(i64, String)>::None);
    let mut deleting = use_signal(|| false);

    // Prices are shown in the currency of the property offering them
    let currencies: HashMap<i64, String> = match &*properties.read() {
        Some(Ok(all)) => all.iter().map(|p| (p.id, p.currency.clone())).collect(),
        _ => HashMap::new(),
    };
    let property_options: Vec<(String, String)> = match &*properties.read() {
        Some(Ok(all)) => all.iter().map(|p| (p.id.to_string(), p.name.clone())).collect(),
        _ => Vec::new(),
    };

    let body = match &*upsells.read() {
        None => rsx! { Loading {} },
        Some(Err(_)) => rsx! { Empty { message: "Upsells could not be loaded." } },
        Some(Ok(all)) if all.is_empty() => rsx! {
            Empty {
                message: "No upsells yet.",
                Button { onclick: move |_| on_create.call(()), "Create an upsell" }
            }
        },
        Some(Ok(all)) => {
            let query = search();
            let only = property_filter();
            let mut visible: Vec<Upsell> = filter(all, &query)
                .into_iter()
                .filter(|u| only.map_or(true, |id| u.property_id == id))
                .cloned()
                .collect();
            visible.sort_by_key(|u| (u.property_id, u.sort_order));
            rsx! {
                if visible.is_empty() {
                    Empty { message: "No upsells match." }
                } else {
                    table {
                        class: "data-table",
                        thead {
                            tr {
                                th { "Title" }
                                th { "Property" }
                                th { "Vendor" }
                                th { "Category" }
                                th { class: "num", "Price" }
                                th { "Status" }
                                th {}
                            }
                        }
                        tbody {
                            for upsell in visible {
                                UpsellRow {
                                    key: "{upsell.id}",
                                    currency: currencies.get(&upsell.property_id).cloned().unwrap_or_default(),
                                    upsell: upsell.clone(),
                                    on_edit,
                                    on_toggle: move |u: Upsell| async move { backend.toggle_active(u).await },
                                    on_delete: move |u: Upsell| pending_delete.set(Some((u.id, u.title))),
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    let selected_property = property_filter().map(|id| id.to_string()).unwrap_or_default();

    rsx! {
        div {
            class: "view-page",
            div {
                class: "view-toolbar",
                SearchBox {
                    value: search(),
                    placeholder: "Search title, category or description",
                    oninput: move |q| search.set(q),
                }
                Select {
                    id: "property_filter",
                    value: selected_property,
                    options: property_options,
                    placeholder: Some("All properties".to_string()),
                    onchange: move |v: String| property_filter.set(v.parse().ok()),
                }
                Button {
                    onclick: move |_| on_create.call(()),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    " New upsell"
                }
            }
            {body}
        }

        if let Some((upsell_id, title)) = pending_delete() {
            ConfirmDialog {
                title: "Delete upsell",
                message: format!("Delete \"{title}\"? Existing orders keep their record."),
                busy: deleting(),
                on_cancel: move |_| pending_delete.set(None),
                on_confirm: move |_| async move {
                    deleting.set(true);
                    if backend.delete::<Upsell>(upsell_id).await {
                        pending_delete.set(None);
                    }
                    deleting.set(false);
                },
            }
        }
    }
}

#[component]
fn UpsellRow(
    upsell: Upsell,
    currency: String,
    on_edit: EventHandler<i64>,
    on_toggle: EventHandler<Upsell>,
    on_delete: EventHandler<Upsell>,
) -> Element {
    let id = upsell.id;
    let price = format_money(upsell.price, &currency);
    let property = upsell.property.as_ref().map(|p| p.name.clone()).unwrap_or_default();
    let vendor = upsell.vendor.as_ref().map(|v| v.name.clone()).unwrap_or_default();
    let toggled = upsell.clone();
    let deleted = upsell.clone();

    rsx! {
        tr {
            td {
                div {
                    class: "cell-with-thumb",
                    if let Some(url) = upsell.image_url.as_ref().filter(|u| !u.is_empty()) {
                        img { class: "thumb", src: "{url}", alt: "" }
                    }
                    span { "{upsell.title}" }
                }
            }
            td { "{property}" }
            td { "{vendor}" }
            td { span { class: "tag", "{upsell.category}" } }
            td { class: "num", "{price}" }
            td { ActiveBadge { active: upsell.is_active } }
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
                    if upsell.is_active { "Deactivate" } else { "Activate" }
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
pub fn UpsellFormView(id: Option<i64>, on_done: EventHandler<()>) -> Element {
    let backend = use_backend();
    let existing = use_entity::<Upsell>(id);
    let properties = use_collection::<Property>();
    let vendors = use_collection::<Vendor>();
    let mut form = use_signal(UpsellForm::default);
    let errors = use_signal(FieldErrors::new);
    let mut image = use_signal(|| Option::<ImageUpload>::None);
    let mut saving = use_signal(|| false);

    use_effect(move || {
        if let Some(Ok(Some(upsell))) = &*existing.read() {
            form.set(UpsellForm::from_entity(upsell));
        }
    });

    match form_state(id, existing.read().as_ref()) {
        FormState::Loading => return rsx! { Loading {} },
        FormState::Unavailable => {
            return rsx! { Empty { message: "This upsell could not be loaded." } };
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
    let property_options: Vec<(String, String)> = match &*properties.read() {
        Some(Ok(all)) => all.iter().map(|p| (p.id.to_string(), p.name.clone())).collect(),
        _ => Vec::new(),
    };
    let all_vendors: Vec<Vendor> = match &*vendors.read() {
        Some(Ok(all)) => all.clone(),
        _ => Vec::new(),
    };
    let vendor_options: Vec<(String, String)> = all_vendors
        .iter()
        .map(|v| (v.id.to_string(), format!("{} ({})", v.name, v.service_type)))
        .collect();
    let secondary_options: Vec<(String, String)> = all_vendors
        .iter()
        .filter(|v| Some(v.id) != f.vendor_id)
        .map(|v| (v.id.to_string(), v.name.clone()))
        .collect();
    let mut category_options: Vec<(String, String)> = UPSELL_CATEGORIES
        .iter()
        .map(|c| (c.to_string(), c.to_string()))
        .collect();
    if !f.category.is_empty() && !UPSELL_CATEGORIES.contains(&f.category.as_str()) {
        category_options.push((f.category.clone(), f.category.clone()));
    }
    let id_value = |v: Option<i64>| v.map(|id| id.to_string()).unwrap_or_default();

    rsx! {
        form {
            class: "view-page form-page",
            onsubmit: onsubmit,
            h2 { class: "view-title", if id.is_some() { "Edit upsell" } else { "New upsell" } }

            FormField { label: "Title", html_for: "title", error: field_error(&errors, "title"),
                TextInput { id: "title", value: f.title.clone(), oninput: move |v| form.write().title = v }
            }
            FormField { label: "Description", html_for: "description", error: field_error(&errors, "description"),
                TextArea { id: "description", rows: 4, value: f.description.clone(), oninput: move |v| form.write().description = v }
            }
            div {
                class: "form-row",
                FormField { label: "Property", html_for: "property_id", error: field_error(&errors, "property_id"),
                    Select {
                        id: "property_id",
                        value: id_value(f.property_id),
                        options: property_options,
                        placeholder: Some("Choose a property".to_string()),
                        onchange: move |v: String| form.write().property_id = v.parse().ok(),
                    }
                }
                FormField { label: "Category", html_for: "category", error: field_error(&errors, "category"),
                    Select {
                        id: "category",
                        value: f.category.clone(),
                        options: category_options,
                        placeholder: Some("Choose a category".to_string()),
                        onchange: move |v| form.write().category = v,
                    }
                }
            }
            div {
                class: "form-row",
                FormField { label: "Vendor", html_for: "vendor_id", error: field_error(&errors, "vendor_id"),
                    Select {
                        id: "vendor_id",
                        value: id_value(f.vendor_id),
                        options: vendor_options,
                        placeholder: Some("Choose a vendor".to_string()),
                        onchange: move |v: String| {
                            let mut form = form.write();
                            form.vendor_id = v.parse().ok();
                            if form.secondary_vendor_id == form.vendor_id {
                                form.secondary_vendor_id = None;
                            }
                        },
                    }
                }
                FormField { label: "Backup vendor", html_for: "secondary_vendor_id", error: field_error(&errors, "secondary_vendor_id"),
                    hint: "Optional. Receives the order if the main vendor declines.",
                    Select {
                        id: "secondary_vendor_id",
                        value: id_value(f.secondary_vendor_id),
                        options: secondary_options,
                        placeholder: Some("None".to_string()),
                        onchange: move |v: String| form.write().secondary_vendor_id = v.parse().ok(),
                    }
                }
            }
            div {
                class: "form-row",
                FormField { label: "Price", html_for: "price", error: field_error(&errors, "price"),
                    TextInput { id: "price", r#type: "number", value: f.price.clone(), placeholder: "0.00", oninput: move |v| form.write().price = v }
                }
                FormField { label: "Sort order", html_for: "sort_order", error: field_error(&errors, "sort_order"),
                    TextInput { id: "sort_order", r#type: "number", value: f.sort_order.clone(), oninput: move |v| form.write().sort_order = v }
                }
            }

            ImagePicker {
                label: "Image",
                current_url: f.image_url.clone(),
                error: field_error(&errors, "image_url"),
                on_pick: move |picked| image.set(Some(picked)),
            }

            Checkbox {
                id: "is_active",
                label: "Active (offered to guests)",
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
