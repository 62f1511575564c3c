use dioxus::prelude::*;
use dioxus_primitives::label;

#[component]
pub fn Label(html_for: String, children: Element) -> Element {
    rsx! {
        label::Label { class: "form-label", html_for: html_for, {children} }
    }
}

/// A labelled input slot with its inline error message underneath.
#[component]
pub fn FormField(
    label: String,
    html_for: String,
    error: Option<String>,
    #[props(default)] hint: String,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: if error.is_some() { "form-field has-error" } else { "form-field" },
            Label { html_for: html_for.clone(), "{label}" }
            {children}
            if let Some(message) = error {
                p { class: "form-error", "{message}" }
            } else if !hint.is_empty() {
                p { class: "view-muted", "{hint}" }
            }
        }
    }
}
