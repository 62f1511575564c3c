use dioxus::prelude::*;

use crate::icons::FaMagnifyingGlass;
use crate::Icon;

#[component]
pub fn TextInput(
    id: String,
    value: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default)] placeholder: String,
    oninput: EventHandler<String>,
) -> Element {
    rsx! {
        input {
            id: "{id}",
            class: "input",
            r#type: "{r#type}",
            placeholder: "{placeholder}",
            value: "{value}",
            oninput: move |evt: FormEvent| oninput.call(evt.value()),
        }
    }
}

#[component]
pub fn TextArea(id: String, value: String, #[props(default = 3)] rows: u32, oninput: EventHandler<String>) -> Element {
    rsx! {
        textarea {
            id: "{id}",
            class: "input",
            rows: "{rows}",
            value: "{value}",
            oninput: move |evt: FormEvent| oninput.call(evt.value()),
        }
    }
}

/// `<select>` over `(value, label)` pairs.
#[component]
pub fn Select(
    id: String,
    value: String,
    options: Vec<(String, String)>,
    placeholder: Option<String>,
    onchange: EventHandler<String>,
) -> Element {
    rsx! {
        select {
            id: "{id}",
            class: "input",
            value: "{value}",
            onchange: move |evt: FormEvent| onchange.call(evt.value()),
            if let Some(placeholder) = placeholder {
                option { value: "", selected: value.is_empty(), "{placeholder}" }
            }
            for (option_value, option_label) in options {
                option {
                    key: "{option_value}",
                    value: "{option_value}",
                    selected: option_value == value,
                    "{option_label}"
                }
            }
        }
    }
}

#[component]
pub fn Checkbox(id: String, label: String, checked: bool, onchange: EventHandler<bool>) -> Element {
    rsx! {
        label {
            class: "checkbox",
            r#for: "{id}",
            input {
                id: "{id}",
                r#type: "checkbox",
                checked,
                onchange: move |evt: FormEvent| onchange.call(evt.checked()),
            }
            span { "{label}" }
        }
    }
}

#[component]
pub fn SearchBox(value: String, #[props(default = "Search...".to_string())] placeholder: String, oninput: EventHandler<String>) -> Element {
    rsx! {
        div {
            class: "search-box",
            Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
            input {
                r#type: "search",
                placeholder: "{placeholder}",
                value: "{value}",
                oninput: move |evt: FormEvent| oninput.call(evt.value()),
            }
        }
    }
}
