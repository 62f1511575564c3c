use dioxus::prelude::*;
use store::OrderStatus;

use crate::icons::FaSpinner;
use crate::Icon;

#[component]
pub fn StatusBadge(status: OrderStatus) -> Element {
    let label = status.label();
    rsx! {
        span { class: format!("badge badge--{}", status.as_str()), "{label}" }
    }
}

#[component]
pub fn ActiveBadge(active: bool) -> Element {
    rsx! {
        if active {
            span { class: "badge badge--active", "Active" }
        } else {
            span { class: "badge badge--inactive", "Inactive" }
        }
    }
}

#[component]
pub fn StatCard(label: String, value: String) -> Element {
    rsx! {
        div {
            class: "stat-card",
            span { class: "stat-label", "{label}" }
            span { class: "stat-value", "{value}" }
        }
    }
}

#[component]
pub fn Loading(#[props(default = "Loading...".to_string())] label: String) -> Element {
    rsx! {
        div {
            class: "placeholder",
            Icon { icon: FaSpinner, width: 16, height: 16, class: "spin" }
            span { "{label}" }
        }
    }
}

/// Shown in place of a list or chart that has nothing to render, including
/// after a failed fetch.
#[component]
pub fn Empty(message: String, children: Element) -> Element {
    rsx! {
        div {
            class: "placeholder",
            p { "{message}" }
            {children}
        }
    }
}
