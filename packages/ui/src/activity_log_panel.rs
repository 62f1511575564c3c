use dioxus::prelude::*;

use crate::activity_log::use_activity_log;
use crate::icons::FaListUl;
use crate::Icon;

#[component]
pub fn ActivityLogPanel() -> Element {
    let mut log = use_activity_log();

    if !log().visible {
        return rsx! {};
    }

    let entries = log().entries.clone();

    rsx! {
        div {
            class: "activity-log-panel",
            div {
                class: "activity-log-header",
                span { "Activity" }
                div {
                    class: "activity-log-header-actions",
                    button {
                        onclick: move |_| log.write().entries.clear(),
                        "Clear"
                    }
                    button {
                        onclick: move |_| log.write().visible = false,
                        "Close"
                    }
                }
            }
            div {
                class: "activity-log-entries",
                if entries.is_empty() {
                    p { class: "view-muted", "Nothing yet." }
                }
                for entry in entries.iter().rev() {
                    div {
                        class: format!("activity-log-entry {}", entry.level.class()),
                        span { class: "activity-log-time", "{entry.timestamp}" }
                        span { " {entry.message}" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn ActivityLogToggle() -> Element {
    let mut log = use_activity_log();
    let count = log().entries.len();
    let has_errors = log().has_errors();

    rsx! {
        button {
            class: if has_errors { "activity-log-toggle has-errors" } else { "activity-log-toggle" },
            title: "Activity log",
            onclick: move |_| {
                let visible = log().visible;
                log.write().visible = !visible;
            },
            Icon { icon: FaListUl, width: 14, height: 14 }
            if count > 0 {
                span { class: "activity-log-count", "{count}" }
            }
        }
    }
}
