//! The authenticated page frame: sidebar navigation, header and the activity
//! log drawer.

use dioxus::prelude::*;

use crate::activity_log_panel::{ActivityLogPanel, ActivityLogToggle};
use crate::auth::{use_auth, LogoutButton};
use crate::icons::{FaChartColumn, FaGear, FaGift, FaHouse, FaReceipt, FaUserTie};
use crate::Icon;

/// Top-level sections reachable from the sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavSection {
    Dashboard,
    Properties,
    Vendors,
    Upsells,
    Orders,
    Settings,
}

impl NavSection {
    pub const ALL: [NavSection; 6] = [
        NavSection::Dashboard,
        NavSection::Properties,
        NavSection::Vendors,
        NavSection::Upsells,
        NavSection::Orders,
        NavSection::Settings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NavSection::Dashboard => "Dashboard",
            NavSection::Properties => "Properties",
            NavSection::Vendors => "Vendors",
            NavSection::Upsells => "Upsells",
            NavSection::Orders => "Orders",
            NavSection::Settings => "Settings",
        }
    }
}

#[component]
fn NavIcon(section: NavSection) -> Element {
    match section {
        NavSection::Dashboard => rsx! { Icon { icon: FaChartColumn, width: 15, height: 15 } },
        NavSection::Properties => rsx! { Icon { icon: FaHouse, width: 15, height: 15 } },
        NavSection::Vendors => rsx! { Icon { icon: FaUserTie, width: 15, height: 15 } },
        NavSection::Upsells => rsx! { Icon { icon: FaGift, width: 15, height: 15 } },
        NavSection::Orders => rsx! { Icon { icon: FaReceipt, width: 15, height: 15 } },
        NavSection::Settings => rsx! { Icon { icon: FaGear, width: 15, height: 15 } },
    }
}

/// Shared page frame.
///
/// Platform packages map [`NavSection`]s to routes and pass the router outlet
/// as children.
#[component]
pub fn AppShell(
    /// Section highlighted in the sidebar.
    active: NavSection,
    on_navigate: EventHandler<NavSection>,
    children: Element,
) -> Element {
    let auth = use_auth();
    let (user_name, admin) = auth()
        .user
        .as_ref()
        .map(|u| (u.display_name().to_string(), u.is_admin()))
        .unwrap_or_default();

    rsx! {
        div {
            class: "app-shell",
            nav {
                class: "sidebar",
                div { class: "sidebar-brand", "Villa Admin" }
                ul {
                    class: "sidebar-nav",
                    for section in NavSection::ALL {
                        li {
                            key: "{section:?}",
                            button {
                                class: if section == active { "sidebar-item active" } else { "sidebar-item" },
                                onclick: move |_| on_navigate.call(section),
                                NavIcon { section }
                                span { {section.label()} }
                            }
                        }
                    }
                }
                div {
                    class: "sidebar-bottom",
                    span { class: "sidebar-user-name", "{user_name}" }
                    if admin {
                        span { class: "badge badge--active", "Admin" }
                    }
                    LogoutButton { class: "btn btn-ghost" }
                }
            }
            main {
                class: "app-main",
                header {
                    class: "app-header",
                    h1 { class: "app-header-title", {active.label()} }
                    ActivityLogToggle {}
                }
                div {
                    class: "app-content",
                    {children}
                }
                ActivityLogPanel {}
            }
        }
    }
}
