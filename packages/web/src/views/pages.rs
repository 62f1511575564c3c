//! Route targets. Each wraps a shared view and maps its callbacks onto routes.

use dioxus::prelude::*;
use ui::views::{
    AnalyticsView, OrdersView, PropertiesView, PropertyFormView, SettingsView, UpsellFormView,
    UpsellsView, VendorFormView, VendorsView,
};

use crate::Route;

#[component]
pub fn Dashboard() -> Element {
    rsx! { AnalyticsView {} }
}

#[component]
pub fn Properties() -> Element {
    let nav = use_navigator();
    rsx! {
        PropertiesView {
            on_create: move |_| {
                nav.push(Route::PropertyNew {});
            },
            on_edit: move |id| {
                nav.push(Route::PropertyEdit { id });
            },
        }
    }
}

#[component]
pub fn PropertyNew() -> Element {
    let nav = use_navigator();
    rsx! {
        PropertyFormView {
            id: None,
            on_done: move |_| {
                nav.push(Route::Properties {});
            },
        }
    }
}

#[component]
pub fn PropertyEdit(id: i64) -> Element {
    let nav = use_navigator();
    rsx! {
        PropertyFormView {
            key: "{id}",
            id: Some(id),
            on_done: move |_| {
                nav.push(Route::Properties {});
            },
        }
    }
}

#[component]
pub fn Vendors() -> Element {
    let nav = use_navigator();
    rsx! {
        VendorsView {
            on_create: move |_| {
                nav.push(Route::VendorNew {});
            },
            on_edit: move |id| {
                nav.push(Route::VendorEdit { id });
            },
        }
    }
}

#[component]
pub fn VendorNew() -> Element {
    let nav = use_navigator();
    rsx! {
        VendorFormView {
            id: None,
            on_done: move |_| {
                nav.push(Route::Vendors {});
            },
        }
    }
}

#[component]
pub fn VendorEdit(id: i64) -> Element {
    let nav = use_navigator();
    rsx! {
        VendorFormView {
            key: "{id}",
            id: Some(id),
            on_done: move |_| {
                nav.push(Route::Vendors {});
            },
        }
    }
}

#[component]
pub fn Upsells() -> Element {
    let nav = use_navigator();
    rsx! {
        UpsellsView {
            on_create: move |_| {
                nav.push(Route::UpsellNew {});
            },
            on_edit: move |id| {
                nav.push(Route::UpsellEdit { id });
            },
        }
    }
}

#[component]
pub fn UpsellNew() -> Element {
    let nav = use_navigator();
    rsx! {
        UpsellFormView {
            id: None,
            on_done: move |_| {
                nav.push(Route::Upsells {});
            },
        }
    }
}

#[component]
pub fn UpsellEdit(id: i64) -> Element {
    let nav = use_navigator();
    rsx! {
        UpsellFormView {
            key: "{id}",
            id: Some(id),
            on_done: move |_| {
                nav.push(Route::Upsells {});
            },
        }
    }
}

#[component]
pub fn Orders() -> Element {
    rsx! { OrdersView {} }
}

#[component]
pub fn Settings() -> Element {
    rsx! { SettingsView {} }
}
