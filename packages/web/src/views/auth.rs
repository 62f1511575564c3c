//! Sign-in and registration pages. Both bounce to the dashboard once a user
//! is present.

use dioxus::prelude::*;
use ui::use_auth;
use ui::views::{LoginView, RegisterView};

use crate::Route;

#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    if !auth().loading && auth().user.is_some() {
        nav.replace(Route::Dashboard {});
    }

    rsx! {
        LoginView {
            on_success: move |_| {
                nav.replace(Route::Dashboard {});
            },
            on_register: move |_| {
                nav.push(Route::Register {});
            },
        }
    }
}

#[component]
pub fn Register() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    if !auth().loading && auth().user.is_some() {
        nav.replace(Route::Dashboard {});
    }

    rsx! {
        RegisterView {
            on_success: move |_| {
                nav.replace(Route::Properties {});
            },
            on_login: move |_| {
                nav.push(Route::Login {});
            },
        }
    }
}
