use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use store::DashboardConfig;
use ui::SessionProvider;
use views::{
    Dashboard, Login, Orders, Properties, PropertyEdit, PropertyNew, Register, Settings, Shell,
    UpsellEdit, UpsellNew, Upsells, VendorEdit, VendorNew, Vendors,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[layout(Shell)]
        #[route("/")]
        Dashboard {},
        #[route("/properties")]
        Properties {},
        #[route("/properties/new")]
        PropertyNew {},
        #[route("/properties/:id/edit")]
        PropertyEdit { id: i64 },
        #[route("/vendors")]
        Vendors {},
        #[route("/vendors/new")]
        VendorNew {},
        #[route("/vendors/:id/edit")]
        VendorEdit { id: i64 },
        #[route("/upsells")]
        Upsells {},
        #[route("/upsells/new")]
        UpsellNew {},
        #[route("/upsells/:id/edit")]
        UpsellEdit { id: i64 },
        #[route("/orders")]
        Orders {},
        #[route("/settings")]
        Settings {},
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::logger::init(Level::INFO).ok();
    dioxus::launch(App);
}

/// Embedded `Dashboard.toml`, with the API and guest URLs optionally
/// overridden at build time.
fn load_config() -> DashboardConfig {
    let mut config = match DashboardConfig::from_toml(include_str!("../Dashboard.toml")) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("invalid {}: {e}; using defaults", DashboardConfig::filename());
            DashboardConfig::default()
        }
    };
    if let Some(url) = option_env!("DASHBOARD_API_URL") {
        config = config.with_api_url(url.to_string());
    }
    if let Some(url) = option_env!("DASHBOARD_GUEST_URL") {
        config = config.with_guest_url(url.to_string());
    }
    tracing::info!("backend at {}", config.api.base_url);
    config
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);

    rsx! {
        // Global app resources
        document::Link { rel: "icon", href: FAVICON }
        document::Stylesheet { href: ui::DASHBOARD_CSS }
        document::Stylesheet { href: MAIN_CSS }

        ui::components::ToastProvider {
            SessionProvider {
                config,
                Router::<Route> {}
            }
        }
    }
}
