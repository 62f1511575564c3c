use dioxus::prelude::*;
use ui::components::Loading;
use ui::{use_auth, AppShell, NavSection};

use crate::Route;

fn section_for(route: &Route) -> NavSection {
    match route {
        Route::Dashboard {} | Route::Login {} | Route::Register {} => NavSection::Dashboard,
        Route::Properties {} | Route::PropertyNew {} | Route::PropertyEdit { .. } => {
            NavSection::Properties
        }
        Route::Vendors {} | Route::VendorNew {} | Route::VendorEdit { .. } => NavSection::Vendors,
        Route::Upsells {} | Route::UpsellNew {} | Route::UpsellEdit { .. } => NavSection::Upsells,
        Route::Orders {} => NavSection::Orders,
        Route::Settings {} => NavSection::Settings,
    }
}

fn route_for(section: NavSection) -> Route {
    match section {
        NavSection::Dashboard => Route::Dashboard {},
        NavSection::Properties => Route::Properties {},
        NavSection::Vendors => Route::Vendors {},
        NavSection::Upsells => Route::Upsells {},
        NavSection::Orders => Route::Orders {},
        NavSection::Settings => Route::Settings {},
    }
}

/// Frame for every signed-in route. Sends anonymous visitors to `/login`.
#[component]
pub fn Shell() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let route = use_route::<Route>();

    let state = auth();
    if state.loading {
        return rsx! { Loading { label: "Checking your session..." } };
    }
    if state.user.is_none() {
        nav.replace(Route::Login {});
        return rsx! {};
    }

    rsx! {
        AppShell {
            active: section_for(&route),
            on_navigate: move |section| {
                nav.push(route_for(section));
            },
            Outlet::<Route> {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_routes_highlight_their_section() {
        assert_eq!(section_for(&Route::PropertyEdit { id: 3 }), NavSection::Properties);
        assert_eq!(section_for(&Route::UpsellNew {}), NavSection::Upsells);
        for section in NavSection::ALL {
            assert_eq!(section_for(&route_for(section)), section);
        }
    }
}
