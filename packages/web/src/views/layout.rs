//! Layout shared by every signed-in route.

use api::SessionState;
use dioxus::prelude::*;
use ui::{use_auth, use_i18n, LanguageSelector, LogoutButton, PageLoader};

use crate::Route;

/// Renders the header and the matched child route once the session is
/// confirmed. Anonymous visitors are sent to the login view.
#[component]
pub fn Protected() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let state = auth.state();

    use_effect(move || {
        if auth.state() == SessionState::Anonymous {
            nav.replace(Route::Login {});
        }
    });

    match state {
        SessionState::Authenticated(_) => rsx! {
            Header {}
            main {
                class: "page",
                Outlet::<Route> {}
            }
        },
        SessionState::Anonymous => rsx! {},
        SessionState::Unknown | SessionState::Checking => rsx! {
            PageLoader {}
        },
    }
}

#[component]
fn Header() -> Element {
    let auth = use_auth();
    let i18n = use_i18n();
    let user = auth.state().user().map(|u| u.display_name()).unwrap_or_default();

    rsx! {
        header {
            class: "header",
            Link {
                class: "header__brand",
                to: Route::Dashboard {},
                {i18n.t("app.title")}
            }
            nav {
                class: "header__nav",
                Link { class: "nav-link", active_class: "nav-link--active", to: Route::Dashboard {}, {i18n.t("nav.dashboard")} }
                Link { class: "nav-link", active_class: "nav-link--active", to: Route::PersonsList {}, {i18n.t("nav.persons")} }
                Link { class: "nav-link", active_class: "nav-link--active", to: Route::MeetingsList {}, {i18n.t("nav.meetings")} }
                Link { class: "nav-link", active_class: "nav-link--active", to: Route::ReportsList {}, {i18n.t("nav.reports")} }
            }
            div {
                class: "header__user",
                LanguageSelector {}
                span { class: "header__welcome", {i18n.t_with("header.welcome", &[("name", &user)])} }
                LogoutButton { class: "btn btn--outline btn--small" }
            }
        }
    }
}
