use dioxus::prelude::*;

use store::AppConfig;
use ui::{AppErrorBoundary, AuthProvider, I18nProvider};
use views::{
    Dashboard, Login, MeetingDetail, MeetingEdit, MeetingNew, MeetingsList, PersonDetail,
    PersonEdit, PersonNew, PersonsList, Protected, ReportDetail, ReportEdit, ReportNew,
    ReportsList,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/login")]
    Login {},
    #[layout(Protected)]
        #[route("/")]
        Root {},
        #[route("/dashboard")]
        Dashboard {},
        #[route("/persons")]
        PersonsList {},
        #[route("/persons/new")]
        PersonNew {},
        #[route("/persons/:id")]
        PersonDetail { id: i64 },
        #[route("/persons/:id/edit")]
        PersonEdit { id: i64 },
        #[route("/recurring-meetings")]
        MeetingsList {},
        #[route("/recurring-meetings/new")]
        MeetingNew {},
        #[route("/recurring-meetings/:id")]
        MeetingDetail { id: i64 },
        #[route("/recurring-meetings/:id/edit")]
        MeetingEdit { id: i64 },
        #[route("/reports")]
        ReportsList {},
        #[route("/reports/new")]
        ReportNew {},
        #[route("/reports/:id")]
        ReportDetail { id: i64 },
        #[route("/reports/:id/edit")]
        ReportEdit { id: i64 },
    #[end_layout]
    #[route("/:..segments")]
    Unknown { segments: Vec<String> },
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Bundled `gatherings.toml`.
const CONFIG: &str = include_str!("../gatherings.toml");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

/// Bundled configuration, with `GATHERINGS_API_BASE_URL` at build time taking
/// precedence over the file's base URL.
fn load_config() -> AppConfig {
    let config = match AppConfig::from_toml(CONFIG) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid bundled {}: {e}", AppConfig::filename());
            AppConfig::default()
        }
    };
    match option_env!("GATHERINGS_API_BASE_URL") {
        Some(url) => config.with_base_url(url),
        None => config,
    }
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);

    rsx! {
        // Global app resources
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        I18nProvider {
            default_locale: config.i18n.default_locale.clone(),
            AppErrorBoundary {
                AuthProvider {
                    config: config.clone(),
                    Router::<Route> {}
                }
            }
        }
    }
}

/// Redirect `/` to `/dashboard`
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Dashboard {});
    rsx! {}
}

/// Unknown paths land on the dashboard
#[component]
fn Unknown(segments: Vec<String>) -> Element {
    let nav = use_navigator();
    tracing::debug!("No route for /{}", segments.join("/"));
    nav.replace(Route::Dashboard {});
    rsx! {}
}
