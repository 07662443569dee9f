use api::{ApiError, Page};
use dioxus::prelude::*;
use store::Report;
use ui::crud::{load_error_text, report_type_label};
use ui::icons::{FaFileLines, FaUserPlus};
use ui::{use_client, use_i18n, use_loader, CardSkeleton, ErrorMessage, Icon, LoadState};

use crate::Route;

const RECENT_REPORTS: usize = 5;

#[derive(Clone, Debug, PartialEq)]
struct Summary {
    persons: usize,
    reports: usize,
    recent: Vec<Report>,
}

/// Newest meetings first.
fn recent_reports(mut reports: Vec<Report>) -> Vec<Report> {
    reports.sort_by(|a, b| b.meeting_datetime.cmp(&a.meeting_datetime));
    reports.truncate(RECENT_REPORTS);
    reports
}

#[component]
pub fn Dashboard() -> Element {
    let client = use_client();
    let i18n = use_i18n();

    let mut summary = use_loader(move || {
        let client = client.clone();
        async move {
            let (persons, reports) = futures::join!(
                client.list_persons(Page::default()),
                client.list_reports(Page::default())
            );
            let (persons, reports) = (persons?, reports?);
            Ok::<_, ApiError>(Summary {
                persons: persons.len(),
                reports: reports.len(),
                recent: recent_reports(reports),
            })
        }
    });

    let body = match summary.state() {
        LoadState::Loading => rsx! {
            div {
                class: "stats",
                CardSkeleton {}
                CardSkeleton {}
            }
            CardSkeleton {}
        },
        LoadState::Failed(e) => rsx! {
            ErrorMessage {
                message: load_error_text(&i18n, &e),
                on_retry: move |_| summary.retry(),
            }
        },
        LoadState::Loaded(data) => rsx! {
            div {
                class: "stats",
                div {
                    class: "card stat",
                    span { class: "stat__number", "{data.persons}" }
                    span { class: "stat__label", {i18n.t("dashboard.total_persons")} }
                    Link { class: "stat__link", to: Route::PersonsList {}, {i18n.t("dashboard.view_all")} }
                }
                div {
                    class: "card stat",
                    span { class: "stat__number", "{data.reports}" }
                    span { class: "stat__label", {i18n.t("dashboard.total_reports")} }
                    Link { class: "stat__link", to: Route::ReportsList {}, {i18n.t("dashboard.view_all")} }
                }
            }

            section {
                class: "quick-actions",
                h2 { {i18n.t("dashboard.quick_actions")} }
                div {
                    class: "quick-actions__buttons",
                    Link {
                        class: "btn btn--primary",
                        to: Route::PersonNew {},
                        Icon { icon: FaUserPlus, width: 14, height: 14 }
                        {i18n.t("dashboard.add_person")}
                    }
                    Link {
                        class: "btn btn--primary",
                        to: Route::ReportNew {},
                        Icon { icon: FaFileLines, width: 14, height: 14 }
                        {i18n.t("dashboard.create_report")}
                    }
                }
            }

            section {
                class: "recent",
                h2 { {i18n.t("dashboard.recent_reports")} }
                if data.recent.is_empty() {
                    p {
                        {i18n.t("dashboard.no_reports")}
                        " "
                        Link { to: Route::ReportNew {}, {i18n.t("common.create_first")} }
                    }
                }
                for report in data.recent.iter() {
                    div {
                        key: "{report.id}",
                        class: "card recent__item",
                        div {
                            h3 {
                                {report.recurring_meeting.as_ref().map(|m| report_type_label(&i18n, m.report_type)).unwrap_or("-")}
                            }
                            p { {i18n.t("report.meeting_datetime")} ": " {i18n.dates().format_date_time(&report.meeting_datetime)} }
                            p { {i18n.t("report.attendees_count")} ": " "{report.attendees_count}" }
                            p { {i18n.t("report.location")} ": " "{report.location}" }
                        }
                        Link {
                            class: "btn btn--outline btn--small",
                            to: Route::ReportDetail { id: report.id },
                            {i18n.t("common.view")}
                        }
                    }
                }
            }
        },
    };

    rsx! {
        div {
            class: "page-header",
            h1 { class: "page-title", {i18n.t("dashboard.title")} }
            p { class: "page-subtitle", {i18n.t("dashboard.welcome")} }
        }
        {body}
    }
}
