//! # Generic CRUD table
//!
//! One table component renders the list view of every entity. The entity
//! describes its columns through [`CrudEntity`]; the table owns the loading,
//! error, empty and populated states and the per-row actions:
//!
//! | State | Rendering |
//! |-------|-----------|
//! | `Loading` | [`TableSkeleton`] |
//! | `Failed` | [`ErrorMessage`] with retry |
//! | `Loaded([])` | empty message plus a "create first" link |
//! | `Loaded(rows)` | table with view / edit / delete per row |

use api::ApiError;
use dioxus::prelude::*;
use store::{ParticipantType, Periodicity, Person, RecurringMeeting, Report, ReportType};

use crate::browser;
use crate::error_message::{error_text, ErrorMessage};
use crate::i18n::{use_i18n, I18n};
use crate::icons::{FaEye, FaPen, FaPlus, FaTrash};
use crate::loading::LoadState;
use crate::loading_states::TableSkeleton;
use crate::Icon;

/// An entity listed by [`CrudTable`].
pub trait CrudEntity: Clone + PartialEq + 'static {
    /// First path segment of the entity's routes, e.g. `persons`.
    const PATH: &'static str;

    fn id(&self) -> i64;

    /// Translation keys of the column headers.
    fn columns() -> &'static [&'static str];

    /// One display string per column.
    fn cells(&self, i18n: &I18n) -> Vec<String>;

    fn view_path(&self) -> String {
        format!("/{}/{}", Self::PATH, self.id())
    }

    fn edit_path(&self) -> String {
        format!("/{}/{}/edit", Self::PATH, self.id())
    }

    fn new_path() -> String {
        format!("/{}/new", Self::PATH)
    }
}

pub fn report_type_label(i18n: &I18n, report_type: ReportType) -> &'static str {
    match report_type {
        ReportType::Celula => i18n.t("report_type.celula"),
        ReportType::Culto => i18n.t("report_type.culto"),
    }
}

pub fn periodicity_label(i18n: &I18n, periodicity: Periodicity) -> &'static str {
    match periodicity {
        Periodicity::Daily => i18n.t("periodicity.daily"),
        Periodicity::Weekly => i18n.t("periodicity.weekly"),
        Periodicity::Monthly => i18n.t("periodicity.monthly"),
    }
}

pub fn participant_type_label(i18n: &I18n, kind: ParticipantType) -> &'static str {
    match kind {
        ParticipantType::Member => i18n.t("participant_type.member"),
        ParticipantType::Visitor => i18n.t("participant_type.visitor"),
        ParticipantType::Participant => i18n.t("participant_type.participant"),
    }
}

/// Leader's full name when the server embedded it, else `#<id>`.
pub fn report_leader_name(report: &Report) -> String {
    match &report.leader {
        Some(leader) => leader.full_name(),
        None => format!("#{}", report.leader_person_id),
    }
}

impl CrudEntity for Person {
    const PATH: &'static str = "persons";

    fn id(&self) -> i64 {
        self.id
    }

    fn columns() -> &'static [&'static str] {
        &["person.name", "person.phone", "person.birth_date", "person.home_address"]
    }

    fn cells(&self, i18n: &I18n) -> Vec<String> {
        vec![
            self.full_name(),
            self.phone.clone(),
            i18n.dates().format_birth_date(&self.birth_date.to_string()),
            self.home_address.clone(),
        ]
    }
}

impl CrudEntity for RecurringMeeting {
    const PATH: &'static str = "recurring-meetings";

    fn id(&self) -> i64 {
        self.id
    }

    fn columns() -> &'static [&'static str] {
        &[
            "meeting.schedule",
            "meeting.leader",
            "meeting.report_type",
            "meeting.periodicity",
            "meeting.location",
        ]
    }

    fn cells(&self, i18n: &I18n) -> Vec<String> {
        vec![
            i18n.dates().format_meeting_date_time(&self.meeting_datetime),
            self.leader_name(),
            report_type_label(i18n, self.report_type).to_string(),
            periodicity_label(i18n, self.periodicity).to_string(),
            self.location.clone(),
        ]
    }
}

impl CrudEntity for Report {
    const PATH: &'static str = "reports";

    fn id(&self) -> i64 {
        self.id
    }

    fn columns() -> &'static [&'static str] {
        &[
            "report.meeting_datetime",
            "report.leader",
            "report.location",
            "report.attendees_count",
            "report.collection",
        ]
    }

    fn cells(&self, i18n: &I18n) -> Vec<String> {
        vec![
            i18n.dates().format_date_time(&self.meeting_datetime),
            report_leader_name(self),
            self.location.clone(),
            self.attendees_count.to_string(),
            self.collection_display(),
        ]
    }
}

/// List view body for any [`CrudEntity`].
#[component]
pub fn CrudTable<E: CrudEntity>(
    state: LoadState<Vec<E>>,
    /// Translation key of the empty-state message.
    empty_key: &'static str,
    on_retry: EventHandler<()>,
    on_delete: EventHandler<E>,
) -> Element {
    let i18n = use_i18n();

    let rows = match state {
        LoadState::Loading => {
            return rsx! {
                TableSkeleton { columns: E::columns().len() + 1 }
            };
        }
        LoadState::Failed(error) => {
            return rsx! {
                ErrorMessage {
                    message: load_error_text(&i18n, &error),
                    on_retry: move |_| on_retry.call(()),
                }
            };
        }
        LoadState::Loaded(rows) => rows,
    };

    if rows.is_empty() {
        return rsx! {
            div {
                class: "empty-state",
                p { {i18n.t(empty_key)} }
                Link {
                    class: "btn btn--primary",
                    to: E::new_path(),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    {i18n.t("common.create_first")}
                }
            }
        };
    }

    rsx! {
        table {
            class: "crud-table",
            thead {
                tr {
                    for column in E::columns() {
                        th { key: "{column}", {i18n.t(*column)} }
                    }
                    th { class: "crud-table__actions", {i18n.t("common.actions")} }
                }
            }
            tbody {
                for row in rows {
                    tr {
                        key: "{row.id()}",
                        for (i, cell) in row.cells(&i18n).into_iter().enumerate() {
                            td { key: "{i}", "{cell}" }
                        }
                        td {
                            class: "crud-table__actions",
                            Link {
                                class: "btn btn--outline btn--small",
                                to: row.view_path(),
                                Icon { icon: FaEye, width: 12, height: 12 }
                            }
                            Link {
                                class: "btn btn--outline btn--small",
                                to: row.edit_path(),
                                Icon { icon: FaPen, width: 12, height: 12 }
                            }
                            button {
                                class: "btn btn--danger btn--small",
                                title: i18n.t("common.delete"),
                                onclick: {
                                    let row = row.clone();
                                    move |_| {
                                        if browser::confirm(i18n.t("common.confirm_delete")) {
                                            on_delete.call(row.clone());
                                        }
                                    }
                                },
                                Icon { icon: FaTrash, width: 12, height: 12 }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Text for a failed list or detail load.
pub fn load_error_text(i18n: &I18n, error: &ApiError) -> String {
    match error {
        ApiError::NotFound(_) => i18n.t("error.not_found").to_string(),
        other => error_text(i18n, other),
    }
}
