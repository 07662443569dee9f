use api::{ApiError, Page};
use dioxus::prelude::*;
use store::{RecurringMeeting, RecurringMeetingCreate, RecurringMeetingUpdate};
use ui::crud::{load_error_text, periodicity_label, report_type_label};
use ui::forms::{form_error_text, meeting_fields, new_meeting_values};
use ui::icons::{FaPen, FaPlus, FaTrash};
use ui::{
    browser, error_text, use_client, use_i18n, use_loader, CrudTable, EntityForm, ErrorMessage,
    FormModel, FormValues, Icon, LoadState, PageLoader,
};

use crate::views::DetailRow;
use crate::Route;

#[component]
pub fn MeetingsList() -> Element {
    let client = use_client();
    let i18n = use_i18n();
    let mut action_error = use_signal(|| Option::<String>::None);

    let list_client = client.clone();
    let mut meetings = use_loader(move || {
        let client = list_client.clone();
        async move { client.list_recurring_meetings(Page::default()).await }
    });

    let on_delete = move |meeting: RecurringMeeting| {
        let client = client.clone();
        spawn(async move {
            match client.delete_recurring_meeting(meeting.id).await {
                Ok(()) => {
                    action_error.set(None);
                    meetings.retry();
                }
                Err(e) => action_error.set(Some(error_text(&i18n, &e))),
            }
        });
    };

    rsx! {
        div {
            class: "page-header",
            h1 { class: "page-title", {i18n.t("meetings.title")} }
            Link {
                class: "btn btn--primary",
                to: Route::MeetingNew {},
                Icon { icon: FaPlus, width: 12, height: 12 }
                {i18n.t("meetings.new")}
            }
        }
        if let Some(message) = action_error() {
            ErrorMessage { message }
        }
        CrudTable::<RecurringMeeting> {
            state: meetings.state(),
            empty_key: "meetings.empty",
            on_retry: move |_| meetings.retry(),
            on_delete: on_delete,
        }
    }
}

#[component]
pub fn MeetingDetail(id: i64) -> Element {
    let client = use_client();
    let i18n = use_i18n();
    let nav = use_navigator();
    let mut action_error = use_signal(|| Option::<String>::None);

    let load_client = client.clone();
    let mut meeting = use_loader(use_reactive!(|(id,)| {
        let client = load_client.clone();
        async move { client.get_recurring_meeting(id).await }
    }));

    let on_delete = move |_| {
        if !browser::confirm(i18n.t("common.confirm_delete")) {
            return;
        }
        let client = client.clone();
        spawn(async move {
            match client.delete_recurring_meeting(id).await {
                Ok(()) => {
                    nav.push(Route::MeetingsList {});
                }
                Err(e) => action_error.set(Some(error_text(&i18n, &e))),
            }
        });
    };

    let meeting = match meeting.state() {
        LoadState::Loading => return rsx! { PageLoader {} },
        LoadState::Failed(e) => {
            return rsx! {
                ErrorMessage {
                    message: load_error_text(&i18n, &e),
                    on_retry: move |_| meeting.retry(),
                }
                Link { class: "btn btn--outline", to: Route::MeetingsList {}, {i18n.t("common.back_to_list")} }
            };
        }
        LoadState::Loaded(m) => m,
    };
    let dates = i18n.dates();
    let schedule = dates.format_meeting_date_time(&meeting.meeting_datetime);

    rsx! {
        div {
            class: "page-header",
            h1 { class: "page-title", "{schedule}" }
            div {
                class: "page-header__actions",
                Link {
                    class: "btn btn--outline",
                    to: Route::MeetingEdit { id },
                    Icon { icon: FaPen, width: 12, height: 12 }
                    {i18n.t("common.edit")}
                }
                button {
                    class: "btn btn--danger",
                    onclick: on_delete,
                    Icon { icon: FaTrash, width: 12, height: 12 }
                    {i18n.t("common.delete")}
                }
            }
        }
        if let Some(message) = action_error() {
            ErrorMessage { message }
        }
        dl {
            class: "card details",
            DetailRow { label: i18n.t("meeting.schedule"), value: schedule.clone() }
            div {
                class: "details__row",
                dt { {i18n.t("meeting.leader")} }
                dd {
                    match meeting.leader.as_ref() {
                        Some(leader) => rsx! {
                            Link { to: Route::PersonDetail { id: leader.id }, "{leader.full_name()}" }
                        },
                        None => rsx! { "{meeting.leader_name()}" },
                    }
                }
            }
            DetailRow {
                label: i18n.t("meeting.report_type"),
                value: report_type_label(&i18n, meeting.report_type).to_string(),
            }
            DetailRow {
                label: i18n.t("meeting.periodicity"),
                value: periodicity_label(&i18n, meeting.periodicity).to_string(),
            }
            DetailRow { label: i18n.t("meeting.location"), value: meeting.location.clone() }
            if let Some(description) = meeting.description.clone() {
                DetailRow { label: i18n.t("meeting.description"), value: description }
            }
            if let Some(link) = meeting.google_maps_link.clone() {
                div {
                    class: "details__row",
                    dt { {i18n.t("common.google_maps_link")} }
                    dd { a { href: "{link}", target: "_blank", rel: "noopener noreferrer", {i18n.t("common.open_map")} } }
                }
            }
            DetailRow { label: i18n.t("common.created_at"), value: dates.format_date_time(&meeting.created_at) }
            DetailRow { label: i18n.t("common.updated_at"), value: dates.format_date_time(&meeting.updated_at) }
        }
        Link { class: "btn btn--outline", to: Route::MeetingsList {}, {i18n.t("common.back_to_list")} }
    }
}

#[component]
pub fn MeetingNew() -> Element {
    rsx! { MeetingForm { id: None } }
}

#[component]
pub fn MeetingEdit(id: i64) -> Element {
    rsx! { MeetingForm { id: Some(id) } }
}

/// The leader select is filled from the persons list, loaded together with
/// the meeting being edited.
#[component]
fn MeetingForm(id: Option<i64>) -> Element {
    let client = use_client();
    let i18n = use_i18n();
    let nav = use_navigator();
    let mut values = use_signal(FormValues::new);
    let mut saving = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let load_client = client.clone();
    let mut persons = use_loader(use_reactive!(|(id,)| {
        let client = load_client.clone();
        async move {
            let persons = client.list_persons(Page::default()).await?;
            match id {
                Some(id) => {
                    let meeting = client.get_recurring_meeting(id).await?;
                    values.set(RecurringMeetingCreate::from(&meeting).to_values());
                }
                None => values.set(new_meeting_values()),
            }
            Ok::<_, ApiError>(persons)
        }
    }));

    let on_submit = move |form: FormValues| {
        let client = client.clone();
        spawn(async move {
            let meeting = match RecurringMeetingCreate::from_values(&form) {
                Ok(meeting) => meeting,
                Err(e) => {
                    error.set(Some(form_error_text(&i18n, &meeting_fields(&i18n, &[]), &e)));
                    return;
                }
            };
            error.set(None);
            saving.set(true);
            let result = match id {
                Some(id) => {
                    client
                        .update_recurring_meeting(id, &RecurringMeetingUpdate::from(meeting))
                        .await
                }
                None => client.create_recurring_meeting(&meeting).await,
            };
            match result {
                Ok(saved) => {
                    tracing::info!("Saved recurring meeting {}", saved.id);
                    nav.push(Route::MeetingsList {});
                }
                Err(e) => {
                    error.set(Some(error_text(&i18n, &e)));
                    saving.set(false);
                }
            }
        });
    };

    let title = if id.is_some() { i18n.t("meetings.edit") } else { i18n.t("meetings.new") };

    let body = match persons.state() {
        LoadState::Loading => rsx! { PageLoader {} },
        LoadState::Failed(e) => rsx! {
            ErrorMessage {
                message: load_error_text(&i18n, &e),
                on_retry: move |_| persons.retry(),
            }
        },
        LoadState::Loaded(persons) => rsx! {
            if persons.is_empty() {
                p {
                    class: "form-hint",
                    {i18n.t("meetings.no_persons")}
                    " "
                    Link { to: Route::PersonNew {}, {i18n.t("dashboard.add_person")} }
                }
            }
            EntityForm {
                fields: meeting_fields(&i18n, &persons),
                values,
                saving: saving(),
                error: error(),
                on_submit: on_submit,
                on_cancel: move |_| {
                    nav.go_back();
                },
            }
        },
    };

    rsx! {
        div {
            class: "page-header",
            h1 { class: "page-title", {title} }
        }
        div { class: "card", {body} }
    }
}
