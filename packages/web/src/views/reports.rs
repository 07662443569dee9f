use api::{ApiError, Page};
use chrono::Utc;
use dioxus::prelude::*;
use store::{
    ParticipantCreate, ParticipantType, Person, RecurringMeeting, Report, ReportAttachment,
    ReportCreate, ReportUpdate,
};
use ui::crud::{load_error_text, participant_type_label, report_leader_name, report_type_label};
use ui::forms::{
    form_error_text, new_report_values, prefill_from_leader, prefill_from_meeting, report_fields,
};
use ui::icons::{FaPen, FaPlus, FaTrash, FaXmark};
use ui::{
    browser, error_text, use_client, use_i18n, use_loader, AttachmentsManager, CrudTable,
    EntityForm, ErrorMessage, FormModel, FormValues, Icon, LoadState, PageLoader,
};

use crate::views::DetailRow;
use crate::Route;

#[component]
pub fn ReportsList() -> Element {
    let client = use_client();
    let i18n = use_i18n();
    let mut action_error = use_signal(|| Option::<String>::None);

    let list_client = client.clone();
    let mut reports = use_loader(move || {
        let client = list_client.clone();
        async move { client.list_reports(Page::default()).await }
    });

    let on_delete = move |report: Report| {
        let client = client.clone();
        spawn(async move {
            match client.delete_report(report.id).await {
                Ok(()) => {
                    action_error.set(None);
                    reports.retry();
                }
                Err(e) => action_error.set(Some(error_text(&i18n, &e))),
            }
        });
    };

    rsx! {
        div {
            class: "page-header",
            h1 { class: "page-title", {i18n.t("reports.title")} }
            Link {
                class: "btn btn--primary",
                to: Route::ReportNew {},
                Icon { icon: FaPlus, width: 12, height: 12 }
                {i18n.t("reports.new")}
            }
        }
        if let Some(message) = action_error() {
            ErrorMessage { message }
        }
        CrudTable::<Report> {
            state: reports.state(),
            empty_key: "reports.empty",
            on_retry: move |_| reports.retry(),
            on_delete: on_delete,
        }
    }
}

#[component]
pub fn ReportDetail(id: i64) -> Element {
    let client = use_client();
    let i18n = use_i18n();
    let nav = use_navigator();
    let mut action_error = use_signal(|| Option::<String>::None);
    let mut attachments = use_signal(Vec::<ReportAttachment>::new);

    let load_client = client.clone();
    let mut report = use_loader(use_reactive!(|(id,)| {
        let client = load_client.clone();
        async move {
            let report = client.get_report(id).await?;
            attachments.set(report.attachments.clone());
            Ok::<_, ApiError>(report)
        }
    }));

    let on_delete = move |_| {
        if !browser::confirm(i18n.t("common.confirm_delete")) {
            return;
        }
        let client = client.clone();
        spawn(async move {
            match client.delete_report(id).await {
                Ok(()) => {
                    nav.push(Route::ReportsList {});
                }
                Err(e) => action_error.set(Some(error_text(&i18n, &e))),
            }
        });
    };

    let report = match report.state() {
        LoadState::Loading => return rsx! { PageLoader {} },
        LoadState::Failed(e) => {
            return rsx! {
                ErrorMessage {
                    message: load_error_text(&i18n, &e),
                    on_retry: move |_| report.retry(),
                }
                Link { class: "btn btn--outline", to: Route::ReportsList {}, {i18n.t("common.back_to_list")} }
            };
        }
        LoadState::Loaded(r) => r,
    };
    let dates = i18n.dates();
    let meeting_label = report
        .recurring_meeting
        .as_ref()
        .map(|m| report_type_label(&i18n, m.report_type))
        .unwrap_or("-");

    rsx! {
        div {
            class: "page-header",
            div {
                h1 { class: "page-title", "{meeting_label}" }
                p { class: "page-subtitle", {dates.format_date_time(&report.meeting_datetime)} }
            }
            div {
                class: "page-header__actions",
                Link {
                    class: "btn btn--outline",
                    to: Route::ReportEdit { id },
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

        section {
            class: "card",
            h2 { {i18n.t("report.meeting_info")} }
            dl {
                class: "details",
                if let Some(meeting) = report.recurring_meeting.as_ref() {
                    div {
                        class: "details__row",
                        dt { {i18n.t("report.recurring_meeting")} }
                        dd {
                            Link {
                                to: Route::MeetingDetail { id: meeting.id },
                                {dates.format_meeting_date_time(&meeting.meeting_datetime)}
                            }
                        }
                    }
                }
                DetailRow {
                    label: i18n.t("report.registration_date"),
                    value: dates.format_date_time(&report.registration_date),
                }
                DetailRow {
                    label: i18n.t("report.meeting_datetime"),
                    value: dates.format_date_time(&report.meeting_datetime),
                }
                DetailRow {
                    label: i18n.t("report.attendees_count"),
                    value: report.attendees_count.to_string(),
                }
            }
        }

        section {
            class: "card",
            h2 { {i18n.t("report.leader_info")} }
            dl {
                class: "details",
                DetailRow { label: i18n.t("report.leader"), value: report_leader_name(&report) }
                DetailRow { label: i18n.t("report.leader_phone"), value: report.leader_phone.clone() }
                if let Some(collaborator) = report.collaborator.clone() {
                    DetailRow { label: i18n.t("report.collaborator"), value: collaborator }
                }
            }
        }

        section {
            class: "card",
            h2 { {i18n.t("report.location_info")} }
            dl {
                class: "details",
                DetailRow { label: i18n.t("report.location"), value: report.location.clone() }
                if let Some(link) = report.google_maps_link.clone() {
                    div {
                        class: "details__row",
                        dt { {i18n.t("common.google_maps_link")} }
                        dd { a { href: "{link}", target: "_blank", rel: "noopener noreferrer", {i18n.t("common.open_map")} } }
                    }
                }
                DetailRow { label: i18n.t("report.collection"), value: report.collection_display() }
            }
        }

        section {
            class: "card",
            h2 { {i18n.t_with("report.participants_title", &[("count", &report.participants.len().to_string())])} }
            if report.participants.is_empty() {
                p { class: "empty-state", {i18n.t("report.no_participants")} }
            } else {
                ul {
                    class: "participants",
                    for participant in report.participants.iter() {
                        li {
                            key: "{participant.id}",
                            class: "participants__item",
                            span { class: "participants__name", "{participant.participant_name}" }
                            span {
                                class: "participants__type",
                                {participant_type_label(&i18n, participant.participant_type)}
                            }
                        }
                    }
                }
                div {
                    class: "participants__summary",
                    for kind in ParticipantType::ALL.iter().copied() {
                        span {
                            key: "{kind}",
                            {participant_type_label(&i18n, kind)}
                            ": "
                            "{report.count_participants(kind)}"
                        }
                    }
                }
            }
        }

        section {
            class: "card",
            AttachmentsManager {
                report_id: id,
                attachments: attachments(),
                on_change: move |list| attachments.set(list),
                readonly: true,
            }
        }

        section {
            class: "card",
            dl {
                class: "details",
                DetailRow { label: i18n.t("common.created_at"), value: dates.format_date_time(&report.created_at) }
                DetailRow { label: i18n.t("common.updated_at"), value: dates.format_date_time(&report.updated_at) }
            }
        }
        Link { class: "btn btn--outline", to: Route::ReportsList {}, {i18n.t("common.back_to_list")} }
    }
}

#[component]
pub fn ReportNew() -> Element {
    rsx! { ReportForm { id: None } }
}

#[component]
pub fn ReportEdit(id: i64) -> Element {
    rsx! { ReportForm { id: Some(id) } }
}

#[derive(Clone, Debug, PartialEq)]
struct Choices {
    meetings: Vec<RecurringMeeting>,
    persons: Vec<Person>,
}

/// Picking a meeting copies its leader, place and schedule into the form;
/// picking a leader copies their phone. Attachments can be managed once the
/// report exists.
#[component]
fn ReportForm(id: Option<i64>) -> Element {
    let client = use_client();
    let i18n = use_i18n();
    let nav = use_navigator();
    let mut values = use_signal(FormValues::new);
    let mut participants = use_signal(Vec::<ParticipantCreate>::new);
    let mut attachments = use_signal(Vec::<ReportAttachment>::new);
    let mut saving = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let load_client = client.clone();
    let mut choices = use_loader(use_reactive!(|(id,)| {
        let client = load_client.clone();
        async move {
            let (meetings, persons) = futures::join!(
                client.list_recurring_meetings(Page::default()),
                client.list_persons(Page::default())
            );
            let choices = Choices {
                meetings: meetings?,
                persons: persons?,
            };
            match id {
                Some(id) => {
                    let report = client.get_report(id).await?;
                    let create = ReportCreate::from(&report);
                    values.set(create.to_values());
                    participants.set(create.participants);
                    attachments.set(report.attachments);
                }
                None => values.set(new_report_values(&Utc::now().naive_utc())),
            }
            Ok::<_, ApiError>(choices)
        }
    }));

    let on_field_change = move |(name, value): (String, String)| {
        let Some(loaded) = choices.state().loaded().cloned() else {
            return;
        };
        let Ok(selected) = value.parse::<i64>() else {
            return;
        };
        match name.as_str() {
            "recurring_meeting_id" => {
                if let Some(meeting) = loaded.meetings.iter().find(|m| m.id == selected) {
                    prefill_from_meeting(&mut values.write(), meeting);
                }
            }
            "leader_person_id" => {
                if let Some(person) = loaded.persons.iter().find(|p| p.id == selected) {
                    prefill_from_leader(&mut values.write(), person);
                }
            }
            _ => {}
        }
    };

    let on_submit = move |form: FormValues| {
        let client = client.clone();
        spawn(async move {
            let mut report = match ReportCreate::from_values(&form) {
                Ok(report) => report,
                Err(e) => {
                    error.set(Some(form_error_text(&i18n, &report_fields(&i18n, &[], &[]), &e)));
                    return;
                }
            };
            report.participants = participants();
            error.set(None);
            saving.set(true);
            let result = match id {
                Some(id) => client.update_report(id, &ReportUpdate::from(report)).await,
                None => client.create_report(&report).await,
            };
            match result {
                Ok(saved) => {
                    tracing::info!("Saved report {}", saved.id);
                    nav.push(Route::ReportsList {});
                }
                Err(e) => {
                    error.set(Some(error_text(&i18n, &e)));
                    saving.set(false);
                }
            }
        });
    };

    let title = if id.is_some() { i18n.t("reports.edit") } else { i18n.t("reports.new") };

    let body = match choices.state() {
        LoadState::Loading => rsx! { PageLoader {} },
        LoadState::Failed(e) => rsx! {
            ErrorMessage {
                message: load_error_text(&i18n, &e),
                on_retry: move |_| choices.retry(),
            }
        },
        LoadState::Loaded(loaded) => rsx! {
            EntityForm {
                fields: report_fields(&i18n, &loaded.meetings, &loaded.persons),
                values,
                saving: saving(),
                error: error(),
                on_submit: on_submit,
                on_cancel: move |_| {
                    nav.push(Route::ReportsList {});
                },
                on_field_change: on_field_change,
                ParticipantsEditor { participants, disabled: saving() }
            }
            if let Some(report_id) = id {
                section {
                    class: "form-section",
                    AttachmentsManager {
                        report_id,
                        attachments: attachments(),
                        on_change: move |list| attachments.set(list),
                    }
                }
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

/// Participants are kept apart from the field values and merged into the
/// payload on submit.
#[component]
fn ParticipantsEditor(participants: Signal<Vec<ParticipantCreate>>, disabled: bool) -> Element {
    let i18n = use_i18n();
    let mut participants = participants;
    let mut name = use_signal(String::new);
    let mut kind = use_signal(|| ParticipantType::Member);

    let mut add = move || {
        let participant_name = name().trim().to_string();
        if participant_name.is_empty() {
            return;
        }
        participants.write().push(ParticipantCreate {
            participant_name,
            participant_type: kind(),
        });
        name.set(String::new());
        kind.set(ParticipantType::Member);
    };

    let count = participants.read().len().to_string();

    rsx! {
        fieldset {
            class: "form-section participants-editor",
            legend { {i18n.t_with("report.participants_title", &[("count", &count)])} }
            div {
                class: "participants-editor__add",
                input {
                    r#type: "text",
                    placeholder: i18n.t("participant.name"),
                    value: name(),
                    disabled,
                    oninput: move |evt: FormEvent| name.set(evt.value()),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key() == Key::Enter {
                            evt.prevent_default();
                            add();
                        }
                    },
                }
                select {
                    value: kind().as_str(),
                    disabled,
                    onchange: move |evt: FormEvent| {
                        if let Ok(parsed) = evt.value().parse::<ParticipantType>() {
                            kind.set(parsed);
                        }
                    },
                    for choice in ParticipantType::ALL.iter().copied() {
                        option {
                            key: "{choice}",
                            value: choice.as_str(),
                            selected: choice == kind(),
                            {participant_type_label(&i18n, choice)}
                        }
                    }
                }
                button {
                    r#type: "button",
                    class: "btn btn--outline",
                    disabled,
                    onclick: move |_| add(),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    {i18n.t("participant.add")}
                }
            }
            ul {
                class: "participants",
                for (index, participant) in participants.read().iter().enumerate() {
                    li {
                        key: "{index}",
                        class: "participants__item",
                        span { class: "participants__name", "{participant.participant_name}" }
                        span {
                            class: "participants__type",
                            {participant_type_label(&i18n, participant.participant_type)}
                        }
                        button {
                            r#type: "button",
                            class: "btn btn--danger btn--small",
                            title: i18n.t("participant.remove"),
                            disabled,
                            onclick: move |_| {
                                participants.write().remove(index);
                            },
                            Icon { icon: FaXmark, width: 10, height: 10 }
                        }
                    }
                }
            }
        }
    }
}
