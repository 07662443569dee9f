use api::{ApiError, Page};
use dioxus::prelude::*;
use store::{Person, PersonCreate, PersonUpdate};
use ui::crud::load_error_text;
use ui::forms::{form_error_text, person_fields};
use ui::icons::{FaPen, FaPlus, FaTrash};
use ui::{
    browser, error_text, use_client, use_i18n, use_loader, CrudTable, EntityForm, ErrorMessage,
    FormModel, FormValues, Icon, LoadState, PageLoader,
};

use crate::views::DetailRow;
use crate::Route;

#[component]
pub fn PersonsList() -> Element {
    let client = use_client();
    let i18n = use_i18n();
    let mut action_error = use_signal(|| Option::<String>::None);

    let list_client = client.clone();
    let mut persons = use_loader(move || {
        let client = list_client.clone();
        async move { client.list_persons(Page::default()).await }
    });

    let on_delete = move |person: Person| {
        let client = client.clone();
        spawn(async move {
            match client.delete_person(person.id).await {
                Ok(()) => {
                    action_error.set(None);
                    persons.retry();
                }
                Err(e) => action_error.set(Some(error_text(&i18n, &e))),
            }
        });
    };

    rsx! {
        div {
            class: "page-header",
            h1 { class: "page-title", {i18n.t("persons.title")} }
            Link {
                class: "btn btn--primary",
                to: Route::PersonNew {},
                Icon { icon: FaPlus, width: 12, height: 12 }
                {i18n.t("persons.new")}
            }
        }
        if let Some(message) = action_error() {
            ErrorMessage { message }
        }
        CrudTable::<Person> {
            state: persons.state(),
            empty_key: "persons.empty",
            on_retry: move |_| persons.retry(),
            on_delete: on_delete,
        }
    }
}

#[component]
pub fn PersonDetail(id: i64) -> Element {
    let client = use_client();
    let i18n = use_i18n();
    let nav = use_navigator();
    let mut action_error = use_signal(|| Option::<String>::None);

    let load_client = client.clone();
    let mut person = use_loader(use_reactive!(|(id,)| {
        let client = load_client.clone();
        async move { client.get_person(id).await }
    }));

    let on_delete = move |_| {
        if !browser::confirm(i18n.t("common.confirm_delete")) {
            return;
        }
        let client = client.clone();
        spawn(async move {
            match client.delete_person(id).await {
                Ok(()) => {
                    nav.push(Route::PersonsList {});
                }
                Err(e) => action_error.set(Some(error_text(&i18n, &e))),
            }
        });
    };

    let person = match person.state() {
        LoadState::Loading => return rsx! { PageLoader {} },
        LoadState::Failed(e) => {
            return rsx! {
                ErrorMessage {
                    message: load_error_text(&i18n, &e),
                    on_retry: move |_| person.retry(),
                }
                Link { class: "btn btn--outline", to: Route::PersonsList {}, {i18n.t("common.back_to_list")} }
            };
        }
        LoadState::Loaded(p) => p,
    };
    let dates = i18n.dates();

    rsx! {
        div {
            class: "page-header",
            h1 { class: "page-title", "{person.full_name()}" }
            div {
                class: "page-header__actions",
                Link {
                    class: "btn btn--outline",
                    to: Route::PersonEdit { id },
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
            DetailRow { label: i18n.t("person.first_name"), value: person.first_name.clone() }
            DetailRow { label: i18n.t("person.last_name"), value: person.last_name.clone() }
            DetailRow {
                label: i18n.t("person.birth_date"),
                value: dates.format_birth_date(&person.birth_date.to_string()),
            }
            DetailRow { label: i18n.t("person.phone"), value: person.phone.clone() }
            DetailRow { label: i18n.t("person.home_address"), value: person.home_address.clone() }
            if let Some(link) = person.google_maps_link.clone() {
                div {
                    class: "details__row",
                    dt { {i18n.t("common.google_maps_link")} }
                    dd { a { href: "{link}", target: "_blank", rel: "noopener noreferrer", {i18n.t("common.open_map")} } }
                }
            }
            DetailRow { label: i18n.t("common.created_at"), value: dates.format_date_time(&person.created_at) }
            DetailRow { label: i18n.t("common.updated_at"), value: dates.format_date_time(&person.updated_at) }
        }
        Link { class: "btn btn--outline", to: Route::PersonsList {}, {i18n.t("common.back_to_list")} }
    }
}

#[component]
pub fn PersonNew() -> Element {
    rsx! { PersonForm { id: None } }
}

#[component]
pub fn PersonEdit(id: i64) -> Element {
    rsx! { PersonForm { id: Some(id) } }
}

#[component]
fn PersonForm(id: Option<i64>) -> Element {
    let client = use_client();
    let i18n = use_i18n();
    let nav = use_navigator();
    let mut values = use_signal(FormValues::new);
    let mut saving = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let load_client = client.clone();
    let mut existing = use_loader(use_reactive!(|(id,)| {
        let client = load_client.clone();
        async move {
            if let Some(id) = id {
                let person = client.get_person(id).await?;
                values.set(PersonCreate::from(&person).to_values());
            }
            Ok::<(), ApiError>(())
        }
    }));

    let on_submit = move |form: FormValues| {
        let client = client.clone();
        spawn(async move {
            let person = match PersonCreate::from_values(&form) {
                Ok(person) => person,
                Err(e) => {
                    error.set(Some(form_error_text(&i18n, &person_fields(), &e)));
                    return;
                }
            };
            error.set(None);
            saving.set(true);
            let result = match id {
                Some(id) => client.update_person(id, &PersonUpdate::from(person)).await,
                None => client.create_person(&person).await,
            };
            match result {
                Ok(saved) => {
                    tracing::info!("Saved person {}", saved.id);
                    nav.push(Route::PersonsList {});
                }
                Err(e) => {
                    error.set(Some(error_text(&i18n, &e)));
                    saving.set(false);
                }
            }
        });
    };

    let title = if id.is_some() { i18n.t("persons.edit") } else { i18n.t("persons.new") };

    let body = match existing.state() {
        LoadState::Loading => rsx! { PageLoader {} },
        LoadState::Failed(e) => rsx! {
            ErrorMessage {
                message: load_error_text(&i18n, &e),
                on_retry: move |_| existing.retry(),
            }
        },
        LoadState::Loaded(()) => rsx! {
            EntityForm {
                fields: person_fields(),
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
