//! # Schema-driven entity form
//!
//! A form is a list of [`FieldSpec`]s plus a [`FormValues`] map of raw input
//! strings keyed by wire field name. [`EntityForm`] renders any such schema,
//! blocks submission while a required field is blank and hands the values to
//! the view, which converts them with [`FormModel::from_values`].
//!
//! Field names equal the payload's JSON names, so converting between a
//! payload and its values is a per-field string conversion.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use dioxus::prelude::*;
use rust_decimal::Decimal;
use store::models::{datetime, MissingFields};
use store::{
    Currency, Periodicity, Person, PersonCreate, RecurringMeeting, RecurringMeetingCreate,
    ReportCreate, ReportType, Validate,
};

use crate::crud::{periodicity_label, report_type_label};
use crate::i18n::{use_i18n, I18n};
use crate::loading_states::Spinner;

/// Raw input values keyed by field name.
pub type FormValues = BTreeMap<String, String>;

/// Value format of `<input type="datetime-local">`.
pub const DATETIME_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Clone, Debug, PartialEq)]
pub enum FieldKind {
    Text,
    TextArea,
    Tel,
    Url,
    Date,
    DateTime,
    Integer,
    /// Two decimal places.
    Decimal,
    /// `(value, label)` pairs.
    Select(Vec<(String, String)>),
}

impl FieldKind {
    fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Tel => "tel",
            FieldKind::Url => "url",
            FieldKind::Date => "date",
            FieldKind::DateTime => "datetime-local",
            FieldKind::Integer | FieldKind::Decimal => "number",
            _ => "text",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    /// Wire name, also the key in [`FormValues`].
    pub name: &'static str,
    /// Translation key of the label.
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
        }
    }

    pub fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error(transparent)]
    Missing(#[from] MissingFields),
    #[error("invalid value for {0}")]
    Invalid(&'static str),
}

/// A payload that can be edited through [`EntityForm`].
pub trait FormModel: Sized {
    fn to_values(&self) -> FormValues;

    /// Parse and check required fields.
    fn from_values(values: &FormValues) -> Result<Self, FormError>;
}

/// Required fields whose value is blank, in schema order.
pub fn missing_required(fields: &[FieldSpec], values: &FormValues) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|f| f.required)
        .filter(|f| values.get(f.name).map_or(true, |v| v.trim().is_empty()))
        .map(|f| f.name)
        .collect()
}

/// Localized message for a conversion failure, naming fields by their labels.
pub fn form_error_text(i18n: &I18n, fields: &[FieldSpec], error: &FormError) -> String {
    let label = |name: &str| {
        fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| i18n.t(f.label))
            .unwrap_or(name)
            .to_string()
    };
    match error {
        FormError::Missing(MissingFields(names)) => {
            let labels: Vec<String> = names.iter().map(|n| label(n)).collect();
            i18n.t_with("form.missing_fields", &[("fields", &labels.join(", "))])
        }
        FormError::Invalid(name) => i18n.t_with("form.invalid_value", &[("field", &label(name))]),
    }
}

pub fn datetime_input(dt: &NaiveDateTime) -> String {
    dt.format(DATETIME_INPUT_FORMAT).to_string()
}

fn text(values: &FormValues, name: &str) -> String {
    values.get(name).map(|v| v.trim().to_string()).unwrap_or_default()
}

fn optional(values: &FormValues, name: &str) -> Option<String> {
    Some(text(values, name)).filter(|v| !v.is_empty())
}

/// Blank parses to `default`, so the required-field check reports it instead.
fn parsed<T: FromStr>(values: &FormValues, name: &'static str, default: T) -> Result<T, FormError> {
    let raw = text(values, name);
    if raw.is_empty() {
        return Ok(default);
    }
    raw.parse().map_err(|_| FormError::Invalid(name))
}

fn required_date(values: &FormValues, name: &'static str) -> Result<NaiveDate, FormError> {
    let raw = text(values, name);
    if raw.is_empty() {
        return Err(MissingFields(vec![name]).into());
    }
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| FormError::Invalid(name))
}

fn required_datetime(values: &FormValues, name: &'static str) -> Result<NaiveDateTime, FormError> {
    let raw = text(values, name);
    if raw.is_empty() {
        return Err(MissingFields(vec![name]).into());
    }
    datetime::parse(&raw).ok_or(FormError::Invalid(name))
}

fn values_of(pairs: Vec<(&str, String)>) -> FormValues {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

impl FormModel for PersonCreate {
    fn to_values(&self) -> FormValues {
        values_of(vec![
            ("first_name", self.first_name.clone()),
            ("last_name", self.last_name.clone()),
            ("birth_date", self.birth_date.format("%Y-%m-%d").to_string()),
            ("phone", self.phone.clone()),
            ("home_address", self.home_address.clone()),
            ("google_maps_link", self.google_maps_link.clone().unwrap_or_default()),
        ])
    }

    fn from_values(values: &FormValues) -> Result<Self, FormError> {
        let person = Self {
            first_name: text(values, "first_name"),
            last_name: text(values, "last_name"),
            birth_date: required_date(values, "birth_date")?,
            phone: text(values, "phone"),
            home_address: text(values, "home_address"),
            google_maps_link: optional(values, "google_maps_link"),
        };
        person.validate()?;
        Ok(person)
    }
}

impl FormModel for RecurringMeetingCreate {
    fn to_values(&self) -> FormValues {
        values_of(vec![
            ("meeting_datetime", datetime_input(&self.meeting_datetime)),
            ("leader_person_id", self.leader_person_id.to_string()),
            ("report_type", self.report_type.as_str().to_string()),
            ("location", self.location.clone()),
            ("description", self.description.clone().unwrap_or_default()),
            ("periodicity", self.periodicity.as_str().to_string()),
            ("google_maps_link", self.google_maps_link.clone().unwrap_or_default()),
        ])
    }

    fn from_values(values: &FormValues) -> Result<Self, FormError> {
        let meeting = Self {
            meeting_datetime: required_datetime(values, "meeting_datetime")?,
            leader_person_id: parsed(values, "leader_person_id", 0)?,
            report_type: parsed(values, "report_type", ReportType::Celula)?,
            location: text(values, "location"),
            description: optional(values, "description"),
            periodicity: parsed(values, "periodicity", Periodicity::Weekly)?,
            google_maps_link: optional(values, "google_maps_link"),
        };
        meeting.validate()?;
        Ok(meeting)
    }
}

/// Participants are edited outside the schema; `from_values` leaves them empty.
impl FormModel for ReportCreate {
    fn to_values(&self) -> FormValues {
        values_of(vec![
            ("registration_date", datetime_input(&self.registration_date)),
            ("meeting_datetime", datetime_input(&self.meeting_datetime)),
            ("recurring_meeting_id", self.recurring_meeting_id.to_string()),
            ("leader_person_id", self.leader_person_id.to_string()),
            ("leader_phone", self.leader_phone.clone()),
            ("collaborator", self.collaborator.clone().unwrap_or_default()),
            ("location", self.location.clone()),
            ("collection_amount", self.collection_amount.to_string()),
            ("currency", self.currency.as_str().to_string()),
            ("attendees_count", self.attendees_count.to_string()),
            ("google_maps_link", self.google_maps_link.clone().unwrap_or_default()),
        ])
    }

    fn from_values(values: &FormValues) -> Result<Self, FormError> {
        let report = Self {
            registration_date: required_datetime(values, "registration_date")?,
            meeting_datetime: required_datetime(values, "meeting_datetime")?,
            recurring_meeting_id: parsed(values, "recurring_meeting_id", 0)?,
            leader_person_id: parsed(values, "leader_person_id", 0)?,
            leader_phone: text(values, "leader_phone"),
            collaborator: optional(values, "collaborator"),
            location: text(values, "location"),
            collection_amount: parsed(values, "collection_amount", Decimal::ZERO)?,
            currency: parsed(values, "currency", Currency::Usd)?,
            attendees_count: parsed(values, "attendees_count", 0)?,
            google_maps_link: optional(values, "google_maps_link"),
            participants: Vec::new(),
        };
        report.validate()?;
        Ok(report)
    }
}

/// Values of an empty meeting form.
pub fn new_meeting_values() -> FormValues {
    values_of(vec![
        ("report_type", ReportType::Celula.as_str().to_string()),
        ("periodicity", Periodicity::Weekly.as_str().to_string()),
    ])
}

/// Values of an empty report form; registration defaults to `now`.
pub fn new_report_values(now: &NaiveDateTime) -> FormValues {
    values_of(vec![
        ("registration_date", datetime_input(now)),
        ("currency", Currency::Usd.as_str().to_string()),
        ("collection_amount", "0".to_string()),
        ("attendees_count", "0".to_string()),
    ])
}

/// Copy the chosen meeting's leader, place and schedule into a report form.
pub fn prefill_from_meeting(values: &mut FormValues, meeting: &RecurringMeeting) {
    let phone = meeting
        .leader
        .as_ref()
        .map(|p| p.phone.clone())
        .unwrap_or_default();
    values.insert("recurring_meeting_id".into(), meeting.id.to_string());
    values.insert("leader_person_id".into(), meeting.leader_person_id.to_string());
    values.insert("leader_phone".into(), phone);
    values.insert("location".into(), meeting.location.clone());
    values.insert(
        "google_maps_link".into(),
        meeting.google_maps_link.clone().unwrap_or_default(),
    );
    values.insert("meeting_datetime".into(), datetime_input(&meeting.meeting_datetime));
}

/// Copy the chosen leader's phone into a report form.
pub fn prefill_from_leader(values: &mut FormValues, person: &Person) {
    values.insert("leader_person_id".into(), person.id.to_string());
    values.insert("leader_phone".into(), person.phone.clone());
}

fn person_options(persons: &[Person]) -> Vec<(String, String)> {
    persons
        .iter()
        .map(|p| (p.id.to_string(), p.full_name()))
        .collect()
}

pub fn person_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::required("first_name", "person.first_name", FieldKind::Text),
        FieldSpec::required("last_name", "person.last_name", FieldKind::Text),
        FieldSpec::required("birth_date", "person.birth_date", FieldKind::Date),
        FieldSpec::required("phone", "person.phone", FieldKind::Tel),
        FieldSpec::required("home_address", "person.home_address", FieldKind::Text),
        FieldSpec::optional("google_maps_link", "common.google_maps_link", FieldKind::Url),
    ]
}

pub fn meeting_fields(i18n: &I18n, persons: &[Person]) -> Vec<FieldSpec> {
    let report_types = ReportType::ALL
        .iter()
        .map(|t| (t.as_str().to_string(), report_type_label(i18n, *t).to_string()))
        .collect();
    let periodicities = Periodicity::ALL
        .iter()
        .map(|p| (p.as_str().to_string(), periodicity_label(i18n, *p).to_string()))
        .collect();
    vec![
        FieldSpec::required("meeting_datetime", "meeting.meeting_datetime", FieldKind::DateTime),
        FieldSpec::required(
            "leader_person_id",
            "meeting.leader",
            FieldKind::Select(person_options(persons)),
        ),
        FieldSpec::required("report_type", "meeting.report_type", FieldKind::Select(report_types)),
        FieldSpec::required("periodicity", "meeting.periodicity", FieldKind::Select(periodicities)),
        FieldSpec::required("location", "meeting.location", FieldKind::Text),
        FieldSpec::optional("description", "meeting.description", FieldKind::TextArea),
        FieldSpec::optional("google_maps_link", "common.google_maps_link", FieldKind::Url),
    ]
}

pub fn report_fields(i18n: &I18n, meetings: &[RecurringMeeting], persons: &[Person]) -> Vec<FieldSpec> {
    let dates = i18n.dates();
    let meeting_options = meetings
        .iter()
        .map(|m| {
            let label = format!(
                "{} · {} · {}",
                dates.format_meeting_date_time(&m.meeting_datetime),
                m.location,
                m.leader_name()
            );
            (m.id.to_string(), label)
        })
        .collect();
    let currencies = Currency::ALL
        .iter()
        .map(|c| (c.as_str().to_string(), c.as_str().to_string()))
        .collect();
    vec![
        FieldSpec::required(
            "recurring_meeting_id",
            "report.recurring_meeting",
            FieldKind::Select(meeting_options),
        ),
        FieldSpec::required("registration_date", "report.registration_date", FieldKind::DateTime),
        FieldSpec::required("meeting_datetime", "report.meeting_datetime", FieldKind::DateTime),
        FieldSpec::required("attendees_count", "report.attendees_count", FieldKind::Integer),
        FieldSpec::required(
            "leader_person_id",
            "report.leader",
            FieldKind::Select(person_options(persons)),
        ),
        FieldSpec::required("leader_phone", "report.leader_phone", FieldKind::Tel),
        FieldSpec::optional("collaborator", "report.collaborator", FieldKind::Text),
        FieldSpec::required("location", "report.location", FieldKind::Text),
        FieldSpec::optional("google_maps_link", "common.google_maps_link", FieldKind::Url),
        FieldSpec::required("collection_amount", "report.collection_amount", FieldKind::Decimal),
        FieldSpec::required("currency", "report.currency", FieldKind::Select(currencies)),
    ]
}

/// Renders a schema. `on_field_change` runs after a value was stored, so the
/// parent can derive other fields from it.
#[component]
pub fn EntityForm(
    fields: Vec<FieldSpec>,
    values: Signal<FormValues>,
    on_submit: EventHandler<FormValues>,
    on_cancel: EventHandler<()>,
    #[props(default)] on_field_change: Option<EventHandler<(String, String)>>,
    #[props(default)] saving: bool,
    #[props(default)] error: Option<String>,
    #[props(default)] children: Element,
) -> Element {
    let i18n = use_i18n();
    let mut values = values;
    let mut missing = use_signal(Vec::<&'static str>::new);

    let on_input = EventHandler::new(move |(name, value): (&'static str, String)| {
        values.write().insert(name.to_string(), value.clone());
        if let Some(handler) = on_field_change {
            handler.call((name.to_string(), value));
        }
    });

    let schema = fields.clone();
    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let current = values();
        let blank = missing_required(&schema, &current);
        let none_missing = blank.is_empty();
        missing.set(blank);
        if none_missing {
            on_submit.call(current);
        }
    };

    let missing_message = {
        let blank = missing();
        (!blank.is_empty()).then(|| {
            form_error_text(&i18n, &fields, &FormError::Missing(MissingFields(blank)))
        })
    };

    rsx! {
        form {
            class: "entity-form",
            novalidate: true,
            onsubmit: onsubmit,

            if let Some(message) = missing_message.or(error) {
                div { class: "form-error", role: "alert", "{message}" }
            }

            div {
                class: "entity-form__grid",
                for field in fields.iter().cloned() {
                    FormField {
                        key: "{field.name}",
                        invalid: missing().contains(&field.name),
                        value: values().get(field.name).cloned().unwrap_or_default(),
                        on_input: on_input,
                        field: field.clone(),
                    }
                }
            }

            {children}

            div {
                class: "entity-form__actions",
                button {
                    r#type: "button",
                    class: "btn btn--outline",
                    disabled: saving,
                    onclick: move |_| on_cancel.call(()),
                    {i18n.t("common.cancel")}
                }
                button {
                    r#type: "submit",
                    class: "btn btn--primary",
                    disabled: saving,
                    if saving {
                        Spinner { class: "spinner--small" }
                        {i18n.t("common.saving")}
                    } else {
                        {i18n.t("common.save")}
                    }
                }
            }
        }
    }
}

#[component]
fn FormField(
    field: FieldSpec,
    value: String,
    invalid: bool,
    on_input: EventHandler<(&'static str, String)>,
) -> Element {
    let i18n = use_i18n();
    let name = field.name;
    let id = format!("field-{}", field.name);
    let class = if invalid { "form-field form-field--invalid" } else { "form-field" };
    let marker = if field.required { " *" } else { "" };

    let control = match &field.kind {
        FieldKind::TextArea => rsx! {
            textarea {
                id: "{id}",
                name: field.name,
                rows: 3,
                value: "{value}",
                oninput: move |evt| on_input.call((name, evt.value())),
            }
        },
        FieldKind::Select(options) => rsx! {
            select {
                id: "{id}",
                name: field.name,
                value: "{value}",
                onchange: move |evt| on_input.call((name, evt.value())),
                option { value: "", {i18n.t("form.select_placeholder")} }
                for (opt_value, label) in options.iter().cloned() {
                    option {
                        key: "{opt_value}",
                        selected: opt_value == value,
                        value: "{opt_value}",
                        "{label}"
                    }
                }
            }
        },
        kind => {
            let step = match kind {
                FieldKind::Decimal => "0.01",
                FieldKind::Integer => "1",
                _ => "any",
            };
            let min = matches!(kind, FieldKind::Decimal | FieldKind::Integer).then_some("0");
            rsx! {
                input {
                    id: "{id}",
                    name: field.name,
                    r#type: kind.input_type(),
                    step: step,
                    min: min,
                    value: "{value}",
                    oninput: move |evt| on_input.call((name, evt.value())),
                }
            }
        }
    };

    rsx! {
        div {
            class: "{class}",
            label { r#for: "{id}", "{i18n.t(field.label)}{marker}" }
            {control}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn meeting_with_leader() -> RecurringMeeting {
        serde_json::from_value(serde_json::json!({
            "id": 3,
            "meeting_datetime": "2024-05-06T19:30:00",
            "leader_person_id": 7,
            "report_type": "celula",
            "location": "Casa de Ana",
            "periodicity": "WEEKLY",
            "google_maps_link": "https://maps.example/ana",
            "created_at": "2024-01-02T10:00:00",
            "updated_at": "2024-01-02T10:00:00",
            "leader": {
                "id": 7,
                "first_name": "Ana",
                "last_name": "Rojas",
                "birth_date": "1990-03-14",
                "phone": "+591 700 00000",
                "home_address": "Calle 1",
                "created_at": "2024-01-02T10:00:00",
                "updated_at": "2024-01-02T10:00:00"
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_person_values_round_trip() {
        let form = values(&[
            ("first_name", " Ana "),
            ("last_name", "Rojas"),
            ("birth_date", "1990-03-14"),
            ("phone", "700"),
            ("home_address", "Calle 1"),
            ("google_maps_link", ""),
        ]);

        let person = PersonCreate::from_values(&form).unwrap();
        assert_eq!(person.first_name, "Ana");
        assert!(person.google_maps_link.is_none());
        assert_eq!(PersonCreate::from_values(&person.to_values()).unwrap(), person);
    }

    #[test]
    fn test_missing_required_in_schema_order() {
        let form = values(&[("first_name", "Ana"), ("phone", "  ")]);
        assert_eq!(
            missing_required(&person_fields(), &form),
            vec!["last_name", "birth_date", "phone", "home_address"]
        );
    }

    #[test]
    fn test_report_from_values() {
        let now = datetime::parse("2024-05-07T09:00").unwrap();
        let mut form = new_report_values(&now);
        prefill_from_meeting(&mut form, &meeting_with_leader());
        form.insert("attendees_count".into(), "12".into());
        form.insert("collection_amount".into(), "45.50".into());

        let report = ReportCreate::from_values(&form).unwrap();
        assert_eq!(report.recurring_meeting_id, 3);
        assert_eq!(report.leader_person_id, 7);
        assert_eq!(report.leader_phone, "+591 700 00000");
        assert_eq!(report.location, "Casa de Ana");
        assert_eq!(report.collection_amount.to_string(), "45.50");
        assert_eq!(report.currency, Currency::Usd);
        assert_eq!(datetime_input(&report.meeting_datetime), "2024-05-06T19:30");
        assert_eq!(report.registration_date, now);
    }

    #[test]
    fn test_invalid_and_missing_values() {
        let now = datetime::parse("2024-05-07T09:00").unwrap();
        let mut form = new_report_values(&now);
        form.insert("meeting_datetime".into(), "2024-05-06T19:30".into());

        let err = ReportCreate::from_values(&form).unwrap_err();
        assert_eq!(
            err,
            FormError::Missing(MissingFields(vec![
                "recurring_meeting_id",
                "leader_person_id",
                "leader_phone",
                "location"
            ]))
        );

        prefill_from_meeting(&mut form, &meeting_with_leader());
        form.insert("attendees_count".into(), "many".into());
        assert_eq!(
            ReportCreate::from_values(&form).unwrap_err(),
            FormError::Invalid("attendees_count")
        );
    }

    #[test]
    fn test_prefill_from_leader_sets_phone() {
        let meeting = meeting_with_leader();
        let leader = meeting.leader.clone().unwrap();
        let mut form = FormValues::new();

        prefill_from_leader(&mut form, &leader);

        assert_eq!(form["leader_person_id"], "7");
        assert_eq!(form["leader_phone"], "+591 700 00000");
    }

    #[test]
    fn test_meeting_defaults_parse() {
        let mut form = new_meeting_values();
        form.insert("meeting_datetime".into(), "2024-05-06T19:30".into());
        form.insert("leader_person_id".into(), "7".into());
        form.insert("location".into(), "Casa de Ana".into());

        let meeting = RecurringMeetingCreate::from_values(&form).unwrap();
        assert_eq!(meeting.report_type, ReportType::Celula);
        assert_eq!(meeting.periodicity, Periodicity::Weekly);
        assert_eq!(RecurringMeetingCreate::from_values(&meeting.to_values()).unwrap(), meeting);
    }
}
