use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::person::Person;
use super::recurring_meeting::RecurringMeeting;
use super::validate::{blank, Validate};

/// Currency of a report's collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "BOB")]
    Bob,
}

super::wire_enum!(Currency, "currency", {
    Usd => "USD",
    Bob => "BOB",
});

/// Classification of an attendee. The short server codes are accepted on input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticipantType {
    #[serde(rename = "MEMBER", alias = "M")]
    Member,
    #[serde(rename = "VISITOR", alias = "V")]
    Visitor,
    #[serde(rename = "PARTICIPANT", alias = "P")]
    Participant,
}

super::wire_enum!(ParticipantType, "participant type", {
    Member => "MEMBER",
    Visitor => "VISITOR",
    Participant => "PARTICIPANT",
});

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportParticipant {
    pub id: i64,
    #[serde(default)]
    pub report_id: Option<i64>,
    pub participant_name: String,
    pub participant_type: ParticipantType,
    #[serde(with = "super::datetime")]
    pub created_at: NaiveDateTime,
    #[serde(with = "super::datetime")]
    pub updated_at: NaiveDateTime,
}

/// Uploaded file metadata; the bytes live in external storage under `file_key`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportAttachment {
    pub id: i64,
    #[serde(default)]
    pub report_id: Option<i64>,
    pub file_name: String,
    pub file_key: String,
    /// Bytes.
    pub file_size: u64,
    pub content_type: String,
    #[serde(with = "super::datetime")]
    pub created_at: NaiveDateTime,
    #[serde(with = "super::datetime")]
    pub updated_at: NaiveDateTime,
}

/// Record of one concrete occurrence of a recurring meeting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    #[serde(with = "super::datetime")]
    pub registration_date: NaiveDateTime,
    #[serde(with = "super::datetime")]
    pub meeting_datetime: NaiveDateTime,
    pub recurring_meeting_id: i64,
    pub leader_person_id: i64,
    pub leader_phone: String,
    #[serde(default)]
    pub collaborator: Option<String>,
    pub location: String,
    /// Exact amount; a decimal string on the wire so `45.50` keeps its scale.
    pub collection_amount: Decimal,
    pub currency: Currency,
    pub attendees_count: u32,
    #[serde(default)]
    pub google_maps_link: Option<String>,
    #[serde(with = "super::datetime")]
    pub created_at: NaiveDateTime,
    #[serde(with = "super::datetime")]
    pub updated_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_meeting: Option<RecurringMeeting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader: Option<Person>,
    #[serde(default)]
    pub participants: Vec<ReportParticipant>,
    #[serde(default)]
    pub attachments: Vec<ReportAttachment>,
}

impl Report {
    /// Amount with its currency, e.g. `45.50 USD`.
    pub fn collection_display(&self) -> String {
        format!("{} {}", self.collection_amount, self.currency)
    }

    /// Number of participants of the given type.
    pub fn count_participants(&self, kind: ParticipantType) -> usize {
        self.participants
            .iter()
            .filter(|p| p.participant_type == kind)
            .count()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticipantCreate {
    pub participant_name: String,
    pub participant_type: ParticipantType,
}

/// Body of `POST /reports`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportCreate {
    #[serde(with = "super::datetime")]
    pub registration_date: NaiveDateTime,
    #[serde(with = "super::datetime")]
    pub meeting_datetime: NaiveDateTime,
    pub recurring_meeting_id: i64,
    pub leader_person_id: i64,
    pub leader_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collaborator: Option<String>,
    pub location: String,
    pub collection_amount: Decimal,
    pub currency: Currency,
    pub attendees_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_maps_link: Option<String>,
    #[serde(default)]
    pub participants: Vec<ParticipantCreate>,
}

/// Body of `PUT /reports/:id`. A present `participants` list replaces the old one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportUpdate {
    #[serde(
        default,
        with = "super::datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub registration_date: Option<NaiveDateTime>,
    #[serde(
        default,
        with = "super::datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub meeting_datetime: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_meeting_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_person_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collaborator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_maps_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<ParticipantCreate>>,
}

impl From<&ReportParticipant> for ParticipantCreate {
    fn from(p: &ReportParticipant) -> Self {
        Self {
            participant_name: p.participant_name.clone(),
            participant_type: p.participant_type,
        }
    }
}

impl From<&Report> for ReportCreate {
    fn from(r: &Report) -> Self {
        Self {
            registration_date: r.registration_date,
            meeting_datetime: r.meeting_datetime,
            recurring_meeting_id: r.recurring_meeting_id,
            leader_person_id: r.leader_person_id,
            leader_phone: r.leader_phone.clone(),
            collaborator: r.collaborator.clone(),
            location: r.location.clone(),
            collection_amount: r.collection_amount,
            currency: r.currency,
            attendees_count: r.attendees_count,
            google_maps_link: r.google_maps_link.clone(),
            participants: r.participants.iter().map(ParticipantCreate::from).collect(),
        }
    }
}

impl From<ReportCreate> for ReportUpdate {
    fn from(r: ReportCreate) -> Self {
        Self {
            registration_date: Some(r.registration_date),
            meeting_datetime: Some(r.meeting_datetime),
            recurring_meeting_id: Some(r.recurring_meeting_id),
            leader_person_id: Some(r.leader_person_id),
            leader_phone: Some(r.leader_phone),
            collaborator: r.collaborator,
            location: Some(r.location),
            collection_amount: Some(r.collection_amount),
            currency: Some(r.currency),
            attendees_count: Some(r.attendees_count),
            google_maps_link: r.google_maps_link,
            participants: Some(r.participants),
        }
    }
}

impl Validate for ReportCreate {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.recurring_meeting_id <= 0 {
            missing.push("recurring_meeting_id");
        }
        if self.leader_person_id <= 0 {
            missing.push("leader_person_id");
        }
        if blank(&self.leader_phone) {
            missing.push("leader_phone");
        }
        if blank(&self.location) {
            missing.push("location");
        }
        if self.participants.iter().any(|p| blank(&p.participant_name)) {
            missing.push("participant_name");
        }
        missing
    }
}
