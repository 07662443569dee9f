use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::person::Person;
use super::validate::{blank, Validate};

/// Kind of report a recurring meeting produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportType {
    /// Small-group cell meeting.
    #[serde(rename = "celula")]
    Celula,
    /// Congregational service.
    #[serde(rename = "culto")]
    Culto,
}

super::wire_enum!(ReportType, "report type", {
    Celula => "celula",
    Culto => "culto",
});

/// How often a recurring meeting takes place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Periodicity {
    Daily,
    Weekly,
    Monthly,
}

super::wire_enum!(Periodicity, "periodicity", {
    Daily => "DAILY",
    Weekly => "WEEKLY",
    Monthly => "MONTHLY",
});

/// A regularly scheduled gathering, as returned by `/recurring-meetings`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecurringMeeting {
    pub id: i64,
    /// First occurrence; its weekday and time describe the schedule.
    #[serde(with = "super::datetime")]
    pub meeting_datetime: NaiveDateTime,
    pub leader_person_id: i64,
    pub report_type: ReportType,
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    pub periodicity: Periodicity,
    #[serde(default)]
    pub google_maps_link: Option<String>,
    #[serde(with = "super::datetime")]
    pub created_at: NaiveDateTime,
    #[serde(with = "super::datetime")]
    pub updated_at: NaiveDateTime,
    /// Embedded by the server on reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader: Option<Person>,
}

impl RecurringMeeting {
    /// Leader's full name when embedded, else `#<leader_person_id>`.
    pub fn leader_name(&self) -> String {
        match &self.leader {
            Some(leader) => leader.full_name(),
            None => format!("#{}", self.leader_person_id),
        }
    }
}

/// Body of `POST /recurring-meetings`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecurringMeetingCreate {
    #[serde(with = "super::datetime")]
    pub meeting_datetime: NaiveDateTime,
    pub leader_person_id: i64,
    pub report_type: ReportType,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub periodicity: Periodicity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_maps_link: Option<String>,
}

/// Body of `PUT /recurring-meetings/:id`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecurringMeetingUpdate {
    #[serde(
        default,
        with = "super::datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub meeting_datetime: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_person_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_type: Option<ReportType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periodicity: Option<Periodicity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_maps_link: Option<String>,
}

impl From<&RecurringMeeting> for RecurringMeetingCreate {
    fn from(m: &RecurringMeeting) -> Self {
        Self {
            meeting_datetime: m.meeting_datetime,
            leader_person_id: m.leader_person_id,
            report_type: m.report_type,
            location: m.location.clone(),
            description: m.description.clone(),
            periodicity: m.periodicity,
            google_maps_link: m.google_maps_link.clone(),
        }
    }
}

impl From<RecurringMeetingCreate> for RecurringMeetingUpdate {
    fn from(m: RecurringMeetingCreate) -> Self {
        Self {
            meeting_datetime: Some(m.meeting_datetime),
            leader_person_id: Some(m.leader_person_id),
            report_type: Some(m.report_type),
            location: Some(m.location),
            description: m.description,
            periodicity: Some(m.periodicity),
            google_maps_link: m.google_maps_link,
        }
    }
}

impl Validate for RecurringMeetingCreate {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.leader_person_id <= 0 {
            missing.push("leader_person_id");
        }
        if blank(&self.location) {
            missing.push("location");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_values() {
        assert_eq!(serde_json::to_string(&ReportType::Celula).unwrap(), "\"celula\"");
        assert_eq!(serde_json::to_string(&Periodicity::Weekly).unwrap(), "\"WEEKLY\"");
        assert_eq!("monthly".parse::<Periodicity>(), Ok(Periodicity::Monthly));
        assert_eq!("CULTO".parse::<ReportType>(), Ok(ReportType::Culto));
        assert!("yearly".parse::<Periodicity>().is_err());
        assert_eq!(Periodicity::ALL.len(), 3);
    }

    #[test]
    fn test_deserialize_with_embedded_leader() {
        let json = r#"{
            "id": 3,
            "meeting_datetime": "2024-05-06T19:30:00",
            "leader_person_id": 7,
            "report_type": "celula",
            "location": "Casa de Ana",
            "periodicity": "WEEKLY",
            "created_at": "2024-01-02T10:00:00",
            "updated_at": "2024-01-02T10:00:00",
            "leader": {
                "id": 7,
                "first_name": "Ana",
                "last_name": "Rojas",
                "birth_date": "1990-03-14",
                "phone": "700",
                "home_address": "Calle 1",
                "created_at": "2024-01-02T10:00:00",
                "updated_at": "2024-01-02T10:00:00"
            }
        }"#;

        let meeting: RecurringMeeting = serde_json::from_str(json).unwrap();
        assert_eq!(meeting.report_type, ReportType::Celula);
        assert_eq!(meeting.periodicity, Periodicity::Weekly);
        assert_eq!(meeting.leader_name(), "Ana Rojas");
        assert!(meeting.description.is_none());
    }

    #[test]
    fn test_leader_name_without_embedding() {
        let json = r#"{
            "id": 3,
            "meeting_datetime": "2024-05-06T19:30:00",
            "leader_person_id": 7,
            "report_type": "culto",
            "location": "Templo",
            "periodicity": "DAILY",
            "created_at": "2024-01-02T10:00:00",
            "updated_at": "2024-01-02T10:00:00"
        }"#;
        let meeting: RecurringMeeting = serde_json::from_str(json).unwrap();
        assert_eq!(meeting.leader_name(), "#7");
    }
}
