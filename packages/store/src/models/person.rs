use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::validate::{blank, Validate};

/// A person known to the organization, as returned by `/persons`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Calendar date, `YYYY-MM-DD` on the wire.
    pub birth_date: NaiveDate,
    pub phone: String,
    pub home_address: String,
    #[serde(default)]
    pub google_maps_link: Option<String>,
    #[serde(with = "super::datetime")]
    pub created_at: NaiveDateTime,
    #[serde(with = "super::datetime")]
    pub updated_at: NaiveDateTime,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Body of `POST /persons`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersonCreate {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub phone: String,
    pub home_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_maps_link: Option<String>,
}

/// Body of `PUT /persons/:id`. Absent fields are left unchanged by the server.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_maps_link: Option<String>,
}

impl From<&Person> for PersonCreate {
    fn from(p: &Person) -> Self {
        Self {
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            birth_date: p.birth_date,
            phone: p.phone.clone(),
            home_address: p.home_address.clone(),
            google_maps_link: p.google_maps_link.clone(),
        }
    }
}

impl From<PersonCreate> for PersonUpdate {
    fn from(p: PersonCreate) -> Self {
        Self {
            first_name: Some(p.first_name),
            last_name: Some(p.last_name),
            birth_date: Some(p.birth_date),
            phone: Some(p.phone),
            home_address: Some(p.home_address),
            google_maps_link: p.google_maps_link,
        }
    }
}

impl Validate for PersonCreate {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if blank(&self.first_name) {
            missing.push("first_name");
        }
        if blank(&self.last_name) {
            missing.push("last_name");
        }
        if blank(&self.phone) {
            missing.push("phone");
        }
        if blank(&self.home_address) {
            missing.push("home_address");
        }
        missing
    }
}
