//! Locale-aware date display.
//!
//! Values from the API are naive UTC and are shown as-is, without conversion to
//! the browser's timezone.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

use crate::i18n::Locale;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateFormatter {
    locale: Locale,
}

impl DateFormatter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// `dd/mm/yyyy hh:mm` in Spanish, `mm/dd/yyyy hh:mm` in English.
    pub fn format_date_time(&self, dt: &NaiveDateTime) -> String {
        match self.locale {
            Locale::Es => dt.format("%d/%m/%Y %H:%M").to_string(),
            Locale::En => dt.format("%m/%d/%Y %H:%M").to_string(),
        }
    }

    pub fn format_date(&self, date: &NaiveDate) -> String {
        match self.locale {
            Locale::Es => date.format("%d/%m/%Y").to_string(),
            Locale::En => date.format("%m/%d/%Y").to_string(),
        }
    }

    /// Weekday and time of a recurring meeting, e.g. `Lunes 14:30`.
    pub fn format_meeting_date_time(&self, dt: &NaiveDateTime) -> String {
        format!("{} {}", self.weekday_name(dt.weekday()), dt.format("%H:%M"))
    }

    /// Format a `YYYY-MM-DD` birth date by splitting it, so no timezone can move
    /// the day. Anything else is returned unchanged.
    pub fn format_birth_date(&self, raw: &str) -> String {
        let day_part = raw.split('T').next().unwrap_or(raw);
        let mut parts = day_part.splitn(3, '-');
        let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next()) else {
            return raw.to_string();
        };
        if year.len() != 4 || month.len() != 2 || day.len() != 2 {
            return raw.to_string();
        }
        match self.locale {
            Locale::Es => format!("{day}/{month}/{year}"),
            Locale::En => format!("{month}/{day}/{year}"),
        }
    }

    pub fn weekday_name(&self, weekday: Weekday) -> &'static str {
        match (self.locale, weekday) {
            (Locale::Es, Weekday::Mon) => "Lunes",
            (Locale::Es, Weekday::Tue) => "Martes",
            (Locale::Es, Weekday::Wed) => "Miércoles",
            (Locale::Es, Weekday::Thu) => "Jueves",
            (Locale::Es, Weekday::Fri) => "Viernes",
            (Locale::Es, Weekday::Sat) => "Sábado",
            (Locale::Es, Weekday::Sun) => "Domingo",
            (Locale::En, Weekday::Mon) => "Monday",
            (Locale::En, Weekday::Tue) => "Tuesday",
            (Locale::En, Weekday::Wed) => "Wednesday",
            (Locale::En, Weekday::Thu) => "Thursday",
            (Locale::En, Weekday::Fri) => "Friday",
            (Locale::En, Weekday::Sat) => "Saturday",
            (Locale::En, Weekday::Sun) => "Sunday",
        }
    }
}
