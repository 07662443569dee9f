//! # Entity models exchanged with the REST API
//!
//! Every type here is `Serialize + Deserialize` with the server's snake_case field
//! names, so values go over the wire as-is. The client holds no business logic
//! beyond display helpers and the required-field check in [`Validate`].
//!
//! | Module | Types |
//! |--------|-------|
//! | [`person`] | [`Person`], [`PersonCreate`], [`PersonUpdate`] |
//! | [`recurring_meeting`] | [`RecurringMeeting`] and its payloads, [`ReportType`], [`Periodicity`] |
//! | [`report`] | [`Report`] and its payloads, [`ReportParticipant`], [`ReportAttachment`], [`Currency`], [`ParticipantType`] |
//! | [`datetime`] | serde helpers accepting naive and offset ISO-8601 datetimes |
//! | [`validate`] | [`Validate`] and [`MissingFields`] |

/// Error returned when parsing one of the fixed enumerations from a string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Implements `ALL`, `as_str`, `Display` and `FromStr` for a wire enumeration.
/// `as_str` returns the wire value; `FromStr` accepts it case-insensitively.
macro_rules! wire_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The value sent over the wire.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::models::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($wire) {
                        return Ok($name::$variant);
                    }
                )+
                Err($crate::models::UnknownVariant {
                    kind: $kind,
                    value: s.to_string(),
                })
            }
        }
    };
}

pub(crate) use wire_enum;

pub mod datetime;
pub mod person;
pub mod recurring_meeting;
pub mod report;
pub mod validate;

pub use person::{Person, PersonCreate, PersonUpdate};
pub use recurring_meeting::{
    Periodicity, RecurringMeeting, RecurringMeetingCreate, RecurringMeetingUpdate, ReportType,
};
pub use report::{
    Currency, ParticipantCreate, ParticipantType, Report, ReportAttachment, ReportCreate,
    ReportParticipant, ReportUpdate,
};
pub use validate::{MissingFields, Validate};
