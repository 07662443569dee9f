//! Required-field presence checks run before a form is submitted.
//!
//! Only presence is checked here. Formats, ranges, uniqueness and references are
//! the server's business and come back as validation errors.

/// Names of the required fields that were left empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing required fields: {}", .0.join(", "))]
pub struct MissingFields(pub Vec<&'static str>);

pub trait Validate {
    /// Wire names of required fields that are blank.
    fn missing_fields(&self) -> Vec<&'static str>;

    fn validate(&self) -> Result<(), MissingFields> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(MissingFields(missing))
        }
    }
}

pub(crate) fn blank(s: &str) -> bool {
    s.trim().is_empty()
}
