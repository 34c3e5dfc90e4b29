//! Patient details extracted from the EDF header subject id
//!
//! EDF convention for the subject id field: `PatientCode Sex Birthdate Name`,
//! e.g. `DO0815199 F 06-MAY-2024 Jane_Doe`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Display name used when no patient name can be extracted
pub const NAME_NOT_AVAILABLE: &str = "Not Available";

/// Name token shape: letter/period groups joined by single underscores.
/// The period admits prefixes such as `Dr.` or `Mrs.`.
static NAME_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z.]+(?:_[A-Za-z.]+)+$").expect("valid name token pattern"));

/// Raw subject id together with the display name derived from it
#[derive(Debug, Clone, PartialEq)]
pub struct PatientIdentity {
    pub subject_id: Option<String>,
    pub display_name: String,
}

impl PatientIdentity {
    /// Build patient details from the raw subject id field.
    ///
    /// A blank or absent subject id, or one whose name token cannot be
    /// extracted, falls back to [`NAME_NOT_AVAILABLE`].
    pub fn from_subject_id(subject_id: Option<&str>) -> PatientIdentity {
        let subject_id = match subject_id {
            Some(s) if !s.trim().is_empty() => s,
            _ => {
                return PatientIdentity {
                    subject_id: None,
                    display_name: NAME_NOT_AVAILABLE.to_string(),
                }
            }
        };

        PatientIdentity {
            subject_id: Some(subject_id.to_string()),
            display_name: extract_patient_name(subject_id),
        }
    }
}

/// The patient name is the 4th whitespace-separated token of the subject
/// id, with underscores standing in for spaces.
fn extract_patient_name(subject_id: &str) -> String {
    let parts: Vec<&str> = subject_id.trim().split_whitespace().collect();
    match parts.get(3) {
        Some(token) if NAME_TOKEN.is_match(token) => token.replace('_', " "),
        _ => NAME_NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_name_from_fourth_token() {
        let patient = PatientIdentity::from_subject_id(Some("P001 M 01-JAN-1980 John_Doe"));
        assert_eq!(patient.display_name, "John Doe");
        assert_eq!(patient.subject_id.as_deref(), Some("P001 M 01-JAN-1980 John_Doe"));
    }

    #[test]
    fn keeps_prefixed_names() {
        let patient = PatientIdentity::from_subject_id(Some("ZHI27402 F 06-MAY-2024 Mrs._Jane_Doe"));
        assert_eq!(patient.display_name, "Mrs. Jane Doe");
    }

    #[test]
    fn fewer_than_four_tokens_is_not_available() {
        let patient = PatientIdentity::from_subject_id(Some("P001 M 01-JAN-1980"));
        assert_eq!(patient.display_name, NAME_NOT_AVAILABLE);
    }

    #[test]
    fn fourth_token_without_underscore_is_not_available() {
        let patient = PatientIdentity::from_subject_id(Some("P001 M 01-JAN-1980 JohnDoe"));
        assert_eq!(patient.display_name, NAME_NOT_AVAILABLE);
    }

    #[test]
    fn fourth_token_with_digits_is_not_available() {
        let patient = PatientIdentity::from_subject_id(Some("P001 M 01-JAN-1980 John_D0e"));
        assert_eq!(patient.display_name, NAME_NOT_AVAILABLE);
    }

    #[test]
    fn blank_subject_id_is_not_available() {
        let patient = PatientIdentity::from_subject_id(Some("   "));
        assert_eq!(patient.display_name, NAME_NOT_AVAILABLE);
        assert!(patient.subject_id.is_none());
    }

    #[test]
    fn absent_subject_id_is_not_available() {
        let patient = PatientIdentity::from_subject_id(None);
        assert_eq!(patient.display_name, NAME_NOT_AVAILABLE);
        assert!(patient.subject_id.is_none());
    }

    #[test]
    fn surrounding_whitespace_does_not_change_extraction() {
        let patient = PatientIdentity::from_subject_id(Some("  P001  M  01-JAN-1980  John_Doe  "));
        assert_eq!(patient.display_name, "John Doe");
    }
}
