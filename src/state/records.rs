//! Patient record domain types
//!
//! The wire schema is the JSON the patient-record API speaks: camelCase
//! field names, entries discriminated by a `type` tag. Dates are
//! date-only (`NaiveDate`), serialized as `YYYY-MM-DD`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Diagnosis reference data, fetched once and never mutated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub code: String,
    pub name: String,
}

/// Patient gender as reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Male => "♂",
            Self::Female => "♀",
            Self::Other => "⚥",
        }
    }
}

/// Ordinal severity of a health check, 0 = healthy .. 3 = critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HealthCheckRating {
    Healthy,
    LowRisk,
    HighRisk,
    CriticalRisk,
}

impl HealthCheckRating {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::LowRisk => "Low risk",
            Self::HighRisk => "High risk",
            Self::CriticalRisk => "Critical risk",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Healthy => Self::LowRisk,
            Self::LowRisk => Self::HighRisk,
            Self::HighRisk => Self::CriticalRisk,
            Self::CriticalRisk => Self::Healthy,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Healthy => Self::CriticalRisk,
            Self::LowRisk => Self::Healthy,
            Self::HighRisk => Self::LowRisk,
            Self::CriticalRisk => Self::HighRisk,
        }
    }
}

impl TryFrom<u8> for HealthCheckRating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Healthy),
            1 => Ok(Self::LowRisk),
            2 => Ok(Self::HighRisk),
            3 => Ok(Self::CriticalRisk),
            n => Err(format!("invalid health check rating: {n}")),
        }
    }
}

impl From<HealthCheckRating> for u8 {
    fn from(rating: HealthCheckRating) -> Self {
        rating as u8
    }
}

/// Optional sick-leave range on an occupational healthcare entry.
/// Both ends are optional and no ordering is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SickLeave {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub description: String,
    pub date: NaiveDate,
    pub specialist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis_codes: Option<Vec<String>>,
    pub discharge_date: NaiveDate,
    pub discharge_criteria: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub description: String,
    pub date: NaiveDate,
    pub specialist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis_codes: Option<Vec<String>>,
    pub health_check_rating: HealthCheckRating,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupationalHealthcareEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub description: String,
    pub date: NaiveDate,
    pub specialist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis_codes: Option<Vec<String>>,
    pub employer_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sick_leave: Option<SickLeave>,
}

/// A medical entry, discriminated on the wire by the `type` tag.
///
/// Each variant carries only its own fields; a value of this type is
/// well-formed by construction. Raw form input is converted into an
/// `Entry` exactly once, at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Entry {
    Hospital(HospitalEntry),
    HealthCheck(HealthCheckEntry),
    OccupationalHealthcare(OccupationalHealthcareEntry),
}

impl Entry {
    pub fn type_label(&self) -> &'static str {
        match self {
            Self::Hospital(_) => "Hospital",
            Self::HealthCheck(_) => "Health check",
            Self::OccupationalHealthcare(_) => "Occupational healthcare",
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Hospital(e) => &e.description,
            Self::HealthCheck(e) => &e.description,
            Self::OccupationalHealthcare(e) => &e.description,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Hospital(e) => e.date,
            Self::HealthCheck(e) => e.date,
            Self::OccupationalHealthcare(e) => e.date,
        }
    }

    pub fn specialist(&self) -> &str {
        match self {
            Self::Hospital(e) => &e.specialist,
            Self::HealthCheck(e) => &e.specialist,
            Self::OccupationalHealthcare(e) => &e.specialist,
        }
    }

    pub fn diagnosis_codes(&self) -> &[String] {
        let codes = match self {
            Self::Hospital(e) => &e.diagnosis_codes,
            Self::HealthCheck(e) => &e.diagnosis_codes,
            Self::OccupationalHealthcare(e) => &e.diagnosis_codes,
        };
        codes.as_deref().unwrap_or(&[])
    }

    pub fn rating(&self) -> Option<HealthCheckRating> {
        match self {
            Self::HealthCheck(e) => Some(e.health_check_rating),
            _ => None,
        }
    }

    pub fn employer_name(&self) -> Option<&str> {
        match self {
            Self::OccupationalHealthcare(e) => Some(e.employer_name.as_str()),
            _ => None,
        }
    }
}

/// A patient and their stored entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    pub occupation: String,
    pub gender: Gender,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

/// Codes offered in the diagnosis multi-select: deduplicated, keeping
/// the first occurrence of each code in reference-list order.
pub fn selectable_codes(diagnoses: &[Diagnosis]) -> Vec<String> {
    let mut codes: Vec<String> = Vec::new();
    for diagnosis in diagnoses {
        if !codes.contains(&diagnosis.code) {
            codes.push(diagnosis.code.clone());
        }
    }
    codes
}

/// Look up the display name for a diagnosis code
pub fn diagnosis_name<'a>(diagnoses: &'a [Diagnosis], code: &str) -> Option<&'a str> {
    diagnoses
        .iter()
        .find(|d| d.code == code)
        .map(|d| d.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn diagnosis(code: &str, name: &str) -> Diagnosis {
        Diagnosis {
            code: code.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_rating_try_from_valid_values() {
        assert_eq!(HealthCheckRating::try_from(0), Ok(HealthCheckRating::Healthy));
        assert_eq!(HealthCheckRating::try_from(3), Ok(HealthCheckRating::CriticalRisk));
    }

    #[test]
    fn test_rating_try_from_out_of_range() {
        assert!(HealthCheckRating::try_from(4).is_err());
    }

    #[test]
    fn test_rating_serializes_as_integer() {
        let json = serde_json::to_value(HealthCheckRating::HighRisk).unwrap();
        assert_eq!(json, json!(2));
    }

    #[test]
    fn test_rating_cycles_through_all_values() {
        let mut rating = HealthCheckRating::Healthy;
        for _ in 0..4 {
            rating = rating.next();
        }
        assert_eq!(rating, HealthCheckRating::Healthy);
        assert_eq!(HealthCheckRating::Healthy.prev(), HealthCheckRating::CriticalRisk);
    }

    #[test]
    fn test_entry_serializes_with_type_tag() {
        let entry = Entry::HealthCheck(HealthCheckEntry {
            id: None,
            description: "Annual checkup".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
            specialist: "Dr. House".to_string(),
            diagnosis_codes: Some(vec!["M54.5".to_string()]),
            health_check_rating: HealthCheckRating::Healthy,
        });

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "HealthCheck",
                "description": "Annual checkup",
                "date": "2023-05-01",
                "specialist": "Dr. House",
                "diagnosisCodes": ["M54.5"],
                "healthCheckRating": 0
            })
        );
    }

    #[test]
    fn test_entry_deserializes_hospital_variant() {
        let json = r#"{
            "id": "e1",
            "type": "Hospital",
            "description": "Appendectomy",
            "date": "2022-11-30",
            "specialist": "Dr. Bailey",
            "dischargeDate": "2022-12-04",
            "dischargeCriteria": "Wound healed"
        }"#;

        let entry: Entry = serde_json::from_str(json).unwrap();
        match entry {
            Entry::Hospital(e) => {
                assert_eq!(e.id.as_deref(), Some("e1"));
                assert_eq!(e.discharge_criteria, "Wound healed");
                assert_eq!(e.diagnosis_codes, None);
            }
            other => panic!("expected hospital entry, got {other:?}"),
        }
    }

    #[test]
    fn test_occupational_entry_sick_leave_is_optional() {
        let json = r#"{
            "type": "OccupationalHealthcare",
            "description": "Back strain",
            "date": "2024-02-10",
            "specialist": "Dr. Wilson",
            "employerName": "Acme Oy"
        }"#;

        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.employer_name(), Some("Acme Oy"));
        match entry {
            Entry::OccupationalHealthcare(e) => assert!(e.sick_leave.is_none()),
            other => panic!("expected occupational entry, got {other:?}"),
        }
    }

    #[test]
    fn test_patient_deserializes_without_entries() {
        let json = r#"{
            "id": "p1",
            "name": "John McClane",
            "occupation": "Detective",
            "gender": "male"
        }"#;

        let patient: Patient = serde_json::from_str(json).unwrap();
        assert!(patient.entries.is_empty());
        assert_eq!(patient.gender, Gender::Male);
        assert!(patient.date_of_birth.is_none());
    }

    #[test]
    fn test_selectable_codes_dedupes_preserving_first_seen_order() {
        let diagnoses = vec![
            diagnosis("M54.5", "Low back pain"),
            diagnosis("J10.1", "Influenza"),
            diagnosis("M54.5", "Low back pain (duplicate)"),
            diagnosis("Z57.1", "Occupational exposure"),
        ];

        let codes = selectable_codes(&diagnoses);
        assert_eq!(codes, vec!["M54.5", "J10.1", "Z57.1"]);
    }

    #[test]
    fn test_selectable_codes_empty_list() {
        assert!(selectable_codes(&[]).is_empty());
    }

    #[test]
    fn test_diagnosis_name_lookup() {
        let diagnoses = vec![diagnosis("M54.5", "Low back pain")];
        assert_eq!(diagnosis_name(&diagnoses, "M54.5"), Some("Low back pain"));
        assert_eq!(diagnosis_name(&diagnoses, "J10.1"), None);
    }
}
