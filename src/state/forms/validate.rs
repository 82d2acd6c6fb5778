//! Submit-time validation: raw form values in, a well-typed `Entry`
//! out, or a field-scoped error map.
//!
//! Conversion happens exactly once, here; no partially-populated entry
//! ever exists. Errors carry no aggregate: absence of any field error
//! means the entry was built.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::entry_form::{EntryForm, EntryType};
use crate::state::{
    Entry, HealthCheckEntry, HospitalEntry, OccupationalHealthcareEntry, SickLeave,
};

/// Message for an empty required text field
pub const REQUIRED: &str = "* Required ...";
/// Message for a missing or unparseable date
pub const REQUIRED_DATE: &str = "Required";

/// Accepted input formats for date fields. Parsing is date-only: no
/// time-of-day, no timezone. Output is always `%Y-%m-%d`.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%m/%d/%Y"];

type FieldErrors = BTreeMap<&'static str, String>;

/// Parse a raw date string against the accepted formats
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

fn require_text(errors: &mut FieldErrors, name: &'static str, raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.insert(name, REQUIRED.to_string());
    }
    trimmed.to_string()
}

fn require_date(errors: &mut FieldErrors, name: &'static str, raw: &str) -> Option<NaiveDate> {
    let parsed = parse_date(raw);
    if parsed.is_none() {
        errors.insert(name, REQUIRED_DATE.to_string());
    }
    parsed
}

fn optional_date(errors: &mut FieldErrors, name: &'static str, raw: &str) -> Option<NaiveDate> {
    if raw.trim().is_empty() {
        return None;
    }
    require_date(errors, name, raw)
}

/// Build an entry from the form's raw values and current discriminant.
///
/// Only the fields belonging to the active variant (plus the common
/// fields) are read; everything else in form state is ignored.
pub fn build_entry(form: &EntryForm) -> Result<Entry, FieldErrors> {
    let mut errors = FieldErrors::new();

    let description = require_text(&mut errors, "description", form.description.as_text());
    let specialist = require_text(&mut errors, "specialist", form.specialist.as_text());
    let date = require_date(&mut errors, "date", form.date.as_text());

    let codes = form.diagnosis_codes.as_codes();
    let diagnosis_codes = if codes.is_empty() {
        None
    } else {
        Some(codes.to_vec())
    };

    match form.kind {
        EntryType::HealthCheck => {
            // The rating select is constrained to the four ordinal
            // values by construction, so there is nothing to check.
            let health_check_rating = form.health_check_rating.as_rating();
            let date = match date {
                Some(d) if errors.is_empty() => d,
                _ => return Err(errors),
            };
            Ok(Entry::HealthCheck(HealthCheckEntry {
                id: None,
                description,
                date,
                specialist,
                diagnosis_codes,
                health_check_rating,
            }))
        }
        EntryType::OccupationalHealthcare => {
            let employer_name = require_text(&mut errors, "employerName", form.employer_name.as_text());
            let start_date = optional_date(&mut errors, "sickLeaveStart", form.sick_leave_start.as_text());
            let end_date = optional_date(&mut errors, "sickLeaveEnd", form.sick_leave_end.as_text());
            let date = match date {
                Some(d) if errors.is_empty() => d,
                _ => return Err(errors),
            };
            let sick_leave = if start_date.is_some() || end_date.is_some() {
                Some(SickLeave {
                    start_date,
                    end_date,
                })
            } else {
                None
            };
            Ok(Entry::OccupationalHealthcare(OccupationalHealthcareEntry {
                id: None,
                description,
                date,
                specialist,
                diagnosis_codes,
                employer_name,
                sick_leave,
            }))
        }
        EntryType::Hospital => {
            let discharge_date = require_date(&mut errors, "dischargeDate", form.discharge_date.as_text());
            let discharge_criteria =
                require_text(&mut errors, "dischargeCriteria", form.discharge_criteria.as_text());
            let (date, discharge_date) = match (date, discharge_date) {
                (Some(d), Some(dd)) if errors.is_empty() => (d, dd),
                _ => return Err(errors),
            };
            Ok(Entry::Hospital(HospitalEntry {
                id: None,
                description,
                date,
                specialist,
                diagnosis_codes,
                discharge_date,
                discharge_criteria,
            }))
        }
    }
}
