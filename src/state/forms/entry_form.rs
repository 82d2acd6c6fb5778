//! Entry form session state
//!
//! One `EntryForm` is one form session: Idle(empty) -> Editing ->
//! {Submitting -> [Success: session ends / Failure: back to Editing
//! with errors shown]} | Cancelled. The discriminant (`kind`) decides
//! which fields are visible and required; values entered for fields
//! outside the active variant are kept in the form but ignored at
//! submit time, so switching variants back and forth loses nothing.

use std::collections::BTreeMap;

use super::field::FormField;
use super::validate;
use crate::state::Entry;

/// Entry discriminant, mirrors the wire `type` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryType {
    #[default]
    HealthCheck,
    OccupationalHealthcare,
    Hospital,
}

impl EntryType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::HealthCheck => "Health check",
            Self::OccupationalHealthcare => "Occupational healthcare",
            Self::Hospital => "Hospital",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::HealthCheck => Self::OccupationalHealthcare,
            Self::OccupationalHealthcare => Self::Hospital,
            Self::Hospital => Self::HealthCheck,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::HealthCheck => Self::Hospital,
            Self::OccupationalHealthcare => Self::HealthCheck,
            Self::Hospital => Self::OccupationalHealthcare,
        }
    }
}

/// Identifies one row of the form, including the non-input rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Kind,
    Description,
    Date,
    Specialist,
    DiagnosisCodes,
    HealthCheckRating,
    EmployerName,
    SickLeaveStart,
    SickLeaveEnd,
    DischargeDate,
    DischargeCriteria,
    Buttons,
}

impl FieldId {
    /// Wire-style field name, used to key validation errors
    pub fn name(&self) -> &'static str {
        match self {
            Self::Kind => "type",
            Self::Description => "description",
            Self::Date => "date",
            Self::Specialist => "specialist",
            Self::DiagnosisCodes => "diagnosisCodes",
            Self::HealthCheckRating => "healthCheckRating",
            Self::EmployerName => "employerName",
            Self::SickLeaveStart => "sickLeaveStart",
            Self::SickLeaveEnd => "sickLeaveEnd",
            Self::DischargeDate => "dischargeDate",
            Self::DischargeCriteria => "dischargeCriteria",
            Self::Buttons => "buttons",
        }
    }
}

const HEALTH_CHECK_FIELDS: &[FieldId] = &[
    FieldId::Kind,
    FieldId::Description,
    FieldId::Date,
    FieldId::Specialist,
    FieldId::DiagnosisCodes,
    FieldId::HealthCheckRating,
    FieldId::Buttons,
];

const OCCUPATIONAL_FIELDS: &[FieldId] = &[
    FieldId::Kind,
    FieldId::Description,
    FieldId::Date,
    FieldId::Specialist,
    FieldId::DiagnosisCodes,
    FieldId::EmployerName,
    FieldId::SickLeaveStart,
    FieldId::SickLeaveEnd,
    FieldId::Buttons,
];

const HOSPITAL_FIELDS: &[FieldId] = &[
    FieldId::Kind,
    FieldId::Description,
    FieldId::Date,
    FieldId::Specialist,
    FieldId::DiagnosisCodes,
    FieldId::DischargeDate,
    FieldId::DischargeCriteria,
    FieldId::Buttons,
];

/// Outcome of a submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Submit gate refused (already submitting, or nothing touched yet)
    Ignored,
    /// Field validation failed; errors are stored on the form
    Invalid,
    /// Validation passed; the caller owns posting the entry
    Submitted(Entry),
}

/// Entry create form
#[derive(Debug, Clone)]
pub struct EntryForm {
    pub kind: EntryType,
    pub description: FormField,
    pub date: FormField,
    pub specialist: FormField,
    pub diagnosis_codes: FormField,
    pub health_check_rating: FormField,
    pub employer_name: FormField,
    pub sick_leave_start: FormField,
    pub sick_leave_end: FormField,
    pub discharge_date: FormField,
    pub discharge_criteria: FormField,
    /// Codes offered by the multi-select, derived once from the
    /// diagnosis reference list
    pub offered_codes: Vec<String>,
    /// Cursor into `offered_codes` while the multi-select is active
    pub code_cursor: usize,
    /// Index into `visible_fields()`
    pub active_field_index: usize,
    /// Which button is selected on the buttons row (0=Cancel, 1=Add)
    pub selected_button: usize,
    pristine: bool,
    submitting: bool,
    errors: BTreeMap<&'static str, String>,
}

impl EntryForm {
    pub fn new(offered_codes: Vec<String>) -> Self {
        Self {
            kind: EntryType::default(),
            description: FormField::text("description", "Description"),
            date: FormField::text("date", "Date"),
            specialist: FormField::text("specialist", "Specialist"),
            diagnosis_codes: FormField::codes("diagnosisCodes", "Diagnosis codes"),
            health_check_rating: FormField::rating("healthCheckRating", "Health check rating"),
            employer_name: FormField::text("employerName", "Employer"),
            sick_leave_start: FormField::text("sickLeaveStart", "Sick leave start"),
            sick_leave_end: FormField::text("sickLeaveEnd", "Sick leave end"),
            discharge_date: FormField::text("dischargeDate", "Discharge date"),
            discharge_criteria: FormField::text("dischargeCriteria", "Discharge criteria"),
            offered_codes,
            code_cursor: 0,
            active_field_index: 0,
            selected_button: 1, // Default to "Add" button
            pristine: true,
            submitting: false,
            errors: BTreeMap::new(),
        }
    }

    /// The rows visible for the current discriminant
    pub fn visible_fields(&self) -> &'static [FieldId] {
        match self.kind {
            EntryType::HealthCheck => HEALTH_CHECK_FIELDS,
            EntryType::OccupationalHealthcare => OCCUPATIONAL_FIELDS,
            EntryType::Hospital => HOSPITAL_FIELDS,
        }
    }

    pub fn active_field_id(&self) -> FieldId {
        self.visible_fields()[self.active_field_index]
    }

    pub fn next_field(&mut self) {
        self.active_field_index = (self.active_field_index + 1) % self.visible_fields().len();
    }

    pub fn prev_field(&mut self) {
        let count = self.visible_fields().len();
        self.active_field_index = (self.active_field_index + count - 1) % count;
    }

    /// Get the input field for a row, if the row has one
    pub fn field(&self, id: FieldId) -> Option<&FormField> {
        match id {
            FieldId::Kind | FieldId::Buttons => None,
            FieldId::Description => Some(&self.description),
            FieldId::Date => Some(&self.date),
            FieldId::Specialist => Some(&self.specialist),
            FieldId::DiagnosisCodes => Some(&self.diagnosis_codes),
            FieldId::HealthCheckRating => Some(&self.health_check_rating),
            FieldId::EmployerName => Some(&self.employer_name),
            FieldId::SickLeaveStart => Some(&self.sick_leave_start),
            FieldId::SickLeaveEnd => Some(&self.sick_leave_end),
            FieldId::DischargeDate => Some(&self.discharge_date),
            FieldId::DischargeCriteria => Some(&self.discharge_criteria),
        }
    }

    fn field_mut(&mut self, id: FieldId) -> Option<&mut FormField> {
        match id {
            FieldId::Kind | FieldId::Buttons => None,
            FieldId::Description => Some(&mut self.description),
            FieldId::Date => Some(&mut self.date),
            FieldId::Specialist => Some(&mut self.specialist),
            FieldId::DiagnosisCodes => Some(&mut self.diagnosis_codes),
            FieldId::HealthCheckRating => Some(&mut self.health_check_rating),
            FieldId::EmployerName => Some(&mut self.employer_name),
            FieldId::SickLeaveStart => Some(&mut self.sick_leave_start),
            FieldId::SickLeaveEnd => Some(&mut self.sick_leave_end),
            FieldId::DischargeDate => Some(&mut self.discharge_date),
            FieldId::DischargeCriteria => Some(&mut self.discharge_criteria),
        }
    }

    /// Switch the discriminant. Stored values of all fields are kept;
    /// fields outside the new variant are simply ignored at submit.
    pub fn set_kind(&mut self, kind: EntryType) {
        self.kind = kind;
        self.pristine = false;
        let count = self.visible_fields().len();
        self.active_field_index = self.active_field_index.min(count - 1);
    }

    fn edit_field(&mut self, id: FieldId, edit: impl FnOnce(&mut FormField)) {
        if let Some(field) = self.field_mut(id) {
            edit(field);
            field.touched = true;
            self.errors.remove(id.name());
            self.pristine = false;
        }
    }

    /// Type a character into the active field
    pub fn push_char(&mut self, c: char) {
        self.edit_field(self.active_field_id(), |f| f.push_char(c));
    }

    /// Backspace in the active field
    pub fn pop_char(&mut self) {
        self.edit_field(self.active_field_id(), |f| f.pop_char());
    }

    /// Left/right on the active row: cycles selects, moves the code
    /// cursor, or changes the selected button
    pub fn cycle(&mut self, forward: bool) {
        match self.active_field_id() {
            FieldId::Kind => {
                let kind = if forward { self.kind.next() } else { self.kind.prev() };
                self.set_kind(kind);
            }
            FieldId::HealthCheckRating => {
                self.edit_field(FieldId::HealthCheckRating, |f| f.cycle_rating(forward));
            }
            FieldId::DiagnosisCodes => {
                if !self.offered_codes.is_empty() {
                    let count = self.offered_codes.len();
                    self.code_cursor = if forward {
                        (self.code_cursor + 1) % count
                    } else {
                        (self.code_cursor + count - 1) % count
                    };
                }
            }
            FieldId::Buttons => {
                self.selected_button = 1 - self.selected_button;
            }
            _ => {}
        }
    }

    /// Toggle the code under the cursor in the multi-select
    pub fn toggle_selected_code(&mut self) {
        if self.active_field_id() != FieldId::DiagnosisCodes {
            return;
        }
        if let Some(code) = self.offered_codes.get(self.code_cursor).cloned() {
            self.edit_field(FieldId::DiagnosisCodes, |f| f.toggle_code(&code));
        }
    }

    /// Validation error for a field, if any
    pub fn error(&self, id: FieldId) -> Option<&str> {
        self.errors.get(id.name()).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_pristine(&self) -> bool {
        self.pristine
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// The caller flips this around the network call; at most one
    /// submission is in flight per session
    pub fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    /// Whether the Add button is actionable. A UX gate only; it does
    /// not substitute for field validation.
    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.pristine
    }

    /// Validate the current values against the current discriminant.
    /// On failure every field is marked touched so errors show up.
    pub fn submit(&mut self) -> SubmitOutcome {
        if !self.can_submit() {
            return SubmitOutcome::Ignored;
        }
        match validate::build_entry(self) {
            Ok(entry) => {
                self.errors.clear();
                SubmitOutcome::Submitted(entry)
            }
            Err(errors) => {
                self.errors = errors;
                self.touch_all();
                SubmitOutcome::Invalid
            }
        }
    }

    /// Discard all entered state. Immediate and total, no confirmation.
    pub fn cancel(&mut self) {
        *self = Self::new(std::mem::take(&mut self.offered_codes));
    }

    fn touch_all(&mut self) {
        for id in [
            FieldId::Description,
            FieldId::Date,
            FieldId::Specialist,
            FieldId::DiagnosisCodes,
            FieldId::HealthCheckRating,
            FieldId::EmployerName,
            FieldId::SickLeaveStart,
            FieldId::SickLeaveEnd,
            FieldId::DischargeDate,
            FieldId::DischargeCriteria,
        ] {
            if let Some(field) = self.field_mut(id) {
                field.touched = true;
            }
        }
    }
}
