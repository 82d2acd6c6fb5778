//! Application state definitions

use crate::state::{Diagnosis, EntryForm, Patient};

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Patient,
    EntryCreate,
}

/// Top-level application state
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    /// The patient being viewed, once fetched
    pub patient: Option<Patient>,
    /// Diagnosis reference list, fetched once at startup
    pub diagnoses: Vec<Diagnosis>,
    /// Selected index into the patient's entry list
    pub selected_entry: usize,
    /// The open entry form session, if any
    pub entry_form: Option<EntryForm>,
    /// Queue of error messages shown in the error dialog
    errors: Vec<String>,
    /// Transient status line message
    pub status_message: Option<String>,
}

impl AppState {
    pub fn push_error(&mut self, message: String) {
        self.errors.push(message);
    }

    /// The error currently shown, if any
    pub fn current_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        if !self.errors.is_empty() {
            self.errors.remove(0);
        }
    }

    pub fn entry_count(&self) -> usize {
        self.patient.as_ref().map_or(0, |p| p.entries.len())
    }

    pub fn select_next_entry(&mut self) {
        let count = self.entry_count();
        if count > 0 {
            self.selected_entry = (self.selected_entry + 1).min(count - 1);
        }
    }

    pub fn select_prev_entry(&mut self) {
        self.selected_entry = self.selected_entry.saturating_sub(1);
    }
}
