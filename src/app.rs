//! Application state and core logic

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::api::PatientApi;
use crate::state::{selectable_codes, AppState, EntryForm, FieldId, SubmitOutcome, View};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// API client for the patient-record backend
    api: Box<dyn PatientApi>,
    /// The patient this session is viewing
    patient_id: String,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance and load the initial data
    pub async fn new(api: Box<dyn PatientApi>, patient_id: String) -> Result<Self> {
        let mut app = Self {
            state: AppState::default(),
            api,
            patient_id,
            quit: false,
        };
        app.reload().await;
        Ok(app)
    }

    /// Fetch the diagnosis reference list and the patient. Failures are
    /// queued for the error dialog rather than aborting the app.
    pub async fn reload(&mut self) {
        match self.api.fetch_diagnoses().await {
            Ok(diagnoses) => self.state.diagnoses = diagnoses,
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch diagnosis list");
                self.state.push_error(format!("Failed to load diagnoses: {e}"));
            }
        }

        match self.api.fetch_patient(&self.patient_id).await {
            Ok(patient) => {
                self.state.patient = Some(patient);
                self.state.selected_entry = 0;
            }
            Err(e) => {
                tracing::warn!(error = %e, patient_id = %self.patient_id, "failed to fetch patient");
                self.state.push_error(format!("Failed to load patient: {e}"));
            }
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // The error dialog swallows input until dismissed
        if self.state.current_error().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        match self.state.current_view {
            View::Patient => self.handle_patient_key(key).await,
            View::EntryCreate => self.handle_form_key(key).await,
        }
        Ok(())
    }

    async fn handle_patient_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('a') => self.open_entry_form(),
            KeyCode::Char('r') => {
                self.state.status_message = Some("Reloading...".to_string());
                self.reload().await;
                self.state.status_message = None;
            }
            KeyCode::Up | KeyCode::Char('k') => self.state.select_prev_entry(),
            KeyCode::Down | KeyCode::Char('j') => self.state.select_next_entry(),
            _ => {}
        }
    }

    fn open_entry_form(&mut self) {
        let codes = selectable_codes(&self.state.diagnoses);
        self.state.entry_form = Some(EntryForm::new(codes));
        self.state.current_view = View::EntryCreate;
        self.state.status_message = None;
    }

    async fn handle_form_key(&mut self, key: KeyEvent) {
        let Some(form) = self.state.entry_form.as_mut() else {
            self.state.current_view = View::Patient;
            return;
        };

        match key.code {
            KeyCode::Esc => self.cancel_entry_form(),
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Left => form.cycle(false),
            KeyCode::Right => form.cycle(true),
            KeyCode::Backspace => form.pop_char(),
            KeyCode::Char(' ') if form.active_field_id() == FieldId::DiagnosisCodes => {
                form.toggle_selected_code();
            }
            KeyCode::Enter => match form.active_field_id() {
                FieldId::Buttons => {
                    if form.selected_button == 0 {
                        self.cancel_entry_form();
                    } else {
                        self.submit_entry().await;
                    }
                }
                FieldId::DiagnosisCodes => form.toggle_selected_code(),
                _ => form.next_field(),
            },
            KeyCode::Char(c) => form.push_char(c),
            _ => {}
        }
    }

    /// Validate the form and, if it produced an entry, post it. On a
    /// validation failure the form stays open with its errors shown; on
    /// an API failure the form stays open with its data intact.
    async fn submit_entry(&mut self) {
        let outcome = match self.state.entry_form.as_mut() {
            Some(form) => form.submit(),
            None => return,
        };

        let entry = match outcome {
            SubmitOutcome::Submitted(entry) => entry,
            SubmitOutcome::Invalid | SubmitOutcome::Ignored => return,
        };

        if let Some(form) = self.state.entry_form.as_mut() {
            form.set_submitting(true);
        }

        match self.api.add_entry(&self.patient_id, &entry).await {
            Ok(patient) => {
                self.state.patient = Some(patient);
                self.state.entry_form = None;
                self.state.current_view = View::Patient;
                self.state.status_message = Some("Entry added".to_string());
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to submit entry");
                if let Some(form) = self.state.entry_form.as_mut() {
                    form.set_submitting(false);
                }
                self.state.push_error(format!("Failed to add entry: {e}"));
            }
        }
    }

    /// Discard the form session and return to the patient view
    fn cancel_entry_form(&mut self) {
        if let Some(form) = self.state.entry_form.as_mut() {
            form.cancel();
        }
        self.state.entry_form = None;
        self.state.current_view = View::Patient;
        self.state.status_message = Some("Entry discarded".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MockPatientApi};
    use crate::state::{
        Diagnosis, Entry, Gender, HealthCheckEntry, HealthCheckRating, Patient,
    };
    use chrono::NaiveDate;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_patient(entry_count: usize) -> Patient {
        let entries = (0..entry_count)
            .map(|i| {
                Entry::HealthCheck(HealthCheckEntry {
                    id: Some(format!("e{i}")),
                    description: format!("Checkup {i}"),
                    date: NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
                    specialist: "Dr. House".to_string(),
                    diagnosis_codes: None,
                    health_check_rating: HealthCheckRating::Healthy,
                })
            })
            .collect();
        Patient {
            id: "p1".to_string(),
            name: "John McClane".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1986, 7, 9),
            occupation: "Detective".to_string(),
            gender: Gender::Male,
            entries,
        }
    }

    fn test_diagnoses() -> Vec<Diagnosis> {
        vec![Diagnosis {
            code: "M54.5".to_string(),
            name: "Low back pain".to_string(),
        }]
    }

    fn connected_mock(entry_count: usize) -> MockPatientApi {
        let mut api = MockPatientApi::new();
        api.expect_fetch_diagnoses()
            .returning(|| Ok(test_diagnoses()));
        api.expect_fetch_patient()
            .returning(move |_| Ok(test_patient(entry_count)));
        api
    }

    async fn app_with_open_form(api: MockPatientApi) -> App {
        let mut app = App::new(Box::new(api), "p1".to_string()).await.unwrap();
        app.handle_key(key(KeyCode::Char('a'))).await.unwrap();
        app
    }

    fn fill_required_health_check_fields(app: &mut App) {
        let form = app.state.entry_form.as_mut().unwrap();
        let fill = |form: &mut EntryForm, id: FieldId, text: &str| {
            let index = form.visible_fields().iter().position(|f| *f == id).unwrap();
            form.active_field_index = index;
            for c in text.chars() {
                form.push_char(c);
            }
        };
        fill(form, FieldId::Description, "Annual checkup");
        fill(form, FieldId::Date, "2023-05-01");
        fill(form, FieldId::Specialist, "Dr. House");
    }

    #[tokio::test]
    async fn test_startup_loads_patient_and_diagnoses() {
        let app = App::new(Box::new(connected_mock(2)), "p1".to_string())
            .await
            .unwrap();
        assert_eq!(app.state.patient.as_ref().unwrap().name, "John McClane");
        assert_eq!(app.state.diagnoses.len(), 1);
        assert!(app.state.current_error().is_none());
    }

    #[tokio::test]
    async fn test_startup_fetch_failure_is_surfaced() {
        let mut api = MockPatientApi::new();
        api.expect_fetch_diagnoses()
            .returning(|| Ok(test_diagnoses()));
        api.expect_fetch_patient().returning(|_| {
            Err(ApiError::Status {
                status: 404,
                message: "patient not found".to_string(),
            })
        });

        let app = App::new(Box::new(api), "missing".to_string()).await.unwrap();
        assert!(app.state.patient.is_none());
        assert!(app
            .state
            .current_error()
            .unwrap()
            .contains("patient not found"));
    }

    #[tokio::test]
    async fn test_open_form_offers_deduplicated_codes() {
        let app = app_with_open_form(connected_mock(0)).await;
        assert_eq!(app.state.current_view, View::EntryCreate);
        let form = app.state.entry_form.as_ref().unwrap();
        assert_eq!(form.offered_codes, ["M54.5"]);
    }

    #[tokio::test]
    async fn test_submit_success_posts_once_and_closes_form() {
        let mut api = connected_mock(0);
        api.expect_add_entry()
            .withf(|patient_id, entry| {
                patient_id == "p1" && entry.description() == "Annual checkup"
            })
            .times(1)
            .returning(|_, _| Ok(test_patient(1)));

        let mut app = app_with_open_form(api).await;
        fill_required_health_check_fields(&mut app);
        app.submit_entry().await;

        assert!(app.state.entry_form.is_none());
        assert_eq!(app.state.current_view, View::Patient);
        assert_eq!(app.state.patient.as_ref().unwrap().entries.len(), 1);
        assert_eq!(app.state.status_message.as_deref(), Some("Entry added"));
    }

    #[tokio::test]
    async fn test_invalid_submit_keeps_form_open_without_network_call() {
        let mut api = connected_mock(0);
        api.expect_add_entry().never();

        let mut app = app_with_open_form(api).await;
        // Touch one field so the pristine gate lets the validator run
        let form = app.state.entry_form.as_mut().unwrap();
        let index = form
            .visible_fields()
            .iter()
            .position(|f| *f == FieldId::Description)
            .unwrap();
        form.active_field_index = index;
        form.push_char('x');
        app.submit_entry().await;

        let form = app.state.entry_form.as_ref().unwrap();
        assert!(form.has_errors());
        assert_eq!(app.state.current_view, View::EntryCreate);
    }

    #[tokio::test]
    async fn test_submit_api_failure_keeps_data_and_shows_error() {
        let mut api = connected_mock(0);
        api.expect_add_entry().times(1).returning(|_, _| {
            Err(ApiError::Status {
                status: 500,
                message: "boom".to_string(),
            })
        });

        let mut app = app_with_open_form(api).await;
        fill_required_health_check_fields(&mut app);
        app.submit_entry().await;

        let form = app.state.entry_form.as_ref().unwrap();
        assert_eq!(form.description.as_text(), "Annual checkup");
        assert!(!form.is_submitting());
        assert!(app.state.current_error().unwrap().contains("boom"));
    }

    #[tokio::test]
    async fn test_cancel_discards_form_without_network_call() {
        let mut api = connected_mock(0);
        api.expect_add_entry().never();

        let mut app = app_with_open_form(api).await;
        fill_required_health_check_fields(&mut app);
        app.handle_key(key(KeyCode::Esc)).await.unwrap();

        assert!(app.state.entry_form.is_none());
        assert_eq!(app.state.current_view, View::Patient);
        assert_eq!(app.state.status_message.as_deref(), Some("Entry discarded"));
    }

    #[tokio::test]
    async fn test_error_dialog_swallows_keys_until_dismissed() {
        let mut api = MockPatientApi::new();
        api.expect_fetch_diagnoses().returning(|| {
            Err(ApiError::Status {
                status: 503,
                message: "unavailable".to_string(),
            })
        });
        api.expect_fetch_patient()
            .returning(move |_| Ok(test_patient(0)));

        let mut app = App::new(Box::new(api), "p1".to_string()).await.unwrap();
        assert!(app.state.current_error().is_some());

        // 'a' must not open the form while the dialog is up
        app.handle_key(key(KeyCode::Char('a'))).await.unwrap();
        assert!(app.state.entry_form.is_none());

        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert!(app.state.current_error().is_none());
    }

    #[tokio::test]
    async fn test_entry_list_navigation_clamps() {
        let mut app = App::new(Box::new(connected_mock(2)), "p1".to_string())
            .await
            .unwrap();
        app.handle_key(key(KeyCode::Down)).await.unwrap();
        app.handle_key(key(KeyCode::Down)).await.unwrap();
        assert_eq!(app.state.selected_entry, 1);
        app.handle_key(key(KeyCode::Up)).await.unwrap();
        app.handle_key(key(KeyCode::Up)).await.unwrap();
        assert_eq!(app.state.selected_entry, 0);
    }

    #[tokio::test]
    async fn test_quit_key() {
        let mut app = App::new(Box::new(connected_mock(0)), "p1".to_string())
            .await
            .unwrap();
        assert!(!app.should_quit());
        app.handle_key(key(KeyCode::Char('q'))).await.unwrap();
        assert!(app.should_quit());
    }
}
