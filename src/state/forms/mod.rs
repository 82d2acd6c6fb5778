//! Entry form state: field values, session state, and validation

mod entry_form;
mod field;
mod validate;

pub use entry_form::{EntryForm, EntryType, FieldId, SubmitOutcome};
pub use field::{FieldValue, FormField};
pub use validate::parse_date;
