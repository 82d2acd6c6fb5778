//! Form field value objects

use crate::state::HealthCheckRating;

/// Type-safe field values
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Free text, including raw (not yet parsed) date input
    Text(String),
    /// Health check rating select, always one of the four ordinal values
    Rating(HealthCheckRating),
    /// Diagnosis code multi-select, in selection order
    Codes(Vec<String>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// A single form field with its configuration, value, and touched flag
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub value: FieldValue,
    /// Set once the user has edited the field (or on a failed submit,
    /// so errors become visible)
    pub touched: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            value: FieldValue::Text(String::new()),
            touched: false,
        }
    }

    /// Create a new rating select field
    pub fn rating(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            value: FieldValue::Rating(HealthCheckRating::Healthy),
            touched: false,
        }
    }

    /// Create a new diagnosis code multi-select field
    pub fn codes(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            value: FieldValue::Codes(Vec::new()),
            touched: false,
        }
    }

    /// Get the text value (returns empty string for non-text fields)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            _ => "",
        }
    }

    /// Get the rating value (returns Healthy for non-rating fields)
    pub fn as_rating(&self) -> HealthCheckRating {
        match &self.value {
            FieldValue::Rating(r) => *r,
            _ => HealthCheckRating::Healthy,
        }
    }

    /// Get the selected codes (returns an empty slice for non-code fields)
    pub fn as_codes(&self) -> &[String] {
        match &self.value {
            FieldValue::Codes(codes) => codes,
            _ => &[],
        }
    }

    /// Push a character to a text field value
    pub fn push_char(&mut self, c: char) {
        if let FieldValue::Text(s) = &mut self.value {
            s.push(c);
        }
    }

    /// Remove the last character from a text field value
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) = &mut self.value {
            s.pop();
        }
    }

    /// Cycle a rating field forwards or backwards
    pub fn cycle_rating(&mut self, forward: bool) {
        if let FieldValue::Rating(r) = &mut self.value {
            *r = if forward { r.next() } else { r.prev() };
        }
    }

    /// Toggle a code's membership in a multi-select field
    pub fn toggle_code(&mut self, code: &str) {
        if let FieldValue::Codes(codes) = &mut self.value {
            if let Some(pos) = codes.iter().position(|c| c == code) {
                codes.remove(pos);
            } else {
                codes.push(code.to_string());
            }
        }
    }

    /// Reset the field to its initial value and clear the touched flag
    pub fn reset(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => s.clear(),
            FieldValue::Rating(r) => *r = HealthCheckRating::Healthy,
            FieldValue::Codes(codes) => codes.clear(),
        }
        self.touched = false;
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Rating(r) => format!("{} ({})", u8::from(*r), r.label()),
            FieldValue::Codes(codes) => codes.join(", "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_field_editing() {
        let mut field = FormField::text("specialist", "Specialist");
        field.push_char('D');
        field.push_char('r');
        assert_eq!(field.as_text(), "Dr");
        field.pop_char();
        assert_eq!(field.as_text(), "D");
    }

    #[test]
    fn test_rating_field_cycles() {
        let mut field = FormField::rating("healthCheckRating", "Rating");
        assert_eq!(field.as_rating(), HealthCheckRating::Healthy);
        field.cycle_rating(true);
        assert_eq!(field.as_rating(), HealthCheckRating::LowRisk);
        field.cycle_rating(false);
        assert_eq!(field.as_rating(), HealthCheckRating::Healthy);
    }

    #[test]
    fn test_toggle_code_adds_and_removes() {
        let mut field = FormField::codes("diagnosisCodes", "Diagnosis codes");
        field.toggle_code("M54.5");
        field.toggle_code("J10.1");
        assert_eq!(field.as_codes(), ["M54.5", "J10.1"]);
        field.toggle_code("M54.5");
        assert_eq!(field.as_codes(), ["J10.1"]);
    }

    #[test]
    fn test_push_char_ignored_on_select_fields() {
        let mut field = FormField::rating("healthCheckRating", "Rating");
        field.push_char('x');
        assert_eq!(field.as_rating(), HealthCheckRating::Healthy);
    }

    #[test]
    fn test_reset_clears_value_and_touched() {
        let mut field = FormField::text("description", "Description");
        field.push_char('a');
        field.touched = true;
        field.reset();
        assert_eq!(field.as_text(), "");
        assert!(!field.touched);
    }

    #[test]
    fn test_display_value_for_each_kind() {
        let mut codes = FormField::codes("diagnosisCodes", "Diagnosis codes");
        codes.toggle_code("M54.5");
        codes.toggle_code("J10.1");
        assert_eq!(codes.display_value(), "M54.5, J10.1");

        let rating = FormField::rating("healthCheckRating", "Rating");
        assert_eq!(rating.display_value(), "0 (Healthy)");
    }
}
