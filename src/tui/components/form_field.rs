//! Form field component for dialog input

use ratatui::{layout::Rect, Frame};

use crate::tui::{traits::FormHandler, ui::InputField};

/// Type of form field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormFieldType {
    Text,
    Password,
    Url,
}

/// Individual form field
#[derive(Debug, Clone)]
pub struct FormField {
    pub input: InputField,
    pub field_type: FormFieldType,
    pub required: bool,
    pub validation_error: Option<String>,
}

impl FormField {
    pub fn new(label: &str, field_type: FormFieldType) -> Self {
        let input = InputField::new(label);
        let input = if field_type == FormFieldType::Password {
            input.masked()
        } else {
            input
        };
        Self {
            input,
            field_type,
            required: false,
            validation_error: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.input = self.input.with_placeholder(placeholder);
        self
    }

    pub fn value(&self) -> &str {
        &self.input.value
    }

    pub fn set_label(&mut self, label: &str) {
        self.input.label = label.to_string();
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.validation_error = None;
    }

    /// Validate field value
    pub fn validate(&mut self) -> bool {
        self.validation_error = None;
        let value = self.input.value.trim();

        if value.is_empty() {
            if self.required {
                self.validation_error = Some("Required".to_string());
                return false;
            }
            return true;
        }

        if self.field_type == FormFieldType::Url
            && !(value.starts_with("http://") || value.starts_with("https://"))
        {
            self.validation_error = Some("Invalid URL".to_string());
            return false;
        }

        true
    }

    /// Render the form field
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let title = match &self.validation_error {
            Some(error) => format!("{} - {}", self.input.label, error),
            None if self.required => format!("{} *", self.input.label),
            None => self.input.label.clone(),
        };
        self.input.render_with_title(f, area, &title);
    }
}

/// Form container that manages multiple fields
#[derive(Debug, Clone)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub current_field: usize,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        let mut form = Self {
            fields,
            current_field: 0,
        };
        form.update_focus();
        form
    }

    fn update_focus(&mut self) {
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.input.set_focus(i == self.current_field);
        }
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value()).unwrap_or_default()
    }

    pub fn get_current_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.current_field)
    }

    /// Validate all fields
    pub fn validate_all(&mut self) -> bool {
        let mut all_valid = true;
        for field in &mut self.fields {
            if !field.validate() {
                all_valid = false;
            }
        }
        all_valid
    }

    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.current_field = 0;
        self.update_focus();
    }
}

impl FormHandler for Form {
    fn get_current_field(&self) -> usize {
        self.current_field
    }

    fn set_current_field(&mut self, field: usize) {
        if field < self.fields.len() {
            self.current_field = field;
            self.update_focus();
        }
    }

    fn get_field_count(&self) -> usize {
        self.fields.len()
    }

    fn handle_char_input(&mut self, c: char) {
        if let Some(field) = self.get_current_field_mut() {
            field.input.insert_char(c);
            field.validation_error = None;
        }
    }

    fn handle_backspace(&mut self) {
        if let Some(field) = self.get_current_field_mut() {
            field.input.delete_char();
            field.validation_error = None;
        }
    }

    fn handle_delete(&mut self) {
        if let Some(field) = self.get_current_field_mut() {
            field.input.delete_char_forward();
            field.validation_error = None;
        }
    }

    fn handle_cursor_left(&mut self) {
        if let Some(field) = self.get_current_field_mut() {
            field.input.move_cursor_left();
        }
    }

    fn handle_cursor_right(&mut self) {
        if let Some(field) = self.get_current_field_mut() {
            field.input.move_cursor_right();
        }
    }

    fn validate(&self) -> Result<(), String> {
        for field in &self.fields {
            if let Some(ref error) = field.validation_error {
                return Err(format!("{}: {}", field.input.label, error));
            }
        }
        Ok(())
    }
}
