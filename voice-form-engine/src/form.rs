use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Declared input type of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Tel,
    Number,
    Email,
    Date,
    Textarea,
    Select,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Text => "text",
            FieldType::Tel => "tel",
            FieldType::Number => "number",
            FieldType::Email => "email",
            FieldType::Date => "date",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
        };
        f.write_str(name)
    }
}

/// Static metadata for one form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: FieldType, required: bool) -> Self {
        Self {
            name: name.into(),
            field_type,
            required,
        }
    }
}

/// Ordered set of field descriptors making up one application form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormTemplate {
    fields: Vec<FieldDescriptor>,
}

impl FormTemplate {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    /// The citizen application form shared by the scheme pages.
    ///
    /// The PIN code is spoken digit by digit, so it takes the number route
    /// even though it is displayed as a plain text box.
    pub fn standard_application() -> Self {
        Self::new(vec![
            FieldDescriptor::new("fullName", FieldType::Text, true),
            FieldDescriptor::new("fatherName", FieldType::Text, true),
            FieldDescriptor::new("mobileNumber", FieldType::Tel, true),
            FieldDescriptor::new("email", FieldType::Email, false),
            FieldDescriptor::new("dob", FieldType::Date, true),
            FieldDescriptor::new("annualIncome", FieldType::Number, true),
            FieldDescriptor::new("address", FieldType::Textarea, true),
            FieldDescriptor::new("state", FieldType::Select, true),
            FieldDescriptor::new("district", FieldType::Text, true),
            FieldDescriptor::new("pincode", FieldType::Number, true),
        ])
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn progress(&self, state: &FormState) -> Progress {
        Progress::of(&self.fields, state)
    }

    /// Names of required fields that are still blank.
    pub fn missing_required(&self, state: &FormState) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.required && !state.is_filled(&f.name))
            .map(|f| f.name.clone())
            .collect()
    }
}

/// Current value of every touched field, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormState {
    values: BTreeMap<String, String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn clear(&mut self, name: &str) {
        self.values.remove(name);
    }

    /// Non-empty after trimming.
    pub fn is_filled(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| !v.trim().is_empty())
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    /// JSON object of field values, the `form_data` of a submission.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` serialization failures.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.values)
    }

    /// # Errors
    ///
    /// Fails when `json` is not an object of string values.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        Ok(Self {
            values: serde_json::from_str(json)?,
        })
    }
}

/// Completed-field count over a field list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn of(fields: &[FieldDescriptor], state: &FormState) -> Self {
        Self {
            completed: fields.iter().filter(|f| state.is_filled(&f.name)).count(),
            total: fields.len(),
        }
    }

    /// Completed over total; 0 for an empty field list.
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }

    pub fn percentage(&self) -> f64 {
        self.ratio() * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Share of `fields` whose value in `state` is non-blank.
pub fn completion_ratio(fields: &[FieldDescriptor], state: &FormState) -> f64 {
    Progress::of(fields, state).ratio()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_application_layout() {
        let template = FormTemplate::standard_application();
        assert_eq!(template.fields().len(), 10);
        assert_eq!(template.field("mobileNumber").map(|f| f.field_type), Some(FieldType::Tel));
        assert_eq!(template.field("pincode").map(|f| f.field_type), Some(FieldType::Number));
        assert_eq!(template.field("state").map(|f| f.field_type), Some(FieldType::Select));
        assert_eq!(template.field("email").map(|f| f.required), Some(false));
        assert!(template.field("aadhaar").is_none());
    }

    #[test]
    fn test_completion_ratio_ignores_blank_values() {
        let template = FormTemplate::standard_application();
        let mut state = FormState::new();
        state.set("fullName", "Sita Devi");
        state.set("fatherName", "   ");
        state.set("unrelated", "ignored");

        let progress = template.progress(&state);
        assert_eq!(progress, Progress { completed: 1, total: 10 });
        assert!((completion_ratio(template.fields(), &state) - 0.1).abs() < f64::EPSILON);
        assert!((progress.percentage() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_template_has_zero_ratio() {
        let progress = Progress::of(&[], &FormState::new());
        assert_eq!(progress.ratio(), 0.0);
        assert!(!progress.is_complete());
    }

    #[test]
    fn test_missing_required_skips_optional() {
        let template = FormTemplate::standard_application();
        let mut state = FormState::new();
        for field in template.fields() {
            state.set(field.name.clone(), "x");
        }
        state.clear("email");
        state.set("pincode", "");
        assert_eq!(template.missing_required(&state), vec!["pincode".to_string()]);
    }

    #[test]
    fn test_form_state_json_is_flat_object() {
        let mut state = FormState::new();
        state.set("fullName", "Sita Devi");
        state.set("pincode", "110001");
        let json = state.to_json().unwrap();
        assert_eq!(json, r#"{"fullName":"Sita Devi","pincode":"110001"}"#);
        assert_eq!(FormState::from_json(&json).unwrap(), state);
    }

    #[test]
    fn test_field_descriptor_serde_uses_type_key() {
        let field = FieldDescriptor::new("dob", FieldType::Date, true);
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "date");
    }
}
