use serde::Serialize;
use std::collections::BTreeMap;

/// Key under which errors that belong to no single field are collected
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Validation errors of a submitted form, grouped by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
#[error("form has {} invalid field(s)", .0.len())]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an error set holding a single message for `field`
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.add(NON_FIELD_ERRORS, message);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Returns `value` when no error was recorded
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_into_result() {
        assert_eq!(FormErrors::new().into_result(7), Ok(7));

        let errors = FormErrors::single("first_name", "This field is required.");
        assert_eq!(errors.clone().into_result(7), Err(errors));
    }

    #[test]
    fn test_serializes_as_field_map() {
        let mut errors = FormErrors::new();
        errors.add("last_name", "This field is required.");
        errors.add_non_field("Instructor with this Last name and First name already exists.");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "__all__": ["Instructor with this Last name and First name already exists."],
                "last_name": ["This field is required."],
            })
        );
    }
}
