//! Local validation of form values
//!
//! Validation is a rule table: each [`Field`] owns an ordered list of
//! [`Rule`]s. Fields are checked independently so every problem is reported
//! at once, and within a field the first failing rule supplies the message.
//! Lengths are counted on the raw value; nothing is trimmed.

use std::collections::BTreeMap;

use jotter_config::ValidationComponentConfig;

use crate::note::{Field, FormValues, NoteDraft, NoteTag};

/// Error message per field
pub type FieldErrors = BTreeMap<Field, String>;

/// Outcome of validating a set of form values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid(NoteDraft),
    Invalid(FieldErrors),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    /// Errors when invalid, `None` when valid
    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            ValidationResult::Valid(_) => None,
            ValidationResult::Invalid(errors) => Some(errors),
        }
    }

    /// Error message for one field, if that field failed
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors()
            .and_then(|errors| errors.get(&field))
            .map(String::as_str)
    }

    pub fn into_draft(self) -> Option<NoteDraft> {
        match self {
            ValidationResult::Valid(draft) => Some(draft),
            ValidationResult::Invalid(_) => None,
        }
    }
}

/// A single check with the message reported when it fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Value must be non-empty
    Required { message: String },
    /// Value must have at least `min` characters
    MinLen { min: usize, message: String },
    /// Value must be one of `allowed`
    OneOf {
        allowed: Vec<&'static str>,
        message: String,
    },
}

impl Rule {
    pub fn required(message: impl Into<String>) -> Self {
        Rule::Required {
            message: message.into(),
        }
    }

    pub fn min_len(min: usize) -> Self {
        Rule::MinLen {
            min,
            message: format!("Must be at least {min} characters"),
        }
    }

    /// Restrict the value to the names of [`NoteTag::ALL`]
    pub fn one_of_tags(field: Field) -> Self {
        let allowed: Vec<&'static str> = NoteTag::ALL.iter().map(NoteTag::as_str).collect();
        let message = format!(
            "{} must be one of the following values: {}",
            field.name(),
            allowed.join(", ")
        );
        Rule::OneOf { allowed, message }
    }

    /// Returns the failure message, or `None` if the value passes
    pub fn check(&self, value: &str) -> Option<&str> {
        let passes = match self {
            Rule::Required { .. } => !value.is_empty(),
            Rule::MinLen { min, .. } => value.chars().count() >= *min,
            Rule::OneOf { allowed, .. } => allowed.contains(&value),
        };

        if passes {
            None
        } else {
            Some(self.message())
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Rule::Required { message }
            | Rule::MinLen { message, .. }
            | Rule::OneOf { message, .. } => message,
        }
    }
}

/// Rule table for the note form
#[derive(Debug, Clone)]
pub struct Validator {
    rules: Vec<(Field, Vec<Rule>)>,
}

impl Validator {
    pub fn new(title_min_len: usize, content_min_len: usize) -> Self {
        Self {
            rules: vec![
                (
                    Field::Title,
                    vec![
                        Rule::required("Title is required"),
                        Rule::min_len(title_min_len),
                    ],
                ),
                (
                    Field::Content,
                    vec![
                        Rule::required("Content is required"),
                        Rule::min_len(content_min_len),
                    ],
                ),
                (Field::Tag, vec![Rule::one_of_tags(Field::Tag)]),
            ],
        }
    }

    pub fn from_config(config: &ValidationComponentConfig) -> Self {
        Self::new(config.title_min_len, config.content_min_len)
    }

    pub fn rules(&self, field: Field) -> &[Rule] {
        self.rules
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, rules)| rules.as_slice())
            .unwrap_or(&[])
    }

    /// Validate one field; used for blur and change re-validation
    pub fn validate_field(&self, field: Field, values: &FormValues) -> Option<String> {
        let value = values.get(field);
        self.rules(field)
            .iter()
            .find_map(|rule| rule.check(value))
            .map(str::to_string)
    }

    /// Validate every field and build the normalized draft if all pass
    pub fn validate(&self, values: &FormValues) -> ValidationResult {
        let mut errors: FieldErrors = self
            .rules
            .iter()
            .filter_map(|(field, _)| {
                self.validate_field(*field, values)
                    .map(|message| (*field, message))
            })
            .collect();

        // The tag rule has already reported an unknown tag; parsing only
        // yields the typed value for the draft.
        match values.tag.parse::<NoteTag>() {
            Ok(tag) if errors.is_empty() => ValidationResult::Valid(NoteDraft::new(
                values.title.clone(),
                values.content.clone(),
                tag,
            )),
            Ok(_) => ValidationResult::Invalid(errors),
            Err(err) => {
                errors
                    .entry(Field::Tag)
                    .or_insert_with(|| err.to_string());
                ValidationResult::Invalid(errors)
            }
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::from_config(&ValidationComponentConfig::default())
    }
}

/// Validate with the default thresholds (title 3, content 5)
pub fn validate(values: &FormValues) -> ValidationResult {
    Validator::default().validate(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_short_title_and_content_both_reported() {
        let result = validate(&FormValues::new("Hi", "abc", "Todo"));

        assert!(!result.is_valid());
        assert_eq!(
            result.error(Field::Title),
            Some("Must be at least 3 characters")
        );
        assert_eq!(
            result.error(Field::Content),
            Some("Must be at least 5 characters")
        );
        assert_eq!(result.error(Field::Tag), None);
    }

    #[test]
    fn test_valid_values_normalize_tag() {
        let result = validate(&FormValues::new("Buy milk", "2% organic", "Shopping"));

        assert_eq!(
            result.into_draft(),
            Some(NoteDraft::new("Buy milk", "2% organic", NoteTag::Shopping))
        );
    }

    #[test_case("", "Title is required" ; "empty title reports required")]
    #[test_case("a", "Must be at least 3 characters" ; "one char")]
    #[test_case("ab", "Must be at least 3 characters" ; "two chars")]
    fn test_title_errors(title: &str, expected: &str) {
        let result = validate(&FormValues::new(title, "valid content", "Todo"));
        assert_eq!(result.error(Field::Title), Some(expected));
    }

    #[test_case("", "Content is required" ; "empty content reports required")]
    #[test_case("abcd", "Must be at least 5 characters" ; "four chars")]
    fn test_content_errors(content: &str, expected: &str) {
        let result = validate(&FormValues::new("Title", content, "Work"));
        assert_eq!(result.error(Field::Content), Some(expected));
    }

    #[test]
    fn test_length_counts_raw_string_without_trimming() {
        // Three spaces pass the title length check.
        let result = validate(&FormValues::new("   ", "     ", "Todo"));
        assert!(result.is_valid());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let result = validate(&FormValues::new("日本", "ñññññ", "Todo"));
        assert_eq!(
            result.error(Field::Title),
            Some("Must be at least 3 characters")
        );
        assert_eq!(result.error(Field::Content), None);
    }

    #[test_case("todo" ; "wrong case")]
    #[test_case("Urgent" ; "unknown tag")]
    #[test_case("" ; "empty tag")]
    fn test_unknown_tag_rejected(tag: &str) {
        let result = validate(&FormValues::new("Title", "Content", tag));
        assert_eq!(
            result.error(Field::Tag),
            Some("tag must be one of the following values: Todo, Work, Personal, Meeting, Shopping")
        );
    }

    #[test]
    fn test_unknown_tag_alongside_other_errors_keeps_rule_message() {
        let result = validate(&FormValues::new("Hi", "", "Urgent"));

        let errors = result.errors().expect("invalid");
        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors[&Field::Tag],
            "tag must be one of the following values: Todo, Work, Personal, Meeting, Shopping"
        );
    }

    #[test]
    fn test_validate_field_checks_only_that_field() {
        let validator = Validator::default();
        let values = FormValues::new("Hi", "", "Nope");

        assert_eq!(
            validator.validate_field(Field::Title, &values).as_deref(),
            Some("Must be at least 3 characters")
        );
        assert_eq!(
            validator.validate_field(Field::Content, &values).as_deref(),
            Some("Content is required")
        );
        assert!(validator.validate_field(Field::Tag, &values).is_some());
    }

    #[test]
    fn test_configured_thresholds_change_messages() {
        let validator = Validator::new(1, 10);
        let result = validator.validate(&FormValues::new("A", "too short", "Todo"));

        assert_eq!(result.error(Field::Title), None);
        assert_eq!(
            result.error(Field::Content),
            Some("Must be at least 10 characters")
        );
    }
}
