//! Completeness validation for the filter form.

use crate::core::form::bindings::FieldBindingStore;
use crate::core::form::fields::FieldName;

pub const REQUIRED_MESSAGE: &str = "Please fill in all required fields";

/// Per-field validity feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidity {
    pub field: FieldName,
    pub valid: bool,
    pub message: Option<String>,
}

/// Result of one validation pass. Recomputed on every pass and discarded
/// after use; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub fields: Vec<FieldValidity>,
    pub all_valid: bool,
}

impl ValidationOutcome {
    /// Input names of the fields that failed, for error reporting.
    pub fn missing_fields(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| !f.valid)
            .map(|f| f.field.input_name().to_string())
            .collect()
    }
}

pub struct FormValidator;

impl FormValidator {
    /// Check every field against the required set. The pass is exhaustive:
    /// every field gets a validity entry, not just the first failing one, so
    /// the caller can surface feedback for all of them at once.
    pub fn validate(store: &FieldBindingStore, required: &[FieldName]) -> ValidationOutcome {
        let mut fields = Vec::with_capacity(FieldName::ALL.len());
        let mut all_valid = true;

        for field in FieldName::ALL {
            let is_required = required.contains(&field);
            let is_empty = store.get(field).is_none_or(|v| v.is_empty());
            let valid = !is_required || !is_empty;

            if !valid {
                all_valid = false;
            }
            fields.push(FieldValidity {
                field,
                valid,
                message: (!valid).then(|| REQUIRED_MESSAGE.to_string()),
            });
        }

        ValidationOutcome { fields, all_valid }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_required_filled_is_valid() {
        let mut store = FieldBindingStore::new();
        for field in FieldName::DEFAULT_REQUIRED {
            store.set(field, Some("value".to_string()));
        }

        let outcome = FormValidator::validate(&store, &FieldName::DEFAULT_REQUIRED);
        assert!(outcome.all_valid);
        assert!(outcome.fields.iter().all(|f| f.valid));
        assert!(outcome.missing_fields().is_empty());
    }

    #[test]
    fn test_missing_required_field_flagged_exactly() {
        let mut store = FieldBindingStore::new();
        for field in FieldName::DEFAULT_REQUIRED {
            store.set(field, Some("value".to_string()));
        }
        store.set(FieldName::QuoteDate, None);

        let outcome = FormValidator::validate(&store, &FieldName::DEFAULT_REQUIRED);
        assert!(!outcome.all_valid);
        assert_eq!(outcome.missing_fields(), vec!["quoteDate".to_string()]);

        let quote_date = outcome
            .fields
            .iter()
            .find(|f| f.field == FieldName::QuoteDate)
            .unwrap();
        assert!(!quote_date.valid);
        assert_eq!(quote_date.message.as_deref(), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let mut store = FieldBindingStore::new();
        for field in FieldName::DEFAULT_REQUIRED {
            store.set(field, Some("value".to_string()));
        }
        store.set(FieldName::LmSolution, Some(String::new()));

        let outcome = FormValidator::validate(&store, &FieldName::DEFAULT_REQUIRED);
        assert!(!outcome.all_valid);
        assert_eq!(outcome.missing_fields(), vec!["lmSolution".to_string()]);
    }

    #[test]
    fn test_validation_is_exhaustive_not_short_circuit() {
        // Every required field empty: all of them are reported, not just
        // the first failure.
        let store = FieldBindingStore::new();
        let outcome = FormValidator::validate(&store, &FieldName::DEFAULT_REQUIRED);

        assert!(!outcome.all_valid);
        assert_eq!(
            outcome.missing_fields().len(),
            FieldName::DEFAULT_REQUIRED.len()
        );
        // And every recognized field still has a validity entry.
        assert_eq!(outcome.fields.len(), FieldName::ALL.len());
    }

    #[test]
    fn test_non_required_fields_always_valid() {
        let store = FieldBindingStore::new();
        let outcome = FormValidator::validate(&store, &FieldName::DEFAULT_REQUIRED);

        let xb_service = outcome
            .fields
            .iter()
            .find(|f| f.field == FieldName::XbService)
            .unwrap();
        assert!(xb_service.valid);
        assert!(xb_service.message.is_none());
    }

    #[test]
    fn test_empty_required_set_always_valid() {
        let store = FieldBindingStore::new();
        let outcome = FormValidator::validate(&store, &[]);
        assert!(outcome.all_valid);
    }
}
