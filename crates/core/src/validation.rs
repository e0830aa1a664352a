//! Field-level validation support.
//!
//! Request DTOs derive `validator::Validate`; this module turns the
//! resulting [`ValidationErrors`] into the flat per-field violation list
//! the API returns with a 409, so handlers never poke at the validator
//! crate's nested error maps directly.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::CoreError;

/// A single field that failed validation, with every rule it broke.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub messages: Vec<String>,
}

/// Flatten [`ValidationErrors`] into one [`FieldViolation`] per field.
///
/// Nested violations (from `#[validate(nested)]` structs and collections)
/// are flattened into indexed paths such as `categorias_cie10[0].codigo`.
/// Violations are sorted by field path so responses are deterministic.
pub fn collect_violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations = Vec::new();
    flatten_into("", errors, &mut violations);
    violations.sort_by(|a, b| a.field.cmp(&b.field));
    violations
}

fn flatten_into(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldViolation>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(errs) => out.push(FieldViolation {
                field: path,
                messages: errs
                    .iter()
                    .map(|e| match &e.message {
                        Some(msg) => msg.to_string(),
                        None => e.code.to_string(),
                    })
                    .collect(),
            }),
            ValidationErrorsKind::Struct(inner) => flatten_into(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    flatten_into(&format!("{path}[{index}]"), inner, out);
                }
            }
        }
    }
}

/// Validate a DTO, mapping failures to [`CoreError::Validation`].
pub fn check<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(collect_violations(&e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Dummy {
        #[validate(length(min = 3, max = 250, message = "min:3|max:250"))]
        nombre: String,
        #[validate(length(min = 1, message = "required"))]
        codigo: String,
    }

    #[test]
    fn valid_input_passes() {
        let input = Dummy {
            nombre: "Ciertas enfermedades infecciosas".into(),
            codigo: "A00-B99".into(),
        };
        assert!(check(&input).is_ok());
    }

    #[test]
    fn violations_are_per_field_and_sorted() {
        let input = Dummy {
            nombre: "ab".into(),
            codigo: String::new(),
        };
        let err = check(&input).unwrap_err();
        let CoreError::Validation(violations) = err else {
            panic!("expected validation error");
        };
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].field, "codigo");
        assert_eq!(violations[0].messages, vec!["required"]);
        assert_eq!(violations[1].field, "nombre");
        assert_eq!(violations[1].messages, vec!["min:3|max:250"]);
    }

    #[test]
    fn nested_child_violations_get_indexed_paths() {
        #[derive(Validate)]
        struct Parent {
            #[validate(length(min = 3, message = "min:3|max:250"))]
            nombre: String,
            #[validate(nested)]
            categorias: Vec<Child>,
        }

        #[derive(Validate)]
        struct Child {
            #[validate(length(min = 1, message = "required"))]
            codigo: String,
        }

        // Parent is valid; only the second child is broken.
        let input = Parent {
            nombre: "Enfermedades infecciosas".into(),
            categorias: vec![
                Child { codigo: "A00".into() },
                Child { codigo: String::new() },
            ],
        };

        let err = check(&input).unwrap_err();
        let CoreError::Validation(violations) = err else {
            panic!("expected validation error");
        };
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "categorias[1].codigo");
        assert_eq!(violations[0].messages, vec!["required"]);
    }

    #[test]
    fn parent_and_nested_violations_are_both_reported() {
        #[derive(Validate)]
        struct Parent {
            #[validate(length(min = 3, message = "min:3|max:250"))]
            nombre: String,
            #[validate(nested)]
            categorias: Vec<Child>,
        }

        #[derive(Validate)]
        struct Child {
            #[validate(length(min = 1, message = "required"))]
            codigo: String,
        }

        let input = Parent {
            nombre: "ab".into(),
            categorias: vec![Child { codigo: String::new() }],
        };

        let err = check(&input).unwrap_err();
        let CoreError::Validation(violations) = err else {
            panic!("expected validation error");
        };
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].field, "categorias[0].codigo");
        assert_eq!(violations[1].field, "nombre");
    }

    #[test]
    fn message_falls_back_to_rule_code() {
        #[derive(Validate)]
        struct NoMessage {
            #[validate(length(min = 3))]
            nombre: String,
        }

        let err = check(&NoMessage { nombre: "x".into() }).unwrap_err();
        let CoreError::Validation(violations) = err else {
            panic!("expected validation error");
        };
        assert_eq!(violations[0].messages, vec!["length"]);
    }
}
