//! Declarative book schema and the validator that evaluates it.

use serde::Serialize;
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use super::Book;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
}

impl FieldType {
    fn matches(&self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Integer => value.as_i64().is_some(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            FieldType::String => "a string",
            FieldType::Integer => "an integer",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
}

const fn required(name: &'static str, field_type: FieldType) -> FieldSpec {
    FieldSpec {
        name,
        field_type,
        required: true,
    }
}

/// Shape shared by `POST /books` and `PUT /books/:isbn` bodies.
pub const BOOK_SCHEMA: &[FieldSpec] = &[
    required("isbn", FieldType::String),
    required("amazon_url", FieldType::String),
    required("author", FieldType::String),
    required("language", FieldType::String),
    required("pages", FieldType::Integer),
    required("publisher", FieldType::String),
    required("title", FieldType::String),
    required("year", FieldType::Integer),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Create,
    /// Full replace. PUT never merges a partial body.
    Update,
}

impl ValidationMode {
    pub fn schema(&self) -> &'static [FieldSpec] {
        match self {
            ValidationMode::Create | ValidationMode::Update => BOOK_SCHEMA,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorReason {
    PayloadMissing,
    NotAnObject,
    Required,
    WrongType,
    InvalidFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub reason: FieldErrorReason,
    pub message: String,
}

impl FieldError {
    fn payload(reason: FieldErrorReason, message: &str) -> Self {
        FieldError {
            field: String::from("payload"),
            reason,
            message: message.to_string(),
        }
    }
}

/// A payload that does not satisfy the book schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Book payload is invalid ({} field error(s))", .errors.len())]
pub struct SchemaViolation {
    pub errors: Vec<FieldError>,
}

impl SchemaViolation {
    fn single(error: FieldError) -> Self {
        SchemaViolation {
            errors: vec![error],
        }
    }

    pub fn has_error(&self, field: &str, reason: FieldErrorReason) -> bool {
        self.errors
            .iter()
            .any(|error| error.field == field && error.reason == reason)
    }
}

impl From<ValidationErrors> for SchemaViolation {
    fn from(errors: ValidationErrors) -> Self {
        SchemaViolation {
            errors: field_errors(&errors),
        }
    }
}

/// Flattens `validator` errors into [`FieldError`]s, sorted by field name.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            let field = field.to_string();

            errors.iter().map(move |error| FieldError {
                field: field.clone(),
                reason: FieldErrorReason::InvalidFormat,
                message: error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| error.code.to_string()),
            })
        })
        .collect();

    field_errors.sort_by(|a, b| a.field.cmp(&b.field));

    field_errors
}

/// Validates `payload` against the schema selected by `mode`.
///
/// Shape errors (missing fields, wrong types) are collected for every field before
/// returning. Format rules on [`Book`] only run once the shape is sound.
pub fn validate(payload: Option<&Value>, mode: ValidationMode) -> Result<Book, SchemaViolation> {
    let payload = payload.ok_or_else(|| {
        SchemaViolation::single(FieldError::payload(
            FieldErrorReason::PayloadMissing,
            "Payload missing",
        ))
    })?;

    let object = payload.as_object().ok_or_else(|| {
        SchemaViolation::single(FieldError::payload(
            FieldErrorReason::NotAnObject,
            "Payload must be a JSON object",
        ))
    })?;

    let errors: Vec<FieldError> = mode
        .schema()
        .iter()
        .filter_map(|spec| match object.get(spec.name) {
            None if spec.required => Some(FieldError {
                field: spec.name.to_string(),
                reason: FieldErrorReason::Required,
                message: format!("`{}` is required", spec.name),
            }),
            None => None,
            Some(value) if !spec.field_type.matches(value) => Some(FieldError {
                field: spec.name.to_string(),
                reason: FieldErrorReason::WrongType,
                message: format!("`{}` must be {}", spec.name, spec.field_type.name()),
            }),
            Some(_) => None,
        })
        .collect();

    if !errors.is_empty() {
        return Err(SchemaViolation { errors });
    }

    let book: Book = serde_json::from_value(payload.clone()).map_err(|err| {
        SchemaViolation::single(FieldError::payload(
            FieldErrorReason::WrongType,
            &err.to_string(),
        ))
    })?;

    book.validate()?;

    Ok(book)
}
