//! Request validation from per-field rule tables.
//!
//! Every field is checked independently and every violated rule contributes one
//! message; nothing short-circuits. Properties the payload shape does not declare
//! are rejected as well.

use crate::error::AppError;
use crate::model::{CreateTeste, UpdateTeste};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A single predicate applied to a field value (`None` when the field is absent).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Check {
    /// Present, not null and not the empty string.
    NotEmpty,
    IsString,
    /// Strings must contain a non-whitespace character. Non-strings are left to the type checks.
    NotBlank,
    /// A JSON number; numeric strings are rejected.
    IsNumber,
}

impl Check {
    fn passes(self, value: Option<&Value>) -> bool {
        match self {
            Check::NotEmpty => match value {
                None | Some(Value::Null) => false,
                Some(Value::String(s)) => !s.is_empty(),
                Some(_) => true,
            },
            Check::IsString => matches!(value, Some(Value::String(_))),
            Check::NotBlank => match value {
                Some(Value::String(s)) => !s.trim().is_empty(),
                _ => true,
            },
            Check::IsNumber => matches!(value, Some(Value::Number(_))),
        }
    }
}

/// Ordered checks for one field, each paired with the message reported when it fails.
#[derive(Debug)]
pub struct FieldRule {
    pub field: &'static str,
    /// When set, an absent field skips all checks.
    pub optional: bool,
    pub checks: &'static [(Check, &'static str)],
}

/// The declared fields of one payload kind.
#[derive(Debug)]
pub struct PayloadShape {
    pub fields: &'static [FieldRule],
}

const UNIQUE_VALUE_CHECKS: &[(Check, &str)] = &[
    (Check::NotEmpty, "uniqueValue should not be empty"),
    (Check::IsString, "uniqueValue must be a string"),
];

const TEST_VALUE_CHECKS: &[(Check, &str)] = &[
    (Check::NotEmpty, "testValue should not be empty"),
    (Check::IsString, "testValue must be a string"),
    (Check::NotBlank, "testValue should not be empty or contain only spaces"),
];

const OTHER_VALUE_CHECKS: &[(Check, &str)] = &[
    (Check::NotEmpty, "otherValue should not be empty"),
    (Check::IsNumber, "otherValue must be a number"),
];

pub const CREATE_SHAPE: PayloadShape = PayloadShape {
    fields: &[
        FieldRule {
            field: "uniqueValue",
            optional: false,
            checks: UNIQUE_VALUE_CHECKS,
        },
        FieldRule {
            field: "testValue",
            optional: false,
            checks: TEST_VALUE_CHECKS,
        },
        FieldRule {
            field: "otherValue",
            optional: false,
            checks: OTHER_VALUE_CHECKS,
        },
    ],
};

/// `uniqueValue` is deliberately absent: the key comes from the path and cannot be changed.
pub const UPDATE_SHAPE: PayloadShape = PayloadShape {
    fields: &[
        FieldRule {
            field: "testValue",
            optional: true,
            checks: TEST_VALUE_CHECKS,
        },
        FieldRule {
            field: "otherValue",
            optional: true,
            checks: OTHER_VALUE_CHECKS,
        },
    ],
};

impl PayloadShape {
    fn declares(&self, key: &str) -> bool {
        self.fields.iter().any(|f| f.field == key)
    }

    /// Collect every violation in `body`. Empty when the body is valid.
    pub fn violations(&self, body: &Map<String, Value>) -> Vec<String> {
        let mut messages = Vec::new();
        for key in body.keys() {
            if !self.declares(key) {
                messages.push(format!("property {} should not exist", key));
            }
        }
        for rule in self.fields {
            let value = body.get(rule.field);
            if value.is_none() && rule.optional {
                continue;
            }
            for (check, message) in rule.checks {
                if !check.passes(value) {
                    messages.push((*message).to_string());
                }
            }
        }
        messages
    }
}

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a create body. All fields are required.
    pub fn validate_create(body: Value) -> Result<CreateTeste, AppError> {
        Self::validate(body, &CREATE_SHAPE)
    }

    /// Validate a partial update body. Only fields present are checked.
    pub fn validate_update(body: Value) -> Result<UpdateTeste, AppError> {
        Self::validate(body, &UPDATE_SHAPE)
    }

    fn validate<T: DeserializeOwned>(body: Value, shape: &PayloadShape) -> Result<T, AppError> {
        let map = match body {
            Value::Object(m) => m,
            _ => return Err(AppError::BadRequest("body must be a JSON object".into())),
        };
        let messages = shape.violations(&map);
        if !messages.is_empty() {
            tracing::warn!(violations = ?messages, "payload rejected");
            return Err(AppError::Validation(messages));
        }
        serde_json::from_value(Value::Object(map)).map_err(|e| AppError::BadRequest(e.to_string()))
    }
}
