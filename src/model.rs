//! The persisted `testes` record and its payload shapes.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use utoipa::ToSchema;
use uuid::Uuid;

/// A stored record. `unique_value` is the external key and never changes after creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Teste {
    /// Assigned by the store on insert.
    pub id: Uuid,
    pub unique_value: String,
    pub test_value: String,
    #[schema(value_type = f64)]
    pub other_value: Number,
}

/// Body of `POST /testes`, after validation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeste {
    pub unique_value: String,
    pub test_value: String,
    #[schema(value_type = f64)]
    pub other_value: Number,
}

/// Body of `PATCH /testes/{uniqueValue}`, after validation. Absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeste {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub other_value: Option<Number>,
}

impl UpdateTeste {
    /// Apply present fields to `record`.
    pub fn apply_to(&self, record: &mut Teste) {
        if let Some(v) = &self.test_value {
            record.test_value = v.clone();
        }
        if let Some(v) = &self.other_value {
            record.other_value = v.clone();
        }
    }
}

impl Teste {
    pub fn new(id: Uuid, payload: CreateTeste) -> Self {
        Teste {
            id,
            unique_value: payload.unique_value,
            test_value: payload.test_value,
            other_value: payload.other_value,
        }
    }
}
