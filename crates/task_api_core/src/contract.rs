use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const TASK_ID_FIELD: &str = "task_id";
pub const TITULO_FIELD: &str = "titulo";
pub const DESCRICAO_FIELD: &str = "descricao";
pub const DATA_FIELD: &str = "data";
pub const CREATED_AT_FIELD: &str = "created_at";

/// Request descriptor produced by the HTTP front door (API Gateway v2 shape).
///
/// Every section is optional: absent or null maps deserialize to empty so a
/// sparse event still classifies instead of failing the whole invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RequestEvent {
    pub route_key: Option<String>,
    #[serde(default)]
    pub request_context: RequestContext,
    pub path_parameters: Option<BTreeMap<String, String>>,
    pub query_string_parameters: Option<BTreeMap<String, String>>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RequestContext {
    #[serde(default)]
    pub http: HttpContext,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HttpContext {
    #[serde(default)]
    pub method: String,
}

impl RequestEvent {
    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|parameters| parameters.get(name))
            .map(String::as_str)
    }

    pub fn query_parameter(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|parameters| parameters.get(name))
            .map(String::as_str)
    }
}

/// The persisted task entity.
///
/// `titulo`/`descricao`/`data` accept any JSON value (no type enforcement);
/// a field the caller never supplied holds `Null`. `created_at` is absent
/// only on records that were upserted through a partial update without ever
/// being created, and is omitted from JSON output in that case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskRecord {
    pub task_id: String,
    #[serde(default)]
    pub titulo: Value,
    #[serde(default)]
    pub descricao: Value,
    #[serde(default)]
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl TaskRecord {
    /// Builds the record persisted by the create operation: id and timestamp
    /// from the router, free-form fields copied from the body (missing keys
    /// map to null).
    pub fn from_create_body(task_id: String, created_at: String, body: &Value) -> Self {
        Self {
            task_id,
            titulo: field_or_null(body, TITULO_FIELD),
            descricao: field_or_null(body, DESCRICAO_FIELD),
            data: field_or_null(body, DATA_FIELD),
            created_at: Some(created_at),
        }
    }
}

fn field_or_null(body: &Value, field: &str) -> Value {
    body.get(field).cloned().unwrap_or(Value::Null)
}

/// Accumulated partial update for the mutable task fields.
///
/// `Some(Value::Null)` means the key was present with a null value and the
/// field must be overwritten; `None` means the key was absent and the field
/// is left untouched. No serde derive: serialization would collapse the two.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskChangeSet {
    pub titulo: Option<Value>,
    pub descricao: Option<Value>,
    pub data: Option<Value>,
}

impl TaskChangeSet {
    pub fn from_body(body: &Value) -> Self {
        Self {
            titulo: body.get(TITULO_FIELD).cloned(),
            descricao: body.get(DESCRICAO_FIELD).cloned(),
            data: body.get(DATA_FIELD).cloned(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.titulo.is_none() && self.descricao.is_none() && self.data.is_none()
    }

    /// Field-to-value assignments in declaration order, one entry per key
    /// present in the update request.
    pub fn assignments(&self) -> Vec<(&'static str, &Value)> {
        let mut assignments = Vec::new();
        if let Some(value) = &self.titulo {
            assignments.push((TITULO_FIELD, value));
        }
        if let Some(value) = &self.descricao {
            assignments.push((DESCRICAO_FIELD, value));
        }
        if let Some(value) = &self.data {
            assignments.push((DATA_FIELD, value));
        }
        assignments
    }
}

/// Parses a raw request body, substituting an empty object when the body is
/// absent or not valid JSON. Parse failures are never surfaced to the caller.
pub fn parse_request_body(body: Option<&str>) -> Value {
    let Some(text) = body else {
        return json!({});
    };

    serde_json::from_str(text).unwrap_or_else(|_| json!({}))
}
