use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::Value;

use crate::adapters::task_store::TaskStore;
use crate::runtime::contract::{
    TaskChangeSet, TaskRecord, CREATED_AT_FIELD, DATA_FIELD, DESCRICAO_FIELD, TASK_ID_FIELD,
    TITULO_FIELD,
};

/// `data` is a reserved word in DynamoDB expressions; every expression that
/// references the field goes through this placeholder.
const DATA_FIELD_ALIAS: &str = "#data";

const DATE_FILTER_EXPRESSION: &str = "#data = :date";

/// Task persistence backed by a single DynamoDB table keyed by `task_id`.
pub struct DynamoDbTaskStore {
    table_name: String,
    dynamodb_client: aws_sdk_dynamodb::Client,
}

impl DynamoDbTaskStore {
    pub fn new(dynamodb_client: aws_sdk_dynamodb::Client, table_name: String) -> Self {
        Self {
            table_name,
            dynamodb_client,
        }
    }
}

impl TaskStore for DynamoDbTaskStore {
    fn put_task(&self, record: &TaskRecord) -> Result<(), String> {
        let table_name = self.table_name.clone();
        let item = record_to_item(record);
        let client = self.dynamodb_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_item()
                    .table_name(table_name)
                    .set_item(Some(item))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to put task item: {error}"))
            })
        })
    }

    fn get_task(&self, task_id: &str) -> Result<Option<TaskRecord>, String> {
        let table_name = self.table_name.clone();
        let key = task_id.to_string();
        let client = self.dynamodb_client.clone();

        let output = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .get_item()
                    .table_name(table_name)
                    .key(TASK_ID_FIELD, AttributeValue::S(key))
                    .send()
                    .await
                    .map_err(|error| format!("failed to get task item: {error}"))
            })
        })?;

        match output.item {
            Some(item) => item_to_record(&item).map(Some),
            None => Ok(None),
        }
    }

    fn scan_tasks(&self, date_filter: Option<&str>) -> Result<Vec<TaskRecord>, String> {
        let table_name = self.table_name.clone();
        let date_filter = date_filter.map(str::to_string);
        let client = self.dynamodb_client.clone();

        let output = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let mut scan = client.scan().table_name(table_name);
                if let Some(date) = date_filter {
                    scan = scan
                        .filter_expression(DATE_FILTER_EXPRESSION)
                        .expression_attribute_names(DATA_FIELD_ALIAS, DATA_FIELD)
                        .expression_attribute_values(":date", AttributeValue::S(date));
                }
                scan.send()
                    .await
                    .map_err(|error| format!("failed to scan task items: {error}"))
            })
        })?;

        output
            .items
            .unwrap_or_default()
            .iter()
            .map(item_to_record)
            .collect()
    }

    fn apply_changes(&self, task_id: &str, changes: &TaskChangeSet) -> Result<(), String> {
        let update = build_update_expression(changes)?;
        let table_name = self.table_name.clone();
        let key = task_id.to_string();
        let client = self.dynamodb_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .update_item()
                    .table_name(table_name)
                    .key(TASK_ID_FIELD, AttributeValue::S(key))
                    .update_expression(update.expression)
                    .set_expression_attribute_names(update.attribute_names)
                    .set_expression_attribute_values(Some(update.attribute_values))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to update task item: {error}"))
            })
        })
    }

    fn delete_task(&self, task_id: &str) -> Result<(), String> {
        let table_name = self.table_name.clone();
        let key = task_id.to_string();
        let client = self.dynamodb_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .delete_item()
                    .table_name(table_name)
                    .key(TASK_ID_FIELD, AttributeValue::S(key))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to delete task item: {error}"))
            })
        })
    }
}

/// A rendered `SET` update expression with its placeholder maps.
///
/// `attribute_names` is `None` unless some assignment targets a reserved-word
/// field: DynamoDB rejects an empty `ExpressionAttributeNames` map.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    pub expression: String,
    pub attribute_names: Option<HashMap<String, String>>,
    pub attribute_values: HashMap<String, AttributeValue>,
}

/// Translates an accumulated change set into a `SET` expression, one
/// assignment clause per present field, joined with `", "`.
pub fn build_update_expression(changes: &TaskChangeSet) -> Result<UpdateExpression, String> {
    let assignments = changes.assignments();
    if assignments.is_empty() {
        return Err("change set holds no fields to update".to_string());
    }

    let mut clauses = Vec::with_capacity(assignments.len());
    let mut attribute_names = HashMap::new();
    let mut attribute_values = HashMap::new();
    for (index, (field, value)) in assignments.into_iter().enumerate() {
        let target = if field == DATA_FIELD {
            attribute_names.insert(DATA_FIELD_ALIAS.to_string(), DATA_FIELD.to_string());
            DATA_FIELD_ALIAS
        } else {
            field
        };
        let placeholder = format!(":value{index}");
        clauses.push(format!("{target} = {placeholder}"));
        attribute_values.insert(placeholder, json_to_attribute(value));
    }

    Ok(UpdateExpression {
        expression: format!("SET {}", clauses.join(", ")),
        attribute_names: (!attribute_names.is_empty()).then_some(attribute_names),
        attribute_values,
    })
}

pub fn record_to_item(record: &TaskRecord) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::from([
        (
            TASK_ID_FIELD.to_string(),
            AttributeValue::S(record.task_id.clone()),
        ),
        (TITULO_FIELD.to_string(), json_to_attribute(&record.titulo)),
        (
            DESCRICAO_FIELD.to_string(),
            json_to_attribute(&record.descricao),
        ),
        (DATA_FIELD.to_string(), json_to_attribute(&record.data)),
    ]);
    if let Some(created_at) = &record.created_at {
        item.insert(
            CREATED_AT_FIELD.to_string(),
            AttributeValue::S(created_at.clone()),
        );
    }
    item
}

pub fn item_to_record(item: &HashMap<String, AttributeValue>) -> Result<TaskRecord, String> {
    let task_id = match item.get(TASK_ID_FIELD) {
        Some(AttributeValue::S(text)) => text.clone(),
        _ => return Err("task item is missing a string task_id attribute".to_string()),
    };
    let created_at = match item.get(CREATED_AT_FIELD) {
        Some(AttributeValue::S(text)) => Some(text.clone()),
        _ => None,
    };

    Ok(TaskRecord {
        task_id,
        titulo: attribute_to_json(item.get(TITULO_FIELD)),
        descricao: attribute_to_json(item.get(DESCRICAO_FIELD)),
        data: attribute_to_json(item.get(DATA_FIELD)),
        created_at,
    })
}

pub fn json_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(flag) => AttributeValue::Bool(*flag),
        Value::Number(number) => AttributeValue::N(number.to_string()),
        Value::String(text) => AttributeValue::S(text.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(json_to_attribute).collect()),
        Value::Object(entries) => AttributeValue::M(
            entries
                .iter()
                .map(|(key, entry)| (key.clone(), json_to_attribute(entry)))
                .collect(),
        ),
    }
}

/// Renders a stored attribute back to JSON. Numbers parse through `f64` so
/// arbitrary-precision values come out as plain floats; attribute kinds the
/// task schema never writes (binary, sets) render as null.
pub fn attribute_to_json(attribute: Option<&AttributeValue>) -> Value {
    let Some(attribute) = attribute else {
        return Value::Null;
    };

    match attribute {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(flag) => Value::Bool(*flag),
        AttributeValue::N(text) => text
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        AttributeValue::S(text) => Value::String(text.clone()),
        AttributeValue::L(items) => Value::Array(
            items
                .iter()
                .map(|item| attribute_to_json(Some(item)))
                .collect(),
        ),
        AttributeValue::M(entries) => Value::Object(
            entries
                .iter()
                .map(|(key, entry)| (key.clone(), attribute_to_json(Some(entry))))
                .collect(),
        ),
        _ => Value::Null,
    }
}
