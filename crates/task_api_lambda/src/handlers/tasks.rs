use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use task_api_core::contract::{parse_request_body, RequestEvent, TaskChangeSet, TaskRecord};
use task_api_core::routes::TaskRoute;
use uuid::Uuid;

use crate::adapters::task_store::TaskStore;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

/// Dispatches one API Gateway event to its task operation.
///
/// This function is total: every failure path is rendered as a status-coded
/// response, so the lambda never errors out of an invocation.
pub fn handle_task_event(event: Value, store: &dyn TaskStore) -> ApiGatewayResponse {
    let request = match serde_json::from_value::<RequestEvent>(event) {
        Ok(value) => value,
        Err(error) => {
            log_router_error("malformed_event", json!({ "error": error.to_string() }));
            return failure_response(&format!("malformed request event: {error}"));
        }
    };

    log_router_info(
        "request_received",
        json!({
            "route_key": request.route_key.clone(),
            "method": request.request_context.http.method.clone(),
        }),
    );

    let Some(route) = request
        .route_key
        .as_deref()
        .and_then(TaskRoute::from_route_key)
    else {
        return message_response(400, "Rota nao suportada");
    };

    let result = match route {
        TaskRoute::CreateTask => create_task(&request, store),
        TaskRoute::ListTasks => list_tasks(&request, store),
        TaskRoute::GetTask => get_task(&request, store),
        TaskRoute::UpdateTask => update_task(&request, store),
        TaskRoute::DeleteTask => delete_task(&request, store),
    };

    match result {
        Ok(response) => response,
        Err(message) => {
            log_router_error(
                "request_failed",
                json!({
                    "route_key": route.route_key(),
                    "error": message.clone(),
                }),
            );
            failure_response(&message)
        }
    }
}

fn create_task(request: &RequestEvent, store: &dyn TaskStore) -> Result<ApiGatewayResponse, String> {
    let body = parse_request_body(request.body.as_deref());
    let task_id = Uuid::new_v4().to_string();
    let created_at = chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string();
    let record = TaskRecord::from_create_body(task_id.clone(), created_at, &body);

    store.put_task(&record)?;
    Ok(success_response(
        201,
        json!({ "message": "Tarefa criada", "id": task_id }),
    ))
}

fn list_tasks(request: &RequestEvent, store: &dyn TaskStore) -> Result<ApiGatewayResponse, String> {
    let date_filter = request
        .query_parameter("date")
        .filter(|value| !value.is_empty());
    let records = store.scan_tasks(date_filter)?;
    Ok(success_response(200, records))
}

fn get_task(request: &RequestEvent, store: &dyn TaskStore) -> Result<ApiGatewayResponse, String> {
    let task_id = path_task_id(request)?;
    match store.get_task(task_id)? {
        Some(record) => Ok(success_response(200, record)),
        None => Ok(message_response(404, "Tarefa nao encontrada")),
    }
}

fn update_task(request: &RequestEvent, store: &dyn TaskStore) -> Result<ApiGatewayResponse, String> {
    let task_id = path_task_id(request)?;
    let body = parse_request_body(request.body.as_deref());
    let changes = TaskChangeSet::from_body(&body);
    if changes.is_empty() {
        return Ok(message_response(400, "Nenhum campo para atualizar"));
    }

    store.apply_changes(task_id, &changes)?;
    Ok(message_response(200, "Tarefa atualizada"))
}

fn delete_task(request: &RequestEvent, store: &dyn TaskStore) -> Result<ApiGatewayResponse, String> {
    let task_id = path_task_id(request)?;
    store.delete_task(task_id)?;
    Ok(message_response(200, "Tarefa deletada"))
}

fn path_task_id(request: &RequestEvent) -> Result<&str, String> {
    request
        .path_parameter("id")
        .ok_or_else(|| "missing path parameter: id".to_string())
}

fn message_response(status_code: u16, message: &str) -> ApiGatewayResponse {
    success_response(status_code, json!({ "message": message }))
}

fn success_response(status_code: u16, payload: impl Serialize) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: json!({"Content-Type": "application/json"}),
        body: serde_json::to_string(&payload).expect("response payload should serialize"),
    }
}

fn failure_response(message: &str) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code: 500,
        headers: json!({"Content-Type": "application/json"}),
        body: json!({ "error": message }).to_string(),
    }
}

fn log_router_info(event: &str, details: Value) {
    eprintln!(
        "{}",
        json!({
            "component": "task_router",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

fn log_router_error(event: &str, details: Value) {
    eprintln!(
        "{}",
        json!({
            "component": "task_router",
            "level": "error",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}
