use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use task_api_lambda::adapters::dynamodb::DynamoDbTaskStore;
use task_api_lambda::handlers::tasks::{handle_task_event, ApiGatewayResponse};

async fn handle_request(
    event: LambdaEvent<Value>,
    store: &DynamoDbTaskStore,
) -> Result<ApiGatewayResponse, Error> {
    Ok(handle_task_event(event.payload, store))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let dynamodb_client = aws_sdk_dynamodb::Client::new(&config);
    let table_name = std::env::var("TASKS_TABLE").unwrap_or_else(|_| "Tasks".to_string());

    // One store for the process lifetime, shared across invocations.
    let store = DynamoDbTaskStore::new(dynamodb_client, table_name);

    lambda_runtime::run(service_fn(|event| handle_request(event, &store))).await
}
