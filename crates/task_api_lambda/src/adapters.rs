pub mod dynamodb;
pub mod task_store;
