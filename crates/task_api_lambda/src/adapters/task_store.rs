use task_api_core::contract::{TaskChangeSet, TaskRecord};

pub trait TaskStore {
    fn put_task(&self, record: &TaskRecord) -> Result<(), String>;
    fn get_task(&self, task_id: &str) -> Result<Option<TaskRecord>, String>;
    fn scan_tasks(&self, date_filter: Option<&str>) -> Result<Vec<TaskRecord>, String>;
    fn apply_changes(&self, task_id: &str, changes: &TaskChangeSet) -> Result<(), String>;
    fn delete_task(&self, task_id: &str) -> Result<(), String>;
}
