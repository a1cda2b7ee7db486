/// The five operations the router recognizes, selected by exact route-key
/// match. The route key already carries the HTTP method, so classification
/// never consults the method separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskRoute {
    CreateTask,
    ListTasks,
    GetTask,
    UpdateTask,
    DeleteTask,
}

impl TaskRoute {
    pub fn from_route_key(route_key: &str) -> Option<Self> {
        match route_key {
            "POST /tasks" => Some(Self::CreateTask),
            "GET /tasks" => Some(Self::ListTasks),
            "GET /tasks/{id}" => Some(Self::GetTask),
            "PUT /tasks/{id}" => Some(Self::UpdateTask),
            "DELETE /tasks/{id}" => Some(Self::DeleteTask),
            _ => None,
        }
    }

    pub fn route_key(self) -> &'static str {
        match self {
            Self::CreateTask => "POST /tasks",
            Self::ListTasks => "GET /tasks",
            Self::GetTask => "GET /tasks/{id}",
            Self::UpdateTask => "PUT /tasks/{id}",
            Self::DeleteTask => "DELETE /tasks/{id}",
        }
    }
}
