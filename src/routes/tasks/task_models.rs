use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: String,
    pub description: String,
    pub priority: i32,
    pub worker_ids: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub id: String,
    pub description: String,
    pub priority: i32,
    #[serde(default)]
    pub worker_ids: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub description: String,
    pub priority: i32,
    #[serde(default)]
    pub worker_ids: Vec<String>,
}
