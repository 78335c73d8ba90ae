use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub task_ids: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkerRequest {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub task_ids: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkerRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub task_ids: Vec<String>,
}
