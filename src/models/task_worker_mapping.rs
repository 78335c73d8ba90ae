use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct TaskWorkerMapping {
    pub task_id: String,
    pub worker_id: String,
}
