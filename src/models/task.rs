use serde::Serialize;

#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct Task {
    pub task_id: String,
    pub description: String,
    // 0 = low, 1 = medium, 2 = high
    pub priority: i32,
    pub soft_deleted: bool,
}
