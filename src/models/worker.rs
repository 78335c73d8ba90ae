use serde::Serialize;

#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct Worker {
    pub worker_id: String,
    pub first_name: String,
    pub last_name: String,
    pub soft_deleted: bool,
}
