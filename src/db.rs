use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

const CREATE_TASKS_TABLE: &str = "CREATE TABLE IF NOT EXISTS Tasks_ (
    task_id TEXT PRIMARY KEY,
    description TEXT NOT NULL,
    priority INTEGER NOT NULL,
    soft_deleted BOOLEAN NOT NULL DEFAULT 0
)";

const CREATE_WORKERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS Workers_ (
    worker_id TEXT PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    soft_deleted BOOLEAN NOT NULL DEFAULT 0
)";

const CREATE_TASK_WORKER_MAPPING_TABLE: &str = "CREATE TABLE IF NOT EXISTS TaskWorkerMapping_ (
    task_id TEXT NOT NULL REFERENCES Tasks_ (task_id),
    worker_id TEXT NOT NULL REFERENCES Workers_ (worker_id),
    PRIMARY KEY (task_id, worker_id)
)";

pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    // A :memory: database lives and dies with its connection, so the pool
    // must hold exactly one.
    let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    ensure_schema(&pool).await?;
    Ok(pool)
}

pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in [
        CREATE_TASKS_TABLE,
        CREATE_WORKERS_TABLE,
        CREATE_TASK_WORKER_MAPPING_TABLE,
    ] {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
