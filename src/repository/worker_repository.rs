use sqlx::SqlitePool;

use super::RepoError;
use crate::models::task_worker_mapping::TaskWorkerMapping;
use crate::models::worker::Worker;

fn validate(worker: &Worker) -> Result<(), RepoError> {
    if worker.first_name.chars().count() < 2 {
        return Err(RepoError::Validation(
            "first name must be at least 2 characters".to_string(),
        ));
    }
    if worker.last_name.chars().count() < 2 {
        return Err(RepoError::Validation(
            "last name must be at least 2 characters".to_string(),
        ));
    }
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, worker_id: &str) -> Result<Worker, RepoError> {
    sqlx::query_as::<_, Worker>(
        "SELECT worker_id, first_name, last_name, soft_deleted
         FROM Workers_
         WHERE worker_id = ? AND soft_deleted = 0",
    )
    .bind(worker_id)
    .fetch_optional(pool)
    .await?
    .ok_or(RepoError::NotFound)
}

pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Worker>, RepoError> {
    let workers = sqlx::query_as::<_, Worker>(
        "SELECT worker_id, first_name, last_name, soft_deleted
         FROM Workers_
         WHERE soft_deleted = 0",
    )
    .fetch_all(pool)
    .await?;
    Ok(workers)
}

pub async fn insert(pool: &SqlitePool, worker: &Worker) -> Result<(), RepoError> {
    validate(worker)?;

    // Check the id against live workers only
    let existing =
        sqlx::query("SELECT worker_id FROM Workers_ WHERE worker_id = ? AND soft_deleted = 0")
            .bind(&worker.worker_id)
            .fetch_optional(pool)
            .await?;
    if existing.is_some() {
        return Err(RepoError::Conflict);
    }

    sqlx::query(
        "INSERT INTO Workers_ (worker_id, first_name, last_name, soft_deleted) VALUES (?, ?, ?, ?)",
    )
    .bind(&worker.worker_id)
    .bind(&worker.first_name)
    .bind(&worker.last_name)
    .bind(worker.soft_deleted)
    .execute(pool)
    .await
    .map_err(|e| match e {
        // A soft-deleted row still occupies the primary key
        sqlx::Error::Database(db) if db.is_unique_violation() => RepoError::Conflict,
        e => RepoError::Database(e),
    })?;

    Ok(())
}

pub async fn update(pool: &SqlitePool, worker: &Worker) -> Result<(), RepoError> {
    validate(worker)?;

    let result = sqlx::query(
        "UPDATE Workers_ SET first_name = ?, last_name = ? WHERE worker_id = ? AND soft_deleted = 0",
    )
    .bind(&worker.first_name)
    .bind(&worker.last_name)
    .bind(&worker.worker_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound);
    }
    Ok(())
}

pub async fn soft_delete(pool: &SqlitePool, worker_id: &str) -> Result<(), RepoError> {
    let result =
        sqlx::query("UPDATE Workers_ SET soft_deleted = 1 WHERE worker_id = ? AND soft_deleted = 0")
            .bind(worker_id)
            .execute(pool)
            .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound);
    }
    Ok(())
}

// Ids of the live tasks the worker is assigned to
pub async fn task_ids(pool: &SqlitePool, worker_id: &str) -> Result<Vec<String>, RepoError> {
    let mappings = sqlx::query_as::<_, TaskWorkerMapping>(
        "SELECT m.task_id, m.worker_id
         FROM TaskWorkerMapping_ m
         JOIN Tasks_ t ON t.task_id = m.task_id
         WHERE m.worker_id = ? AND t.soft_deleted = 0",
    )
    .bind(worker_id)
    .fetch_all(pool)
    .await?;

    Ok(mappings.into_iter().map(|m| m.task_id).collect())
}

// Adds each referenced task to the worker's association set. Ids that do not
// resolve to a live task are skipped; re-adding an assigned task is a no-op.
pub async fn attach_tasks(
    pool: &SqlitePool,
    worker_id: &str,
    task_ids: &[String],
) -> Result<(), RepoError> {
    if task_ids.is_empty() {
        return Ok(());
    }

    let placeholders = task_ids.iter().map(|_| "?").collect::<Vec<_>>().join(",");
    let query_str = format!(
        "SELECT task_id FROM Tasks_ WHERE soft_deleted = 0 AND task_id IN ({})",
        placeholders
    );

    let mut query = sqlx::query_scalar::<_, String>(&query_str);
    for task_id in task_ids {
        query = query.bind(task_id);
    }
    let live_ids = query.fetch_all(pool).await?;

    for task_id in live_ids {
        sqlx::query("INSERT OR IGNORE INTO TaskWorkerMapping_ (task_id, worker_id) VALUES (?, ?)")
            .bind(&task_id)
            .bind(worker_id)
            .execute(pool)
            .await?;
    }
    Ok(())
}
