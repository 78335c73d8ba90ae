use sqlx::SqlitePool;

use super::RepoError;
use crate::models::task::Task;
use crate::models::task_worker_mapping::TaskWorkerMapping;

fn validate(task: &Task) -> Result<(), RepoError> {
    if task.description.is_empty() {
        return Err(RepoError::Validation(
            "description must not be empty".to_string(),
        ));
    }
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, task_id: &str) -> Result<Task, RepoError> {
    sqlx::query_as::<_, Task>(
        "SELECT task_id, description, priority, soft_deleted
         FROM Tasks_
         WHERE task_id = ? AND soft_deleted = 0",
    )
    .bind(task_id)
    .fetch_optional(pool)
    .await?
    .ok_or(RepoError::NotFound)
}

pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Task>, RepoError> {
    let tasks = sqlx::query_as::<_, Task>(
        "SELECT task_id, description, priority, soft_deleted
         FROM Tasks_
         WHERE soft_deleted = 0",
    )
    .fetch_all(pool)
    .await?;
    Ok(tasks)
}

pub async fn insert(pool: &SqlitePool, task: &Task) -> Result<(), RepoError> {
    validate(task)?;

    // Check the id against live tasks only
    let existing = sqlx::query("SELECT task_id FROM Tasks_ WHERE task_id = ? AND soft_deleted = 0")
        .bind(&task.task_id)
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        return Err(RepoError::Conflict);
    }

    sqlx::query(
        "INSERT INTO Tasks_ (task_id, description, priority, soft_deleted) VALUES (?, ?, ?, ?)",
    )
    .bind(&task.task_id)
    .bind(&task.description)
    .bind(task.priority)
    .bind(task.soft_deleted)
    .execute(pool)
    .await
    .map_err(|e| match e {
        // A soft-deleted row still occupies the primary key
        sqlx::Error::Database(db) if db.is_unique_violation() => RepoError::Conflict,
        e => RepoError::Database(e),
    })?;

    Ok(())
}

pub async fn update(pool: &SqlitePool, task: &Task) -> Result<(), RepoError> {
    validate(task)?;

    let result = sqlx::query(
        "UPDATE Tasks_ SET description = ?, priority = ? WHERE task_id = ? AND soft_deleted = 0",
    )
    .bind(&task.description)
    .bind(task.priority)
    .bind(&task.task_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound);
    }
    Ok(())
}

pub async fn soft_delete(pool: &SqlitePool, task_id: &str) -> Result<(), RepoError> {
    let result =
        sqlx::query("UPDATE Tasks_ SET soft_deleted = 1 WHERE task_id = ? AND soft_deleted = 0")
            .bind(task_id)
            .execute(pool)
            .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound);
    }
    Ok(())
}

// Ids of the live workers assigned to the task
pub async fn worker_ids(pool: &SqlitePool, task_id: &str) -> Result<Vec<String>, RepoError> {
    let mappings = sqlx::query_as::<_, TaskWorkerMapping>(
        "SELECT m.task_id, m.worker_id
         FROM TaskWorkerMapping_ m
         JOIN Workers_ w ON w.worker_id = m.worker_id
         WHERE m.task_id = ? AND w.soft_deleted = 0",
    )
    .bind(task_id)
    .fetch_all(pool)
    .await?;

    Ok(mappings.into_iter().map(|m| m.worker_id).collect())
}

// Adds each referenced worker to the task's association set. Ids that do not
// resolve to a live worker are skipped; re-adding an assigned worker is a no-op.
pub async fn attach_workers(
    pool: &SqlitePool,
    task_id: &str,
    worker_ids: &[String],
) -> Result<(), RepoError> {
    if worker_ids.is_empty() {
        return Ok(());
    }

    let placeholders = worker_ids.iter().map(|_| "?").collect::<Vec<_>>().join(",");
    let query_str = format!(
        "SELECT worker_id FROM Workers_ WHERE soft_deleted = 0 AND worker_id IN ({})",
        placeholders
    );

    let mut query = sqlx::query_scalar::<_, String>(&query_str);
    for worker_id in worker_ids {
        query = query.bind(worker_id);
    }
    let live_ids = query.fetch_all(pool).await?;

    for worker_id in live_ids {
        sqlx::query("INSERT OR IGNORE INTO TaskWorkerMapping_ (task_id, worker_id) VALUES (?, ?)")
            .bind(task_id)
            .bind(&worker_id)
            .execute(pool)
            .await?;
    }
    Ok(())
}
