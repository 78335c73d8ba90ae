use actix_web::{web, HttpResponse, Responder};
use log::{error, info};
use sqlx::SqlitePool;

use super::task_models::{CreateTaskRequest, TaskResponse, UpdateTaskRequest};
use crate::models::task::Task;
use crate::repository::{task_repository, RepoError};

// Builds the wire view for a task, association ids included
async fn to_response(pool: &SqlitePool, task: Task) -> Result<TaskResponse, RepoError> {
    let worker_ids = task_repository::worker_ids(pool, &task.task_id).await?;
    Ok(TaskResponse {
        id: task.task_id,
        description: task.description,
        priority: task.priority,
        worker_ids,
    })
}

pub async fn get_all_tasks(pool: web::Data<SqlitePool>) -> impl Responder {
    let tasks = match task_repository::list_all(pool.get_ref()).await {
        Ok(tasks) => tasks,
        Err(e) => {
            error!("Failed to fetch tasks: {}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut responses = Vec::with_capacity(tasks.len());
    for task in tasks {
        match to_response(pool.get_ref(), task).await {
            Ok(response) => responses.push(response),
            Err(e) => {
                error!("Failed to fetch workers for task list: {}", e);
                return HttpResponse::InternalServerError().finish();
            }
        }
    }

    HttpResponse::Ok().json(responses)
}

pub async fn get_task(pool: web::Data<SqlitePool>, path: web::Path<String>) -> impl Responder {
    let task_id = path.into_inner();

    let task = match task_repository::find_by_id(pool.get_ref(), &task_id).await {
        Ok(task) => task,
        Err(RepoError::NotFound) => {
            info!("Task not found: {}", task_id);
            return HttpResponse::NotFound().finish();
        }
        Err(e) => {
            error!("Failed to fetch task {}: {}", task_id, e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    match to_response(pool.get_ref(), task).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            error!("Failed to fetch workers for task {}: {}", task_id, e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub async fn get_task_workers(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> impl Responder {
    let task_id = path.into_inner();

    match task_repository::find_by_id(pool.get_ref(), &task_id).await {
        Ok(_) => {}
        Err(RepoError::NotFound) => {
            info!("Task not found: {}", task_id);
            return HttpResponse::NotFound().finish();
        }
        Err(e) => {
            error!("Failed to fetch task {}: {}", task_id, e);
            return HttpResponse::InternalServerError().finish();
        }
    }

    match task_repository::worker_ids(pool.get_ref(), &task_id).await {
        Ok(worker_ids) => HttpResponse::Ok().json(worker_ids),
        Err(e) => {
            error!("Failed to fetch workers for task {}: {}", task_id, e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub async fn create_task(
    pool: web::Data<SqlitePool>,
    request: web::Json<CreateTaskRequest>,
) -> impl Responder {
    let request = request.into_inner();
    info!("Received request to create task: {}", request.id);

    // Worker ids supplied in the create body are ignored; a task starts with
    // an empty association set and workers are attached via PUT
    let task = Task {
        task_id: request.id,
        description: request.description,
        priority: request.priority,
        soft_deleted: false,
    };

    match task_repository::insert(pool.get_ref(), &task).await {
        Ok(()) => {
            let location = format!("/api/tasks/{}", task.task_id);
            HttpResponse::Created()
                .insert_header(("Location", location))
                .json(TaskResponse {
                    id: task.task_id,
                    description: task.description,
                    priority: task.priority,
                    worker_ids: Vec::new(),
                })
        }
        Err(RepoError::Conflict) => {
            info!("Task id already in use: {}", task.task_id);
            HttpResponse::Conflict().finish()
        }
        Err(RepoError::Validation(message)) => {
            info!("Rejected task {}: {}", task.task_id, message);
            HttpResponse::BadRequest().body(message)
        }
        Err(e) => {
            error!("Failed to create task {}: {}", task.task_id, e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub async fn update_task(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
    request: web::Json<UpdateTaskRequest>,
) -> impl Responder {
    let task_id = path.into_inner();
    let request = request.into_inner();

    let mut task = match task_repository::find_by_id(pool.get_ref(), &task_id).await {
        Ok(task) => task,
        Err(RepoError::NotFound) => {
            info!("Task not found: {}", task_id);
            return HttpResponse::NotFound().finish();
        }
        Err(e) => {
            error!("Failed to fetch task {}: {}", task_id, e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    task.description = request.description;
    task.priority = request.priority;

    match task_repository::update(pool.get_ref(), &task).await {
        Ok(()) => {}
        Err(RepoError::Validation(message)) => {
            info!("Rejected update of task {}: {}", task_id, message);
            return HttpResponse::BadRequest().body(message);
        }
        Err(RepoError::NotFound) => {
            info!("Task not found: {}", task_id);
            return HttpResponse::NotFound().finish();
        }
        Err(e) => {
            error!("Failed to update task {}: {}", task_id, e);
            return HttpResponse::InternalServerError().finish();
        }
    }

    match task_repository::attach_workers(pool.get_ref(), &task_id, &request.worker_ids).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => {
            error!("Failed to attach workers to task {}: {}", task_id, e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub async fn delete_task(pool: web::Data<SqlitePool>, path: web::Path<String>) -> impl Responder {
    let task_id = path.into_inner();

    match task_repository::soft_delete(pool.get_ref(), &task_id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(RepoError::NotFound) => {
            info!("Task not found: {}", task_id);
            HttpResponse::NotFound().finish()
        }
        Err(e) => {
            error!("Failed to delete task {}: {}", task_id, e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
