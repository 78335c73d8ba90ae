use actix_web::{web, HttpResponse, Responder};
use log::{error, info};
use sqlx::SqlitePool;

use super::worker_models::{CreateWorkerRequest, UpdateWorkerRequest, WorkerResponse};
use crate::models::worker::Worker;
use crate::repository::{worker_repository, RepoError};

// Builds the wire view for a worker, association ids included
async fn to_response(pool: &SqlitePool, worker: Worker) -> Result<WorkerResponse, RepoError> {
    let task_ids = worker_repository::task_ids(pool, &worker.worker_id).await?;
    Ok(WorkerResponse {
        id: worker.worker_id,
        first_name: worker.first_name,
        last_name: worker.last_name,
        task_ids,
    })
}

pub async fn get_all_workers(pool: web::Data<SqlitePool>) -> impl Responder {
    let workers = match worker_repository::list_all(pool.get_ref()).await {
        Ok(workers) => workers,
        Err(e) => {
            error!("Failed to fetch workers: {}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut responses = Vec::with_capacity(workers.len());
    for worker in workers {
        match to_response(pool.get_ref(), worker).await {
            Ok(response) => responses.push(response),
            Err(e) => {
                error!("Failed to fetch tasks for worker list: {}", e);
                return HttpResponse::InternalServerError().finish();
            }
        }
    }

    HttpResponse::Ok().json(responses)
}

pub async fn get_worker(pool: web::Data<SqlitePool>, path: web::Path<String>) -> impl Responder {
    let worker_id = path.into_inner();

    let worker = match worker_repository::find_by_id(pool.get_ref(), &worker_id).await {
        Ok(worker) => worker,
        Err(RepoError::NotFound) => {
            info!("Worker not found: {}", worker_id);
            return HttpResponse::NotFound().finish();
        }
        Err(e) => {
            error!("Failed to fetch worker {}: {}", worker_id, e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    match to_response(pool.get_ref(), worker).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            error!("Failed to fetch tasks for worker {}: {}", worker_id, e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub async fn get_worker_tasks(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> impl Responder {
    let worker_id = path.into_inner();

    match worker_repository::find_by_id(pool.get_ref(), &worker_id).await {
        Ok(_) => {}
        Err(RepoError::NotFound) => {
            info!("Worker not found: {}", worker_id);
            return HttpResponse::NotFound().finish();
        }
        Err(e) => {
            error!("Failed to fetch worker {}: {}", worker_id, e);
            return HttpResponse::InternalServerError().finish();
        }
    }

    match worker_repository::task_ids(pool.get_ref(), &worker_id).await {
        Ok(task_ids) => HttpResponse::Ok().json(task_ids),
        Err(e) => {
            error!("Failed to fetch tasks for worker {}: {}", worker_id, e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub async fn create_worker(
    pool: web::Data<SqlitePool>,
    request: web::Json<CreateWorkerRequest>,
) -> impl Responder {
    let request = request.into_inner();
    info!("Received request to create worker: {}", request.id);

    // Task ids supplied in the create body are ignored; a worker starts with
    // an empty association set and tasks are attached via PUT
    let worker = Worker {
        worker_id: request.id,
        first_name: request.first_name,
        last_name: request.last_name,
        soft_deleted: false,
    };

    match worker_repository::insert(pool.get_ref(), &worker).await {
        Ok(()) => {
            let location = format!("/api/workers/{}", worker.worker_id);
            HttpResponse::Created()
                .insert_header(("Location", location))
                .json(WorkerResponse {
                    id: worker.worker_id,
                    first_name: worker.first_name,
                    last_name: worker.last_name,
                    task_ids: Vec::new(),
                })
        }
        Err(RepoError::Conflict) => {
            info!("Worker id already in use: {}", worker.worker_id);
            HttpResponse::Conflict().finish()
        }
        Err(RepoError::Validation(message)) => {
            info!("Rejected worker {}: {}", worker.worker_id, message);
            HttpResponse::BadRequest().body(message)
        }
        Err(e) => {
            error!("Failed to create worker {}: {}", worker.worker_id, e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub async fn update_worker(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
    request: web::Json<UpdateWorkerRequest>,
) -> impl Responder {
    let worker_id = path.into_inner();
    let request = request.into_inner();

    let mut worker = match worker_repository::find_by_id(pool.get_ref(), &worker_id).await {
        Ok(worker) => worker,
        Err(RepoError::NotFound) => {
            info!("Worker not found: {}", worker_id);
            return HttpResponse::NotFound().finish();
        }
        Err(e) => {
            error!("Failed to fetch worker {}: {}", worker_id, e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    worker.first_name = request.first_name;
    worker.last_name = request.last_name;

    match worker_repository::update(pool.get_ref(), &worker).await {
        Ok(()) => {}
        Err(RepoError::Validation(message)) => {
            info!("Rejected update of worker {}: {}", worker_id, message);
            return HttpResponse::BadRequest().body(message);
        }
        Err(RepoError::NotFound) => {
            info!("Worker not found: {}", worker_id);
            return HttpResponse::NotFound().finish();
        }
        Err(e) => {
            error!("Failed to update worker {}: {}", worker_id, e);
            return HttpResponse::InternalServerError().finish();
        }
    }

    match worker_repository::attach_tasks(pool.get_ref(), &worker_id, &request.task_ids).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => {
            error!("Failed to attach tasks to worker {}: {}", worker_id, e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub async fn delete_worker(pool: web::Data<SqlitePool>, path: web::Path<String>) -> impl Responder {
    let worker_id = path.into_inner();

    match worker_repository::soft_delete(pool.get_ref(), &worker_id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(RepoError::NotFound) => {
            info!("Worker not found: {}", worker_id);
            HttpResponse::NotFound().finish()
        }
        Err(e) => {
            error!("Failed to delete worker {}: {}", worker_id, e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
