use actix_web::web;

use super::tasks::task_handlers;

pub fn tasks_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/tasks")
            .route("", web::get().to(task_handlers::get_all_tasks))
            .route("", web::post().to(task_handlers::create_task))
            .route("/{id}/workers", web::get().to(task_handlers::get_task_workers))
            .route("/{id}", web::get().to(task_handlers::get_task))
            .route("/{id}", web::put().to(task_handlers::update_task))
            .route("/{id}", web::delete().to(task_handlers::delete_task)),
    );
}

use super::workers::worker_handlers;

pub fn workers_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/workers")
            .route("", web::get().to(worker_handlers::get_all_workers))
            .route("", web::post().to(worker_handlers::create_worker))
            .route("/{id}/tasks", web::get().to(worker_handlers::get_worker_tasks))
            .route("/{id}", web::get().to(worker_handlers::get_worker))
            .route("/{id}", web::put().to(worker_handlers::update_worker))
            .route("/{id}", web::delete().to(worker_handlers::delete_worker)),
    );
}
