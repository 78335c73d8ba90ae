use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::json;
use sqlx::SqlitePool;
use uuid::Uuid;

use taskboard_backend::routes::tasks::task_models::TaskResponse;
use taskboard_backend::{db, routes};

async fn test_pool() -> SqlitePool {
    db::connect("sqlite::memory:")
        .await
        .expect("in-memory database")
}

macro_rules! test_app {
    ($pool:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($pool.clone()))
                .configure(routes::routes::tasks_configure)
                .configure(routes::routes::workers_configure),
        )
        .await
    };
}

macro_rules! post_task {
    ($app:expr, $id:expr, $description:expr, $priority:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/tasks")
            .set_json(json!({
                "id": $id,
                "description": $description,
                "priority": $priority,
                "workerIds": [],
            }))
            .to_request();
        test::call_service(&$app, req).await
    }};
}

macro_rules! post_worker {
    ($app:expr, $id:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/workers")
            .set_json(json!({
                "id": $id,
                "firstName": "FName",
                "lastName": "LName",
                "taskIds": [],
            }))
            .to_request();
        test::call_service(&$app, req).await
    }};
}

macro_rules! put_task {
    ($app:expr, $id:expr, $description:expr, $priority:expr, $worker_ids:expr) => {{
        let req = test::TestRequest::put()
            .uri(&format!("/api/tasks/{}", $id))
            .set_json(json!({
                "description": $description,
                "priority": $priority,
                "workerIds": $worker_ids,
            }))
            .to_request();
        test::call_service(&$app, req).await
    }};
}

macro_rules! get_task {
    ($app:expr, $id:expr) => {{
        let req = test::TestRequest::get()
            .uri(&format!("/api/tasks/{}", $id))
            .to_request();
        test::call_service(&$app, req).await
    }};
}

#[actix_web::test]
async fn post_task_returns_created_with_location() {
    let pool = test_pool().await;
    let app = test_app!(pool);
    let task_id = Uuid::new_v4().to_string();

    let resp = post_task!(app, task_id, "MyDesc", 1);

    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp
        .headers()
        .get("Location")
        .expect("Location header")
        .to_str()
        .unwrap();
    assert_eq!(location, format!("/api/tasks/{}", task_id));
}

#[actix_web::test]
async fn post_task_location_resolves_to_created_task() {
    let pool = test_pool().await;
    let app = test_app!(pool);
    let task_id = Uuid::new_v4().to_string();

    let resp = post_task!(app, task_id, "MyDesc", 1);
    let location = resp
        .headers()
        .get("Location")
        .expect("Location header")
        .to_str()
        .unwrap()
        .to_string();

    let req = test::TestRequest::get().uri(&location).to_request();
    let task: TaskResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(task.id, task_id);
    assert_eq!(task.description, "MyDesc");
    assert_eq!(task.priority, 1);
    assert!(task.worker_ids.is_empty());
}

#[actix_web::test]
async fn post_task_with_duplicate_id_returns_conflict() {
    let pool = test_pool().await;
    let app = test_app!(pool);
    let task_id = Uuid::new_v4().to_string();

    let first = post_task!(app, task_id, "MyDesc", 1);
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_task!(app, task_id, "OtherDesc", 2);
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn post_task_with_empty_description_is_rejected() {
    let pool = test_pool().await;
    let app = test_app!(pool);

    let resp = post_task!(app, Uuid::new_v4().to_string(), "", 1);

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn get_task_by_id_returns_task() {
    let pool = test_pool().await;
    let app = test_app!(pool);
    let task_id = Uuid::new_v4().to_string();

    post_task!(app, task_id, "MyDesc", 1);

    let resp = get_task!(app, task_id);
    assert_eq!(resp.status(), StatusCode::OK);

    let task: TaskResponse = test::read_body_json(resp).await;
    assert_eq!(task.id, task_id);
    assert_eq!(task.description, "MyDesc");
    assert_eq!(task.priority, 1);
    assert!(task.worker_ids.is_empty());
}

#[actix_web::test]
async fn get_task_by_unknown_id_returns_not_found() {
    let pool = test_pool().await;
    let app = test_app!(pool);

    post_task!(app, Uuid::new_v4().to_string(), "MyDesc", 1);

    let resp = get_task!(app, Uuid::new_v4().to_string());
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn get_all_tasks_on_empty_database_returns_empty_collection() {
    let pool = test_pool().await;
    let app = test_app!(pool);

    let req = test::TestRequest::get().uri("/api/tasks").to_request();
    let tasks: Vec<TaskResponse> = test::call_and_read_body_json(&app, req).await;

    assert!(tasks.is_empty());
}

#[actix_web::test]
async fn get_all_tasks_returns_every_live_task() {
    let pool = test_pool().await;
    let app = test_app!(pool);
    let first_id = Uuid::new_v4().to_string();
    let second_id = Uuid::new_v4().to_string();

    post_task!(app, first_id, "MyDesc1", 1);
    post_task!(app, second_id, "MyDesc2", 2);

    let req = test::TestRequest::get().uri("/api/tasks").to_request();
    let tasks: Vec<TaskResponse> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(tasks.len(), 2);
    let first = tasks.iter().find(|t| t.id == first_id).expect("first task");
    assert_eq!(first.description, "MyDesc1");
    assert_eq!(first.priority, 1);
    let second = tasks.iter().find(|t| t.id == second_id).expect("second task");
    assert_eq!(second.description, "MyDesc2");
    assert_eq!(second.priority, 2);
}

#[actix_web::test]
async fn put_task_updates_scalar_fields() {
    let pool = test_pool().await;
    let app = test_app!(pool);
    let task_id = Uuid::new_v4().to_string();

    post_task!(app, task_id, "MyDesc", 1);

    let resp = put_task!(app, task_id, "MyDesc2", 2, json!([]));
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let task: TaskResponse = test::read_body_json(get_task!(app, task_id)).await;
    assert_eq!(task.description, "MyDesc2");
    assert_eq!(task.priority, 2);
    assert!(task.worker_ids.is_empty());
}

#[actix_web::test]
async fn put_task_is_idempotent_on_scalar_fields() {
    let pool = test_pool().await;
    let app = test_app!(pool);
    let task_id = Uuid::new_v4().to_string();

    post_task!(app, task_id, "MyDesc", 1);

    let first = put_task!(app, task_id, "MyDesc2", 2, json!([]));
    assert_eq!(first.status(), StatusCode::NO_CONTENT);
    let second = put_task!(app, task_id, "MyDesc2", 2, json!([]));
    assert_eq!(second.status(), StatusCode::NO_CONTENT);

    let task: TaskResponse = test::read_body_json(get_task!(app, task_id)).await;
    assert_eq!(task.description, "MyDesc2");
    assert_eq!(task.priority, 2);
}

#[actix_web::test]
async fn put_task_by_unknown_id_returns_not_found() {
    let pool = test_pool().await;
    let app = test_app!(pool);

    post_task!(app, Uuid::new_v4().to_string(), "MyDesc", 1);

    let resp = put_task!(app, Uuid::new_v4().to_string(), "MyDesc2", 2, json!([]));
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn put_task_with_empty_description_is_rejected() {
    let pool = test_pool().await;
    let app = test_app!(pool);
    let task_id = Uuid::new_v4().to_string();

    post_task!(app, task_id, "MyDesc", 1);

    let resp = put_task!(app, task_id, "", 2, json!([]));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // The rejected update must not have touched the task
    let task: TaskResponse = test::read_body_json(get_task!(app, task_id)).await;
    assert_eq!(task.description, "MyDesc");
    assert_eq!(task.priority, 1);
}

#[actix_web::test]
async fn put_task_attaches_workers_by_id() {
    let pool = test_pool().await;
    let app = test_app!(pool);
    let task_id = Uuid::new_v4().to_string();
    let worker_id = Uuid::new_v4().to_string();

    post_task!(app, task_id, "MyDesc", 1);
    post_worker!(app, worker_id);

    let resp = put_task!(app, task_id, "MyDesc2", 2, json!([worker_id]));
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let task: TaskResponse = test::read_body_json(get_task!(app, task_id)).await;
    assert_eq!(task.worker_ids, vec![worker_id.clone()]);

    // Visible through the association listing as well
    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}/workers", task_id))
        .to_request();
    let ids: Vec<String> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids, vec![worker_id.clone()]);

    // And from the worker's side of the relation
    let req = test::TestRequest::get()
        .uri(&format!("/api/workers/{}/tasks", worker_id))
        .to_request();
    let ids: Vec<String> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids, vec![task_id]);
}

#[actix_web::test]
async fn put_task_skips_unresolvable_worker_ids() {
    let pool = test_pool().await;
    let app = test_app!(pool);
    let task_id = Uuid::new_v4().to_string();
    let worker_id = Uuid::new_v4().to_string();

    post_task!(app, task_id, "MyDesc", 1);
    post_worker!(app, worker_id);

    let unknown = Uuid::new_v4().to_string();
    let resp = put_task!(app, task_id, "MyDesc", 1, json!([worker_id, unknown]));
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let task: TaskResponse = test::read_body_json(get_task!(app, task_id)).await;
    assert_eq!(task.worker_ids, vec![worker_id]);
}

#[actix_web::test]
async fn put_task_associations_accumulate_and_deduplicate() {
    let pool = test_pool().await;
    let app = test_app!(pool);
    let task_id = Uuid::new_v4().to_string();
    let first_worker = Uuid::new_v4().to_string();
    let second_worker = Uuid::new_v4().to_string();

    post_task!(app, task_id, "MyDesc", 1);
    post_worker!(app, first_worker);
    post_worker!(app, second_worker);

    put_task!(app, task_id, "MyDesc", 1, json!([first_worker]));
    put_task!(app, task_id, "MyDesc", 1, json!([first_worker, second_worker]));
    put_task!(app, task_id, "MyDesc", 1, json!([first_worker, second_worker]));

    let task: TaskResponse = test::read_body_json(get_task!(app, task_id)).await;
    let mut actual = task.worker_ids;
    actual.sort();
    let mut expected = vec![first_worker, second_worker];
    expected.sort();
    assert_eq!(actual, expected);
}

#[actix_web::test]
async fn get_workers_of_unknown_task_returns_not_found() {
    let pool = test_pool().await;
    let app = test_app!(pool);

    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}/workers", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn delete_task_returns_no_content_and_hides_task() {
    let pool = test_pool().await;
    let app = test_app!(pool);
    let task_id = Uuid::new_v4().to_string();

    post_task!(app, task_id, "MyDesc", 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/tasks/{}", task_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // Gone from single get, list and repeated delete alike
    let resp = get_task!(app, task_id);
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/api/tasks").to_request();
    let tasks: Vec<TaskResponse> = test::call_and_read_body_json(&app, req).await;
    assert!(tasks.iter().all(|t| t.id != task_id));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/tasks/{}", task_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn delete_task_by_unknown_id_returns_not_found() {
    let pool = test_pool().await;
    let app = test_app!(pool);

    post_task!(app, Uuid::new_v4().to_string(), "MyDesc", 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/tasks/{}", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
