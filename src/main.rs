use actix_web::{web, App, HttpResponse, HttpServer};
use dotenv::dotenv;
use std::env;

use taskboard_backend::{db, routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://taskboard.db?mode=rwc".to_string());
    let pool = db::connect(&database_url)
        .await
        .expect("Failed to create pool");

    let server_address = "0.0.0.0:8080";
    println!("Server running at http://{}", server_address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .route(
                "/",
                web::get()
                    .to(|| async { HttpResponse::Ok().body("Hello, this is the Taskboard endpoint.") }),
            )
            .configure(routes::routes::tasks_configure)
            .configure(routes::routes::workers_configure)
    })
    .bind(server_address)?
    .run()
    .await
}
