pub mod db;
pub mod models;
pub mod repository;
pub mod routes;
