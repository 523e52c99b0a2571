pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod forms;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
