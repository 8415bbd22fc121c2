pub mod app_state;
pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod deadline;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod services;
