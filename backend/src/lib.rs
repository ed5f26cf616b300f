pub mod catalog;
pub mod config;
pub mod routes;
pub mod sentiment;
