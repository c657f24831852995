pub mod config;
pub mod db;
pub mod invites;
pub mod routes;
pub mod types;
pub mod utils;
