// Library exports for Chirpy
// This allows integration tests and external code to use Chirpy modules

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;
