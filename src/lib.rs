pub mod api;
pub mod clients;
pub mod config;
pub mod engine;
pub mod error;
pub mod escalation;
pub mod models;
pub mod observability;
pub mod state;
