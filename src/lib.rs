pub mod api;
pub mod chains;
pub mod config;
pub mod gen;
pub mod models;
pub mod serve_stats;
pub mod service;
