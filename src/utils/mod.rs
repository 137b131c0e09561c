pub mod app_error;
pub mod catalog;
pub mod config;
