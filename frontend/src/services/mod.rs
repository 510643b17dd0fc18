pub mod api;
pub mod app_context;
pub mod auth_store;
pub mod config;
pub mod current_user;
pub mod logging;
pub mod subscription;
pub mod toaster;
