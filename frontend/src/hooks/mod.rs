pub mod use_app_context;
pub mod use_containers;
pub mod use_current_user;
pub mod use_toasts;
