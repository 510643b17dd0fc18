pub mod container_card;
pub mod header;
pub mod login_form;
pub mod toast_viewport;
