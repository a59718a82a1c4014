pub mod is_admin;
pub mod login;
pub mod register;
