pub mod admin;
pub mod auth;
pub mod health;
pub mod mistakes;
pub mod parent;
pub mod reading;
pub mod training;
pub mod writing;
