pub mod auth;
pub mod classes;
pub mod health;
pub mod users;
