pub mod admin;
pub mod auth;
pub mod health;
pub mod operation;
pub mod record;
pub mod room;
pub mod settlement;
