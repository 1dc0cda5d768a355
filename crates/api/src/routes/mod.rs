//! HTTP route handlers.

pub mod auth;
pub mod chat;
pub mod devices;
pub mod health;
pub mod owners;
pub mod rentals;
