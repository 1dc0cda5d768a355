//! Domain layer for the GameGearHub backend.
//!
//! This crate contains:
//! - Domain models (User, Device, RentalRequest, ChatMessage)
//! - Booking window arithmetic
//! - Typed request/response payloads

pub mod models;
pub mod services;
