//! # PetBKK Booking Core
//!
//! Domain core for a single-city pet-services booking application.
//! Owns the entity model, the bookable time-slot grid, the booking
//! lifecycle state machine and the provider/service catalog queries.
//! Storage is reached through the swappable repository adapters in
//! [`repo`]; rendering and auth transport live outside this crate.

pub mod api;
pub mod config;
pub mod consts;
pub mod errors;
pub mod logger;
pub mod models;
pub mod repo;
pub mod slots;
pub mod utils;
