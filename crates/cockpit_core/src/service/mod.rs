//! Tracking use-case services.
//!
//! # Responsibility
//! - Own the live store and route every write through the mutation API.
//! - Keep UI/host layers decoupled from persistence details.

pub mod edit;
pub mod tracker;
