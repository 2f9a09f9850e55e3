//! Core domain logic for devgate (protocol-agnostic).
//!
//! Configuration, the error taxonomy, shared DTOs, and the service
//! container. Never imports from http/.

pub mod config;
pub mod error;
pub mod services;
pub mod types;
