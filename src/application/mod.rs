//! Application layer - Use cases over the domain and the character store
//!
//! This layer contains:
//! - Ports: the character store interface the infrastructure implements
//! - Services: spell catalog and character use cases
//! - DTOs: request/response shapes for the spell-selection view
//! - Errors: the error taxonomy surfaced to the client

pub mod dto;
pub mod errors;
pub mod ports;
pub mod services;
