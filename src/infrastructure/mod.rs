//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Config: Application configuration
//! - Reference data: spell and class catalogs read from disk
//! - Store client: REST adapter for the remote character store
//! - HTTP: REST API routes
//! - State: Shared application state

pub mod config;
pub mod http;
pub mod reference_data;
pub mod state;
pub mod store_client;
