//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the persistent store accessors and the image storage client.

pub mod storage;
pub mod store;
