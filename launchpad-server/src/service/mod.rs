//! Service Module
//!
//! Business logic layer for the catalog service.
//! Services work on the shared state and the repositories.

pub mod admin;
pub mod catalog;

// Re-export for convenience
pub use admin as admin_service;
pub use catalog as catalog_service;
