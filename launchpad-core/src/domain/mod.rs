//! Core domain types
//!
//! These types are shared between the catalog service (which persists and serves
//! them) and the launcher (which fetches, displays and runs them).

pub mod catalog;
pub mod server;
