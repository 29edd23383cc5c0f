//! Launchpad Core
//!
//! Core types and abstractions shared by the Launchpad launcher and catalog service.
//!
//! This crate contains:
//! - Domain types: catalog entries, catalog snapshots, server runtime config
//! - Endpoints: construction of every URL the launcher talks to

pub mod domain;
pub mod endpoint;
