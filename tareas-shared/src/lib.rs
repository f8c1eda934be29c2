//! # Tareas Shared Library
//!
//! This crate contains the domain types, storage backends, and authentication
//! primitives used by the Tareas API server.
//!
//! ## Module Organization
//!
//! - `models`: Users, projects and tasks, with their PostgreSQL queries
//! - `store`: The `Store` trait and its PostgreSQL and in-memory backends
//! - `auth`: Password hashing, JWT tokens, the request gate and ownership checks
//! - `db`: Connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;
pub mod store;

/// Current version of the Tareas shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
