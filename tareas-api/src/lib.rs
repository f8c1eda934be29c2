//! # Tareas API Server Library
//!
//! HTTP layer of the Tareas task manager: users register and log in, create
//! projects, and keep a list of tasks in each project they own.
//!
//! ## Modules
//!
//! - `app`: Application state, router builder and token layer
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
