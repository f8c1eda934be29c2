/// Database models for Tareas
///
/// This module contains the domain records and their PostgreSQL queries.
///
/// # Models
///
/// - `user`: Registered accounts
/// - `project`: Named task collections owned by one user
/// - `task`: Units of work belonging to a project
///
/// Handlers do not call these queries directly; they go through
/// [`crate::store::Store`], whose PostgreSQL backend delegates here.

pub mod project;
pub mod task;
pub mod user;
