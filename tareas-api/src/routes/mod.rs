/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Login and current user
/// - `users`: Registration
/// - `projects`: Project management
/// - `tasks`: Task management within a project

pub mod auth;
pub mod health;
pub mod projects;
pub mod tasks;
pub mod users;
