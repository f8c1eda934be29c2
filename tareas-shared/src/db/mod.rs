/// Database layer for Tareas
///
/// - `pool`: PostgreSQL connection pool with a startup health check
/// - `migrations`: Embedded schema migrations
///
/// Queries live next to the records they load, in [`crate::models`].

pub mod migrations;
pub mod pool;
