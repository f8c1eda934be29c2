/// Database migration runner
///
/// The schema lives in `tareas-shared/migrations/` and is embedded into the
/// binary at compile time with `sqlx::migrate!`, so a deployed server never
/// needs the SQL files on disk.
///
/// # Example
///
/// ```no_run
/// use tareas_shared::db::{migrations::run_migrations, pool::{create_pool, DatabaseConfig}};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// })
/// .await?;
///
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::{migrate::Migrator, postgres::PgPool};
use tracing::{error, info};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Applies all pending migrations
///
/// Already-applied migrations are skipped; a failed migration is logged and
/// returned.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!(
        available = MIGRATOR.iter().count(),
        "Running database migrations"
    );

    MIGRATOR.run(pool).await.map_err(|e| {
        error!(error = %e, "Migration failed");
        e
    })?;

    info!("Database migrations completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_embedded() {
        let descriptions: Vec<&str> = MIGRATOR.iter().map(|m| m.description.as_ref()).collect();
        assert_eq!(descriptions, vec!["create users", "create projects", "create tasks"]);
    }
}
