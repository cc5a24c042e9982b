//! Conexión a PostgreSQL
//!
//! Crea el pool a partir de `DatabaseConfig` y aplica las migraciones
//! embebidas de `migrations/`.

use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::config::database::{mask_database_url, DatabaseConfig};

pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Abrir el pool y comprobar que la base responde
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let masked = mask_database_url(&config.url);
        tracing::info!("🔌 Conectando a PostgreSQL: {}", masked);

        let pool = config
            .create_pool()
            .await
            .with_context(|| format!("Could not connect to {}", masked))?;

        let connection = Self { pool };
        connection.health_check().await.context("Database health check failed")?;

        tracing::info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "✅ Pool de PostgreSQL listo"
        );
        Ok(connection)
    }

    /// Aplicar las migraciones pendientes
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        tracing::info!("✅ Migraciones aplicadas");
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub fn into_pool(self) -> PgPool {
        self.pool
    }
}
