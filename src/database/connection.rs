//! Configuración de conexión a PostgreSQL
//!
//! Este módulo abre el pool de conexiones y crea las tablas si no existen.

use sqlx::PgPool;
use tracing::info;

use crate::config::database::DatabaseConfig;
use crate::database::schema::ALL_TABLES;

/// Conexión a la base de datos con su pool
#[derive(Clone)]
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Conectar usando la configuración y aplicar el schema
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        info!("🔗 Conectando a PostgreSQL: {}", mask_database_url(&config.url));

        let pool = config.create_pool().await?;
        let connection = Self { pool };
        connection.run_migrations().await?;

        info!("✅ PostgreSQL conectado exitosamente");
        Ok(connection)
    }

    /// Envolver un pool ya abierto (sin aplicar el schema)
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Crear las tablas declaradas en `schema` (idempotente)
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        for table in ALL_TABLES.iter() {
            sqlx::query(&table.create_statement())
                .execute(&self.pool)
                .await?;
            for statement in table.upgrade_statements() {
                sqlx::query(&statement).execute(&self.pool).await?;
            }
        }
        Ok(())
    }
}

/// Función helper para enmascarar la URL de la base de datos en logs
fn mask_database_url(url: &str) -> String {
    let Some(at_pos) = url.find('@') else {
        return url.to_string();
    };
    let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
    if scheme_end > at_pos {
        return url.to_string();
    }
    format!("{}***:***@{}", &url[..scheme_end], &url[at_pos + 1..])
}
