//! Database connection and initialization.

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, Schema,
    Statement,
};

use super::repositories::entities::UserEntity;
use crate::config::DATABASE_MIN_CONNECTIONS;

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open a connection pool and create the `users` table if it is missing.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(database_url.to_owned());
        options
            .max_connections(max_connections)
            .min_connections(DATABASE_MIN_CONNECTIONS.min(max_connections))
            .sqlx_logging(false);

        let connection = SeaDatabase::connect(options).await?;
        let database = Self { connection };
        database.ensure_schema().await?;

        tracing::info!(
            backend = ?database.connection.get_database_backend(),
            "Database connected and schema ready"
        );

        Ok(database)
    }

    /// Get a clone of the database connection.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Create tables derived from the entity definitions (`IF NOT EXISTS`).
    pub async fn ensure_schema(&self) -> Result<(), DbErr> {
        let backend = self.connection.get_database_backend();
        let schema = Schema::new(backend);

        let mut users_table = schema.create_table_from_entity(UserEntity);
        users_table.if_not_exists();

        self.connection.execute(backend.build(&users_table)).await?;
        Ok(())
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}
