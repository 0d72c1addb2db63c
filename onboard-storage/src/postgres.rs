//! PostgreSQL record store implementation

use crate::models::{ClientRecord, UserRecord};
use crate::store::RecordStore;
use crate::{Error, Result};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::instrument;

/// Configuration for the PostgreSQL connection pool
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 5,
            min_connections: 1,
            acquire_timeout_secs: 30,
        }
    }
}

/// Table names for the two record kinds, supplied at process start.
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub client_table: String,
    pub user_table: String,
}

impl TableConfig {
    /// Validate both names as plain SQL identifiers.
    ///
    /// Table names come from configuration and are interpolated into
    /// statements (identifiers cannot be bound as parameters), so
    /// anything outside `[A-Za-z_][A-Za-z0-9_]*` is rejected.
    pub fn validate(&self) -> Result<()> {
        for name in [&self.client_table, &self.user_table] {
            if !is_identifier(name) {
                return Err(Error::InvalidTableName(name.clone()));
            }
        }
        if self.client_table == self.user_table {
            return Err(Error::ValidationError(
                "client and user tables must differ".to_string(),
            ));
        }
        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// PostgreSQL storage backend
pub struct PostgresStore {
    pool: PgPool,
    tables: TableConfig,
}

impl PostgresStore {
    /// Connect with default pool configuration.
    pub async fn new(database_url: &str, tables: TableConfig) -> Result<Self> {
        Self::with_pool_config(database_url, tables, PoolConfig::default()).await
    }

    /// Connect using an explicit pool configuration.
    pub async fn with_pool_config(
        database_url: &str,
        tables: TableConfig,
        config: PoolConfig,
    ) -> Result<Self> {
        tables.validate()?;

        if config.min_connections == 0 {
            return Err(Error::ValidationError(
                "min_connections must be > 0".to_string(),
            ));
        }
        if config.max_connections == 0 || config.max_connections < config.min_connections {
            return Err(Error::ValidationError(
                "max_connections must be >= min_connections and > 0".to_string(),
            ));
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(std::time::Duration::from_secs(config.acquire_timeout_secs))
            .connect(database_url)
            .await?;

        Ok(Self { pool, tables })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create both record tables when absent.
    ///
    /// Table names are dynamic configuration, so schema setup happens
    /// here rather than in static migration files.
    pub async fn ensure_schema(&self) -> Result<()> {
        let client_ddl = format!(
            "CREATE TABLE IF NOT EXISTS {} (client_id TEXT PRIMARY KEY)",
            self.tables.client_table
        );
        let user_ddl = format!(
            "CREATE TABLE IF NOT EXISTS {} (\
             client_id TEXT NOT NULL, \
             user_email TEXT NOT NULL, \
             client_name TEXT NOT NULL, \
             is_admin BOOLEAN NOT NULL, \
             user_name TEXT NOT NULL, \
             PRIMARY KEY (client_id, user_email))",
            self.tables.user_table
        );

        sqlx::query(&client_ddl).execute(&self.pool).await?;
        sqlx::query(&user_ddl).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for PostgresStore {
    #[instrument(skip(self, client), fields(client_id = %client.client_id))]
    async fn put_client(&self, client: &ClientRecord) -> Result<()> {
        let sql = format!(
            "INSERT INTO {} (client_id) VALUES ($1) \
             ON CONFLICT (client_id) DO NOTHING",
            self.tables.client_table
        );

        sqlx::query(&sql)
            .bind(&client.client_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    #[instrument(
        skip(self, user),
        fields(client_id = %user.client_id, user_email = %user.user_email)
    )]
    async fn put_user(&self, user: &UserRecord) -> Result<()> {
        let sql = format!(
            "INSERT INTO {} (client_id, user_email, client_name, is_admin, user_name) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (client_id, user_email) DO UPDATE SET \
             client_name = EXCLUDED.client_name, \
             is_admin = EXCLUDED.is_admin, \
             user_name = EXCLUDED.user_name",
            self.tables.user_table
        );

        sqlx::query(&sql)
            .bind(&user.client_id)
            .bind(&user.user_email)
            .bind(&user.client_name)
            .bind(user.is_admin)
            .bind(&user.user_name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn client_exists(&self, client_id: &str) -> Result<bool> {
        let sql = format!(
            "SELECT 1 FROM {} WHERE client_id = $1 LIMIT 1",
            self.tables.client_table
        );

        let row = sqlx::query(&sql)
            .bind(client_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }
}
