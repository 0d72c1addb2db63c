//! Worker configuration module
//!
//! Handles loading and validation of worker configuration from
//! environment variables: the database connection, the two record table
//! names, and the listen port.

use anyhow::{anyhow, Context, Result};
use std::env;

/// Worker configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string
    pub database_url: String,
    /// Table holding client registrations
    pub client_table: String,
    /// Table holding user registrations
    pub user_table: String,
    /// HTTP listen port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `DATABASE_URL`: PostgreSQL connection string (required)
    /// - `CLIENT_TABLE`: client registration table name (required)
    /// - `USER_TABLE`: user registration table name (required)
    /// - `PORT`: HTTP port (default: 8080)
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL environment variable not set")?;

        let client_table =
            env::var("CLIENT_TABLE").context("CLIENT_TABLE environment variable not set")?;

        let user_table =
            env::var("USER_TABLE").context("USER_TABLE environment variable not set")?;

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("Invalid PORT value")?;

        let config = Self {
            database_url,
            client_table,
            user_table,
            port,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.database_url.is_empty() {
            return Err(anyhow!("database_url cannot be empty"));
        }
        if self.client_table.is_empty() {
            return Err(anyhow!("client_table cannot be empty"));
        }
        if self.user_table.is_empty() {
            return Err(anyhow!("user_table cannot be empty"));
        }
        if self.client_table == self.user_table {
            return Err(anyhow!("client_table and user_table must differ"));
        }
        Ok(())
    }
}
