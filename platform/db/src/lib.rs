//! Database settings and pool construction for the employee service.
//!
//! Connection parameters come from the process environment. `DATABASE_URL`
//! wins when present; otherwise the URL is assembled from the discrete
//! `DB_*` variables.

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Shared connection pool handle. Cloning is cheap.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database name missing: set DATABASE_URL or DB_NAME")]
    MissingDatabase,
    #[error("invalid database port {0:?}")]
    InvalidPort(String),
    #[error("invalid DB_MAX_CONNECTIONS {0:?}")]
    InvalidMaxConnections(String),
    #[error("invalid database url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("cannot use {0:?} in a database url")]
    InvalidCredentials(String),
    #[error(transparent)]
    Connect(#[from] DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

/// Environment-driven connection settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub sslmode: String,
    pub max_connections: Option<u32>,
}

impl DatabaseSettings {
    pub fn from_env() -> DbResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable source. Blank values count
    /// as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DbResult<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = match get("DB_PORT") {
            Some(raw) => raw.parse().map_err(|_| DbError::InvalidPort(raw))?,
            None => 5432,
        };
        let max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(raw) => Some(
                raw.parse()
                    .map_err(|_| DbError::InvalidMaxConnections(raw))?,
            ),
            None => None,
        };

        Ok(Self {
            url: get("DATABASE_URL"),
            host: get("DB_HOST").unwrap_or_else(|| "localhost".into()),
            port,
            user: get("DB_USER"),
            password: get("DB_PASSWORD"),
            name: get("DB_NAME"),
            sslmode: get("DB_SSLMODE").unwrap_or_else(|| "disable".into()),
            max_connections,
        })
    }

    /// Connection URL, with credentials percent-encoded.
    pub fn database_url(&self) -> DbResult<String> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }
        let name = self.name.as_deref().ok_or(DbError::MissingDatabase)?;

        let mut url = Url::parse("postgres://localhost")?;
        url.set_host(Some(&self.host))?;
        url.set_port(Some(self.port))
            .map_err(|_| DbError::InvalidPort(self.port.to_string()))?;
        if let Some(user) = &self.user {
            url.set_username(user)
                .map_err(|_| DbError::InvalidCredentials(user.clone()))?;
        }
        if let Some(password) = &self.password {
            url.set_password(Some(password))
                .map_err(|_| DbError::InvalidCredentials("password".into()))?;
        }
        url.set_path(name);
        url.query_pairs_mut().append_pair("sslmode", &self.sslmode);
        Ok(url.into())
    }
}

/// Opens the pool described by `settings`.
pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let mut options = ConnectOptions::new(settings.database_url()?);
    options
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    if let Some(max) = settings.max_connections {
        options.max_connections(max);
    }
    let pool = Database::connect(options).await?;
    debug!(host = %settings.host, port = settings.port, "database pool ready");
    Ok(pool)
}

/// Round-trips a trivial statement to check the database is reachable.
pub async fn ping(pool: &DbPool) -> bool {
    let backend = pool.get_database_backend();
    pool.execute(Statement::from_string(backend, "SELECT 1".to_string()))
        .await
        .is_ok()
}
