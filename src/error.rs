use thiserror::Error;

/// SQLSTATE for `invalid_catalog_name` - the database does not exist.
pub const INVALID_CATALOG_NAME: &str = "3D000";

/// SQLSTATE for `object_in_use` - the database still has open connections.
pub const OBJECT_IN_USE: &str = "55006";

/// Errors that can occur when provisioning or tearing down test databases
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed connection URL
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Could not reach or authenticate against the server
    #[error("connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    /// CREATE DATABASE was rejected
    #[error("creating database {name}: {source}")]
    CreateDatabase {
        name: String,
        #[source]
        source: sqlx::Error,
    },

    /// DROP DATABASE was rejected
    #[error("dropping database {name}: {source}")]
    DropDatabase {
        name: String,
        #[source]
        source: sqlx::Error,
    },
}

impl Error {
    /// True if the underlying server error says the database does not exist.
    ///
    /// Teardown treats this as success: a database that is already gone is
    /// exactly the state teardown wants.
    pub fn is_database_missing(&self) -> bool {
        self.pg_code().as_deref() == Some(INVALID_CATALOG_NAME)
    }

    /// True if the underlying server error says the database still has open
    /// connections. Reported (never fatal) during teardown.
    pub fn is_database_in_use(&self) -> bool {
        self.pg_code().as_deref() == Some(OBJECT_IN_USE)
    }

    fn pg_code(&self) -> Option<String> {
        let source = match self {
            Error::Connection(e) => e,
            Error::CreateDatabase { source, .. } => source,
            Error::DropDatabase { source, .. } => source,
            Error::InvalidUrl(_) => return None,
        };
        match source {
            sqlx::Error::Database(db) => db.code().map(|c| c.into_owned()),
            _ => None,
        }
    }
}

/// Result type for test-database operations
pub type Result<T> = std::result::Result<T, Error>;
