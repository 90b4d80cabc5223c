//! One-shot schema migrations: read a SQL file, run it on a pooled
//! connection, hand the connection back.
//!
//! The pool itself (Postgres or otherwise) lives outside this crate and is
//! reached through [`ConnectionPool`]. Connections are borrowed through a
//! [`PooledConnection`] guard, so they go back to the pool on every path out
//! of a migration, failures included.

use std::{
    error::Error as StdError,
    fs, io,
    ops::{Deref, DerefMut},
    path::{Path, PathBuf},
};

/// Boxed error from a pool or connection
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// A live database connection
pub trait Connection {
    type Error: StdError + Send + Sync + 'static;

    /// Executes `sql`, returning the number of affected rows
    fn query(&mut self, sql: &str) -> Result<u64, Self::Error>;
}

/// Source of connections
pub trait ConnectionPool {
    type Connection: Connection;
    type Error: StdError + Send + Sync + 'static;

    fn connect(&self) -> Result<Self::Connection, Self::Error>;

    /// Returns a connection obtained from [`ConnectionPool::connect`]
    fn release(&self, connection: Self::Connection);
}

/// Connection on loan from a pool; released when dropped.
pub struct PooledConnection<'p, P: ConnectionPool> {
    pool:       &'p P,
    /// Invariant: `Some` from `acquire` until `drop` takes it for release.
    /// Nothing else moves it out, so `Deref`/`DerefMut` never observe `None`.
    connection: Option<P::Connection>,
}

impl<'p, P: ConnectionPool> PooledConnection<'p, P> {
    /// # Errors
    /// Returns `MigrationError::Connect` if the pool cannot hand out a connection.
    pub fn acquire(pool: &'p P) -> Result<Self, MigrationError> {
        let connection = pool
            .connect()
            .map_err(|source| MigrationError::Connect(Box::new(source)))?;
        Ok(Self {
            pool,
            connection: Some(connection),
        })
    }
}

impl<P: ConnectionPool> Deref for PooledConnection<'_, P> {
    type Target = P::Connection;

    fn deref(&self) -> &Self::Target {
        self.connection
            .as_ref()
            .unwrap_or_else(|| unreachable!("pooled connection used after release"))
    }
}

impl<P: ConnectionPool> DerefMut for PooledConnection<'_, P> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.connection
            .as_mut()
            .unwrap_or_else(|| unreachable!("pooled connection used after release"))
    }
}

impl<P: ConnectionPool> Drop for PooledConnection<'_, P> {
    fn drop(&mut self) {
        if let Some(connection) = self.connection.take() {
            self.pool.release(connection);
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to read migration {}: {source}", path.display())]
    Read {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to acquire connection: {0}")]
    Connect(#[source] BoxError),

    #[error("migration {name} failed: {source}")]
    Failed {
        name:   String,
        #[source]
        source: BoxError,
    },
}

/// A named SQL script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    pub name: String,
    pub sql:  String,
}

impl Migration {
    pub fn new(name: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql:  sql.into(),
        }
    }

    /// Loads a script; the migration is named after the file stem.
    ///
    /// # Errors
    /// Returns `MigrationError::Read` if the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MigrationError> {
        let path = path.as_ref();
        let sql = fs::read_to_string(path).map_err(|source| MigrationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .map_or_else(|| path.display().to_string(), |stem| stem.to_string_lossy().into_owned());
        Ok(Self { name, sql })
    }
}

/// Runs one migration on a fresh connection from `pool`.
///
/// # Errors
/// `MigrationError::Connect` if no connection is available,
/// `MigrationError::Failed` if the script errors.
pub fn run_migration<P: ConnectionPool>(pool: &P, migration: &Migration) -> Result<u64, MigrationError> {
    let mut connection = PooledConnection::acquire(pool)?;
    tracing::info!(migration = %migration.name, "running migration");

    match connection.query(&migration.sql) {
        Ok(rows) => {
            tracing::info!(migration = %migration.name, rows, "migration applied");
            Ok(rows)
        },
        Err(source) => {
            tracing::error!(migration = %migration.name, error = %source, "migration failed");
            Err(MigrationError::Failed {
                name:   migration.name.clone(),
                source: Box::new(source),
            })
        },
    }
}

/// Reads the SQL file at `path` and runs it.
///
/// # Errors
/// See [`Migration::from_file`] and [`run_migration`].
pub fn run_migration_file<P: ConnectionPool>(pool: &P, path: impl AsRef<Path>) -> Result<u64, MigrationError> {
    let migration = Migration::from_file(path)?;
    run_migration(pool, &migration)
}

/// Runs migrations in order, stopping at the first failure.
///
/// Returns how many were applied.
///
/// # Errors
/// The error of the first migration that failed.
pub fn run_migrations<P: ConnectionPool>(pool: &P, migrations: &[Migration]) -> Result<usize, MigrationError> {
    for migration in migrations {
        run_migration(pool, migration)?;
    }
    Ok(migrations.len())
}
