//! Ephemeral PostgreSQL databases for tests.
//!
//! Each call to [`create_test_database`] provisions a uniquely named database
//! on a PostgreSQL server, connects a [`sqlx::PgPool`] to it, and registers
//! its own teardown with the test harness. When the test finishes, the
//! database is dropped and the pool closed; closing early by hand is always
//! safe. Creation failures abort the test through the harness, teardown
//! failures are only reported, so they never mask the test's own result.
//!
//! Generated databases are named `pg_testkit_<random 63-bit integer>`, which
//! makes leftovers from crashed runs easy to find and bulk-drop.
//!
//! ```no_run
//! use std::sync::Arc;
//! use pg_testkit::{create_test_database_from_config, SimpleTestHarness};
//!
//! # async fn demo() {
//! let harness = Arc::new(SimpleTestHarness::new("my_test"));
//! let pool = create_test_database_from_config(harness.clone()).await;
//!
//! let row: (String,) = sqlx::query_as("SELECT current_database()")
//!     .fetch_one(pool.pool())
//!     .await
//!     .unwrap();
//! assert_eq!(row.0, pool.url().name());
//!
//! // runs the registered teardown; dropping the harness does the same
//! harness.run_cleanups().await;
//! # }
//! ```
//!
//! The server endpoint comes from the `PGURL` environment variable when set,
//! else from a configurable default (see [`config`]). URLs may carry
//! pgx-style `pool_*` query parameters; [`PoolUrl`] interprets them for the
//! pool and strips them before anything is handed to the driver, and its
//! [`PoolUrl::conn_url`] yields a parameter-free URL for migration tools and
//! raw connections.

pub mod config;
pub mod error;
pub mod harness;
pub mod pool_url;
pub mod test_db;
pub mod tracing;
pub mod util;

pub mod prelude;

pub use config::TestConfig;
pub use error::{Error, Result};
pub use harness::{Cleanup, CleanupFuture, RecordingHarness, SimpleTestHarness, TestHarness};
pub use pool_url::PoolUrl;
pub use test_db::{create_test_database, create_test_database_from_config, TestPool};
