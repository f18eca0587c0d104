pub use crate::config::{
    default_url, env_var_name, resolve_url, set_default_url, set_env_var_name, TestConfig,
};
pub use crate::error::{Error, Result};
pub use crate::harness::{Cleanup, CleanupFuture, RecordingHarness, SimpleTestHarness, TestHarness};
pub use crate::pool_url::PoolUrl;
pub use crate::test_db::{create_test_database, create_test_database_from_config, TestPool};
pub use crate::util::{random_db_name, DB_NAME_PREFIX};
