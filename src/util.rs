use std::sync::LazyLock;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Prefix shared by every generated database name.
///
/// Lets an operator recognize and bulk-drop orphaned test databases left
/// behind by crashed runs: `SELECT datname FROM pg_database WHERE datname
/// LIKE 'pg_testkit_%'`.
pub const DB_NAME_PREFIX: &str = "pg_testkit";

static RNG: LazyLock<Mutex<StdRng>> = LazyLock::new(|| Mutex::new(StdRng::from_entropy()));

/// Generate a collision-resistant database name: the fixed prefix plus a
/// random non-negative 63-bit integer.
///
/// Safe to call from many threads at once. Uniqueness is not verified against
/// the server; the 63-bit space makes collisions negligible and the server
/// rejects one if it ever happens. The output is a valid unquoted Postgres
/// identifier.
pub fn random_db_name() -> String {
    let n = RNG.lock().gen_range(0..i64::MAX);
    format!("{}_{}", DB_NAME_PREFIX, n)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_names_have_prefix() {
        let name = random_db_name();
        assert!(
            name.starts_with("pg_testkit_"),
            "{} does not start with pg_testkit_",
            name
        );
    }

    #[test]
    fn test_names_are_distinct() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let name = random_db_name();
            assert!(name.starts_with("pg_testkit_"));
            assert!(seen.insert(name.clone()), "duplicate name: {}", name);
        }
    }

    #[test]
    fn test_names_are_safe_identifiers() {
        let name = random_db_name();
        assert!(name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
    }
}
