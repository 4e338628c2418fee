//! Test database utilities for integration tests.
//!
//! `TestDatabase` gives each test its own SQLite file inside a temporary
//! directory. With the `postgres_tests` feature, `PostgresTestDatabase` starts
//! a throwaway PostgreSQL container instead.

use secretkeeper::config::DatabaseConfig;
use secretkeeper::storage::{self, SqliteSecretStore};
use secretkeeper::RelationalDal;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// A SQLite-backed DAL whose files are removed when dropped.
pub struct TestDatabase {
    pub store: Arc<SqliteSecretStore>,
    pub dal: RelationalDal<SqliteSecretStore>,
    pub path: PathBuf,
    _dir: TempDir,
}

impl TestDatabase {
    /// Create a new test database with the schema applied.
    ///
    /// The `prefix` names the database file, which helps when debugging.
    pub async fn new(prefix: &str) -> Self {
        let dir = tempfile::Builder::new()
            .prefix(&format!("secretkeeper-{}-", prefix))
            .tempdir()
            .expect("create test database directory");
        let path = dir.path().join(format!("{}.db", prefix));

        let config = DatabaseConfig { url: sqlite_url(&path), max_connections: 5, ..Default::default() };

        let store = Arc::new(
            SqliteSecretStore::connect(&config)
                .await
                .unwrap_or_else(|e| panic!("Failed to create test database for {}: {}", prefix, e)),
        );
        let dal = RelationalDal::new(Arc::clone(&store));

        Self { store, dal, path, _dir: dir }
    }

    /// Configuration pointing at this database
    pub fn config(&self) -> DatabaseConfig {
        DatabaseConfig { url: sqlite_url(&self.path), ..Default::default() }
    }

    /// Close every pooled connection; later calls fail with a storage error.
    pub async fn break_connection(&self) {
        self.store.pool().close().await;
    }
}

fn sqlite_url(path: &std::path::Path) -> String {
    format!("sqlite://{}", path.display())
}

/// Open a second, independent DAL on the same database file
pub async fn reopen(db: &TestDatabase) -> RelationalDal {
    RelationalDal::new(storage::connect(&db.config()).await.expect("reopen test database"))
}

#[cfg(feature = "postgres_tests")]
pub use postgres::PostgresTestDatabase;

#[cfg(feature = "postgres_tests")]
mod postgres {
    use secretkeeper::config::DatabaseConfig;
    use secretkeeper::storage::PostgresSecretStore;
    use secretkeeper::RelationalDal;
    use std::sync::Arc;
    use testcontainers::runners::AsyncRunner;
    use testcontainers::ContainerAsync;
    use testcontainers_modules::postgres::Postgres;

    /// A DAL backed by a Testcontainers PostgreSQL instance.
    ///
    /// Keep this struct alive for the duration of the test; the container is
    /// stopped when it is dropped.
    pub struct PostgresTestDatabase {
        pub store: Arc<PostgresSecretStore>,
        pub dal: RelationalDal<PostgresSecretStore>,
        _container: ContainerAsync<Postgres>,
    }

    impl PostgresTestDatabase {
        pub async fn new(prefix: &str) -> Self {
            let container = Postgres::default().start().await.unwrap_or_else(|e| {
                panic!("Failed to start PostgreSQL container for {}: {}", prefix, e)
            });

            let host = container
                .get_host()
                .await
                .unwrap_or_else(|e| panic!("Failed to get container host for {}: {}", prefix, e));

            let port = container
                .get_host_port_ipv4(5432)
                .await
                .unwrap_or_else(|e| panic!("Failed to get container port for {}: {}", prefix, e));

            let config = DatabaseConfig {
                url: format!("postgresql://postgres:postgres@{}:{}/postgres", host, port),
                max_connections: 5,
                min_connections: 1,
                ..Default::default()
            };

            let store = Arc::new(
                PostgresSecretStore::connect(&config)
                    .await
                    .unwrap_or_else(|e| panic!("Failed to create test pool for {}: {}", prefix, e)),
            );
            let dal = RelationalDal::new(Arc::clone(&store));

            Self { store, dal, _container: container }
        }
    }
}
