use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteConnection},
    Connection as SqlConnection,
};
use tokio::sync::{Mutex, MutexGuard};

use crate::schema;

/// A thread safe connection to the database
#[derive(Debug, Clone)]
pub struct Connection {
    conn: Arc<Mutex<SqliteConnection>>,
    _handle: Option<Arc<TestHandle>>,
}

impl Connection {
    /// Open a connection to the database. The database
    /// file is created if it does not exist.
    pub async fn open(filename: &str) -> Result<Self> {
        let opts = SqliteConnectOptions::from_str(filename)?
            .create_if_missing(true)
            .foreign_keys(true);
        let conn = SqliteConnection::connect_with(&opts).await?;
        tracing::debug!(filename, "opened database");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            _handle: None,
        })
    }

    /// Open a new test database connection.
    /// The database will be created on each open and is
    /// removed when the last clone of the connection is dropped.
    pub async fn open_test() -> Self {
        let path = std::env::temp_dir().join(format!(
            "cashdesk_test_{}.sqlite3",
            rand::random::<u64>()
        ));
        let filename = path.to_string_lossy().to_string();
        let mut conn = Self::open(&filename).await.unwrap();
        conn._handle = Some(Arc::new(TestHandle { path }));

        // Install the schema
        schema::install(&conn).await.unwrap();

        conn
    }

    /// Acquire exclusive access to the underlying connection
    pub async fn lock(&self) -> MutexGuard<'_, SqliteConnection> {
        self.conn.lock().await
    }
}

/// Removes the test database file when dropped
#[derive(Debug)]
struct TestHandle {
    path: PathBuf,
}

impl Drop for TestHandle {
    fn drop(&mut self) {
        if self.path.exists() {
            let _ = fs::remove_file(&self.path);
        }
    }
}
