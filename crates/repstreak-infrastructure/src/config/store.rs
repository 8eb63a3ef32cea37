use std::time::Duration;

/// Connection pool and query timing for the SQLite store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum pooled connections
    pub max_connections: u32,

    /// How long a query waits on a locked database
    pub busy_timeout: Duration,

    /// How long to wait for a free pooled connection
    pub acquire_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_connections: 5,
            busy_timeout: Duration::from_secs(10),
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

impl StoreConfig {
    /// Settings for an in-memory database.
    ///
    /// Each SQLite connection to `:memory:` opens its own database, so the
    /// pool is limited to a single connection.
    pub fn in_memory() -> Self {
        Self {
            max_connections: 1,
            ..Self::default()
        }
    }
}
