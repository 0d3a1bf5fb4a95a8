//! Server state and configuration.

use std::collections::HashMap;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::session::SessionStore;

/// Sessions idle for longer than this are pruned.
pub const SESSION_EXPIRATION_SECS: u64 = 1800;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
}

/// One user's generate-tab session: the artifact store plus an access
/// timestamp for expiry.
pub struct Session {
    pub store: SessionStore,
    pub last_accessed: Instant,
}

impl Session {
    pub fn new() -> Self {
        Self {
            store: SessionStore::new(),
            last_accessed: Instant::now(),
        }
    }

    /// Touch session to keep it alive.
    pub fn touch(&mut self) {
        self.last_accessed = Instant::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    /// Unix timestamp of server boot for cache busting.
    pub boot_time: u64,
    /// Per-user sessions keyed by UUID.
    pub sessions: RwLock<HashMap<Uuid, Session>>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let boot_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        Self {
            config,
            boot_time,
            sessions: RwLock::new(HashMap::new()),
        }
    }
}
