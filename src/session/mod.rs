mod store;

pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

use crate::config::SessionConfig;
use chrono::Utc;
use rand::Rng;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

pub const SESSION_PREFIX: &str = "session_";
const RANDOM_PART_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Stable per-installation token correlating requests from one client.
///
/// The token is read from the store on first use, created and persisted if
/// absent, and cached for the lifetime of this value. When the store fails
/// the token still exists, but only for the current process.
pub struct SessionIdentity {
    store: Arc<dyn SessionStore>,
    key: String,
    cached: Mutex<Option<String>>,
}

impl SessionIdentity {
    pub fn new(store: Arc<dyn SessionStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            cached: Mutex::new(None),
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(
            Arc::new(FileSessionStore::new(&config.storage_path)),
            config.key.clone(),
        )
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn get(&self) -> String {
        let mut cached = self.cached.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(token) = cached.as_ref() {
            return token.clone();
        }

        let token = self.load_or_create();
        *cached = Some(token.clone());
        token
    }

    fn load_or_create(&self) -> String {
        match self.store.get(&self.key) {
            Ok(Some(token)) if !token.is_empty() => {
                debug!("Loaded session identity from store");
                return token;
            }
            Ok(_) => {}
            // Try to write a fresh token; the store may still accept it
            Err(e) => warn!("Failed to read session identity: {}", e),
        }

        let token = new_session_token();
        match self.store.set(&self.key, &token) {
            Ok(()) => info!("Created session identity: {}", token),
            Err(e) => warn!(
                "Failed to persist session identity, valid for this process only: {}",
                e
            ),
        }
        token
    }
}

/// `session_<unix millis>_<9 base36 chars>`
pub fn new_session_token() -> String {
    let mut rng = rand::rng();
    let random: String = (0..RANDOM_PART_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();

    format!("{}{}_{}", SESSION_PREFIX, Utc::now().timestamp_millis(), random)
}

pub fn is_session_token(token: &str) -> bool {
    let Some(rest) = token.strip_prefix(SESSION_PREFIX) else {
        return false;
    };
    let Some((millis, random)) = rest.split_once('_') else {
        return false;
    };

    !millis.is_empty()
        && millis.chars().all(|c| c.is_ascii_digit())
        && random.len() == RANDOM_PART_LEN
        && random
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
}
