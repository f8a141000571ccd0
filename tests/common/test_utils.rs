use serde_json::{Value, json};
use std::sync::Arc;
use whatif_client::{
    config::BackendConfig,
    scenario::{RemoteSource, ScenarioClient},
    session::{MemorySessionStore, SessionIdentity, SessionStore},
};

pub const SESSION_KEY: &str = "whatif_session_id";
pub const SESSION_TOKEN: &str = "session_1700000000000_k3x9q2m7a";

/// Backend config pointing at a test server
pub fn backend_config(base_url: &str) -> BackendConfig {
    BackendConfig {
        base_url: Some(base_url.to_string()),
        error_field: "detail".to_string(),
    }
}

/// Identity backed by memory, pre-seeded with `SESSION_TOKEN`
pub fn seeded_identity() -> SessionIdentity {
    let store = MemorySessionStore::new();
    store.set(SESSION_KEY, SESSION_TOKEN).unwrap();
    SessionIdentity::new(Arc::new(store), SESSION_KEY)
}

/// Client talking to the given base URL with a known session token
pub fn remote_client(base_url: &str) -> ScenarioClient {
    let source = RemoteSource::new(&backend_config(base_url)).unwrap();
    ScenarioClient::new(seeded_identity(), Box::new(source))
}

/// Base URL of a port nothing is listening on
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

/// A scenario as the generation service returns it
pub fn service_scenario(question: &str, mood: &str) -> Value {
    json!({
        "id": "0b8f6c1e-3a0d-4e59-a5a3-8f1d2c3b4a5e",
        "question": question,
        "scenario": "Everyone floats and birds finally get the last laugh.",
        "mood": mood,
        "timestamp": "2025-08-01T12:30:45.123456",
        "session_id": SESSION_TOKEN
    })
}
