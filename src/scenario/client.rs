use super::local::LocalFallbackSource;
use super::remote::RemoteSource;
use super::source::ScenarioSource;
use super::types::{Scenario, ScenarioRequest};
use crate::config::Config;
use crate::error::{ClientResult, ScenarioError};
use crate::session::SessionIdentity;
use crate::Result;
use tracing::{debug, info, warn};

pub const MAX_QUESTION_CHARS: usize = 500;
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// Trims a raw submission and rejects the ones that must never be sent.
pub fn validate_question(raw: &str) -> ClientResult<String> {
    let question = raw.trim();

    if question.is_empty() {
        return Err(ScenarioError::validation("Please enter a question."));
    }

    if question.chars().count() > MAX_QUESTION_CHARS {
        return Err(ScenarioError::validation(format!(
            "Questions are limited to {} characters.",
            MAX_QUESTION_CHARS
        )));
    }

    Ok(question.to_string())
}

pub struct ScenarioClient {
    identity: SessionIdentity,
    source: Box<dyn ScenarioSource>,
}

impl ScenarioClient {
    pub fn new(identity: SessionIdentity, source: Box<dyn ScenarioSource>) -> Self {
        Self { identity, source }
    }

    /// Remote source when a backend URL is configured, local synthesis
    /// otherwise.
    ///
    /// The session identity is resolved here, so the blocking file store is
    /// only touched at startup and never inside `generate` or `history`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let identity = SessionIdentity::from_config(&config.session);
        identity.get();

        let source: Box<dyn ScenarioSource> = if config.is_degraded() {
            info!("No backend configured, generating scenarios locally");
            Box::new(LocalFallbackSource::default())
        } else {
            let remote = RemoteSource::new(&config.backend)?;
            info!("Using generation service at {}", remote.base_url());
            Box::new(remote)
        };

        Ok(Self::new(identity, source))
    }

    pub fn session_id(&self) -> String {
        self.identity.get()
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn is_degraded(&self) -> bool {
        self.source.is_local()
    }

    /// Generates a scenario for a question the caller has already validated.
    pub async fn generate(&self, question: &str) -> ClientResult<Scenario> {
        let request = ScenarioRequest {
            question: question.trim().to_string(),
            session_id: self.identity.get(),
        };

        debug!("Generating scenario via {} source", self.source.name());

        self.source.generate(request).await.inspect_err(|e| {
            warn!("Scenario generation failed ({:?}): {}", e.kind, e.message);
        })
    }

    pub async fn history(&self, limit: u32) -> ClientResult<Vec<Scenario>> {
        let session_id = self.identity.get();
        let scenarios = self.source.history(&session_id, limit).await?;
        debug!("Retrieved {} scenarios", scenarios.len());
        Ok(scenarios)
    }

    pub async fn health(&self) -> ClientResult<String> {
        self.source.health().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::scenario::{LocalGenerator, Mood};
    use crate::session::MemorySessionStore;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::Arc;

    fn local_client() -> ScenarioClient {
        let identity = SessionIdentity::new(Arc::new(MemorySessionStore::new()), "test_key");
        let generator = LocalGenerator::with_rng(StdRng::seed_from_u64(1));
        ScenarioClient::new(identity, Box::new(LocalFallbackSource::new(generator)))
    }

    #[test]
    fn test_validate_trims() {
        assert_eq!(
            validate_question("  What if colors had sounds?  \n").unwrap(),
            "What if colors had sounds?"
        );
    }

    #[test]
    fn test_validate_rejects_blank() {
        let err = validate_question("   \t").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(!err.message.is_empty());
    }

    #[test]
    fn test_validate_length_limit() {
        let at_limit = "x".repeat(MAX_QUESTION_CHARS);
        assert!(validate_question(&at_limit).is_ok());

        let over = "x".repeat(MAX_QUESTION_CHARS + 1);
        assert_eq!(validate_question(&over).unwrap_err().kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_local_generate_tags_session() {
        let client = local_client();
        assert!(client.is_degraded());

        let scenario = client.generate("What if dreams were broadcast on TV?").await.unwrap();
        assert_eq!(scenario.question, "What if dreams were broadcast on TV?");
        assert_eq!(scenario.session_id, Some(client.session_id()));
        assert!(Mood::ALL.contains(&scenario.mood));
    }

    #[tokio::test]
    async fn test_local_history_is_empty() {
        let client = local_client();
        assert!(client.history(DEFAULT_HISTORY_LIMIT).await.unwrap().is_empty());
    }

    #[test]
    fn test_from_config_selects_source() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.session.storage_path = dir.path().join("session.json").display().to_string();

        let client = ScenarioClient::from_config(&config).unwrap();
        assert_eq!(client.source_name(), "local");
        assert!(dir.path().join("session.json").exists());

        config.backend.base_url = Some("http://localhost:8001".to_string());
        let client = ScenarioClient::from_config(&config).unwrap();
        assert_eq!(client.source_name(), "remote");
        assert!(!client.is_degraded());
    }
}
