mod client;
mod local;
mod remote;
mod source;
mod types;

pub use client::{DEFAULT_HISTORY_LIMIT, MAX_QUESTION_CHARS, ScenarioClient, validate_question};
pub use local::{LEADING_PHRASE, LocalFallbackSource, LocalGenerator, TEMPLATES, Template};
pub use remote::RemoteSource;
pub use source::ScenarioSource;
pub use types::{Mood, Scenario, ScenarioId, ScenarioRequest};
