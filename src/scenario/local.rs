//! Degraded-mode scenario synthesis.
//!
//! Used when no generation service is configured. Output is picked at random
//! from a small fixed template set, so only the template set and the mood
//! domain are stable, never a particular scenario.

use super::source::ScenarioSource;
use super::types::{Mood, Scenario, ScenarioId, ScenarioRequest};
use crate::error::ClientResult;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use tracing::debug;

/// Leading phrase swapped for each template's connective.
pub const LEADING_PHRASE: &str = "What if";

/// Placeholder in a template skeleton.
const SLOT: &str = "{question}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub connective: &'static str,
    pub skeleton: &'static str,
}

pub const TEMPLATES: &[Template] = &[
    Template {
        connective: "If",
        skeleton: "{question} Well, buckle up. Within hours the news would break the internet, \
                   by lunch governments would be holding emergency meetings, and by dinner \
                   someone would already be selling T-shirts about it.",
    },
    Template {
        connective: "When",
        skeleton: "{question} The answer arrives faster than anyone expects. First comes \
                   confusion, then a wave of wildly confident experts, and finally the quiet \
                   realization that this is simply how life works now.",
    },
    Template {
        connective: "In a world where",
        skeleton: "{question} Nobody blinks anymore. Kids grow up assuming it was always this \
                   way, and the history books add a chapter that everyone skips.",
    },
    Template {
        connective: "The moment",
        skeleton: "{question} Everything tilts at once. Clocks stop mattering, cats look \
                   suspiciously smug, and somewhere a scientist mutters \"I told you so.\"",
    },
];

impl Template {
    /// Swaps a leading "What if" for this template's connective. Questions
    /// that start differently are used as-is.
    pub fn transform(&self, question: &str) -> String {
        match question.strip_prefix(LEADING_PHRASE) {
            Some(rest) => format!("{}{}", self.connective, rest),
            None => question.to_string(),
        }
    }

    pub fn fill(&self, question: &str) -> String {
        self.skeleton.replacen(SLOT, &self.transform(question), 1)
    }
}

pub struct LocalGenerator {
    rng: Mutex<StdRng>,
}

impl LocalGenerator {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    pub fn synthesize(&self, question: &str) -> Scenario {
        let (template, mood) = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            let template = TEMPLATES[rng.random_range(0..TEMPLATES.len())];
            let mood = Mood::ALL[rng.random_range(0..Mood::ALL.len())].clone();
            (template, mood)
        };

        let now = Utc::now();
        debug!("Synthesized local scenario with mood: {}", mood);

        Scenario {
            id: ScenarioId::Number(now.timestamp_millis()),
            question: question.to_string(),
            scenario: template.fill(question),
            mood,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            session_id: None,
        }
    }
}

impl Default for LocalGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Scenario source for deployments without a generation service.
#[derive(Default)]
pub struct LocalFallbackSource {
    generator: LocalGenerator,
}

impl LocalFallbackSource {
    pub fn new(generator: LocalGenerator) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl ScenarioSource for LocalFallbackSource {
    fn name(&self) -> &str {
        "local"
    }

    fn is_local(&self) -> bool {
        true
    }

    async fn generate(&self, request: ScenarioRequest) -> ClientResult<Scenario> {
        let mut scenario = self.generator.synthesize(&request.question);
        scenario.session_id = Some(request.session_id);
        Ok(scenario)
    }

    // Nothing is kept client-side.
    async fn history(&self, _session_id: &str, _limit: u32) -> ClientResult<Vec<Scenario>> {
        Ok(Vec::new())
    }

    async fn health(&self) -> ClientResult<String> {
        Ok("Local scenario generator is running".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_every_template_has_one_slot() {
        for template in TEMPLATES {
            assert_eq!(template.skeleton.matches(SLOT).count(), 1);
            assert!(!template.skeleton.contains(LEADING_PHRASE));
        }
    }

    #[test]
    fn test_connectives_are_distinct() {
        let connectives: HashSet<_> = TEMPLATES.iter().map(|t| t.connective).collect();
        assert_eq!(connectives.len(), TEMPLATES.len());
    }

    #[test]
    fn test_transform_replaces_only_leading_phrase() {
        let template = TEMPLATES[0];
        assert_eq!(
            template.transform("What if What if was a question?"),
            "If What if was a question?"
        );
    }

    #[test]
    fn test_transform_leaves_other_questions_alone() {
        let template = TEMPLATES[1];
        assert_eq!(template.transform("Suppose cats could fly?"), "Suppose cats could fly?");
        assert_eq!(template.transform("what if lowercase?"), "what if lowercase?");
    }

    #[test]
    fn test_seeded_generator_is_deterministic() {
        let a = LocalGenerator::with_rng(StdRng::seed_from_u64(42));
        let b = LocalGenerator::with_rng(StdRng::seed_from_u64(42));

        for _ in 0..10 {
            let x = a.synthesize("What if clouds were solid?");
            let y = b.synthesize("What if clouds were solid?");
            assert_eq!(x.scenario, y.scenario);
            assert_eq!(x.mood, y.mood);
        }
    }

    #[test]
    fn test_timestamp_is_iso8601() {
        let generator = LocalGenerator::with_rng(StdRng::seed_from_u64(7));
        let scenario = generator.synthesize("What if?");
        assert!(chrono::DateTime::parse_from_rfc3339(&scenario.timestamp).is_ok());
    }
}
