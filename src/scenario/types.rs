use serde::{Deserialize, Serialize};
use std::fmt;

/// Tone of a generated scenario.
///
/// The four named moods are the closed set this client produces. Values it
/// does not recognize arrive from the service as `Other` and are rendered
/// unstyled instead of being rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mood {
    Chaotic,
    Humorous,
    Dramatic,
    Surreal,
    Other(String),
}

impl Mood {
    pub const ALL: [Mood; 4] = [Mood::Chaotic, Mood::Humorous, Mood::Dramatic, Mood::Surreal];

    pub fn as_str(&self) -> &str {
        match self {
            Mood::Chaotic => "chaotic",
            Mood::Humorous => "humorous",
            Mood::Dramatic => "dramatic",
            Mood::Surreal => "surreal",
            Mood::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Mood::Other(_))
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Chaotic => "💥",
            Mood::Humorous => "😄",
            Mood::Dramatic => "🎭",
            Mood::Surreal => "🌀",
            Mood::Other(_) => "✨",
        }
    }
}

impl From<String> for Mood {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "chaotic" => Mood::Chaotic,
            "humorous" => Mood::Humorous,
            "dramatic" => Mood::Dramatic,
            "surreal" => Mood::Surreal,
            _ => Mood::Other(raw),
        }
    }
}

impl From<Mood> for String {
    fn from(mood: Mood) -> Self {
        match mood {
            Mood::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service results carry UUID strings; locally synthesized ones carry the
/// creation time in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScenarioId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioId::Number(n) => write!(f, "{n}"),
            ScenarioId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRequest {
    pub question: String,
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: ScenarioId,
    pub question: String,
    pub scenario: String,
    pub mood: Mood,
    /// ISO-8601, assigned by whoever produced the result.
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl Scenario {
    /// Plain-text form used for copying and sharing.
    pub fn share_text(&self) -> String {
        format!("Q: {}\n\nA: {}", self.question, self.scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_known_moods_deserialize() {
        for mood in Mood::ALL {
            let parsed: Mood = serde_json::from_value(json!(mood.as_str())).unwrap();
            assert_eq!(parsed, mood);
            assert!(parsed.is_known());
        }
    }

    #[test]
    fn test_unrecognized_mood_is_kept_unstyled() {
        let mood: Mood = serde_json::from_value(json!("melancholic")).unwrap();
        assert_eq!(mood, Mood::Other("melancholic".to_string()));
        assert!(!mood.is_known());
        assert_eq!(mood.emoji(), "✨");
        assert_eq!(serde_json::to_value(&mood).unwrap(), json!("melancholic"));
    }

    #[test]
    fn test_scenario_from_service_payload() {
        let scenario: Scenario = serde_json::from_value(json!({
            "id": "6f1c2a9e-1d0b-4c1e-9f57-0d1f4b1f2a11",
            "question": "What if cats ruled the world?",
            "scenario": "Naps become mandatory.",
            "mood": "humorous",
            "timestamp": "2025-08-01T12:30:45.123456",
            "session_id": "session_1_abcdefghi"
        }))
        .unwrap();

        assert_eq!(
            scenario.id,
            ScenarioId::Text("6f1c2a9e-1d0b-4c1e-9f57-0d1f4b1f2a11".to_string())
        );
        assert_eq!(scenario.mood, Mood::Humorous);
        assert_eq!(scenario.timestamp, "2025-08-01T12:30:45.123456");
        assert_eq!(scenario.session_id.as_deref(), Some("session_1_abcdefghi"));
    }

    #[test]
    fn test_numeric_id_and_missing_session() {
        let scenario: Scenario = serde_json::from_value(json!({
            "id": 1,
            "question": "What if gravity stopped for 5 minutes?",
            "scenario": "Coffee everywhere.",
            "mood": "chaotic",
            "timestamp": "2025-08-01T12:30:45.000Z"
        }))
        .unwrap();

        assert_eq!(scenario.id, ScenarioId::Number(1));
        assert_eq!(scenario.id.to_string(), "1");
        assert_eq!(scenario.session_id, None);

        let value = serde_json::to_value(&scenario).unwrap();
        assert!(value.get("session_id").is_none());
    }

    #[test]
    fn test_share_text() {
        let scenario = Scenario {
            id: ScenarioId::Number(7),
            question: "What if colors had sounds?".to_string(),
            scenario: "Red would be very loud.".to_string(),
            mood: Mood::Surreal,
            timestamp: "2025-08-01T00:00:00.000Z".to_string(),
            session_id: None,
        };

        assert_eq!(
            scenario.share_text(),
            "Q: What if colors had sounds?\n\nA: Red would be very loud."
        );
    }
}
