//! Observation types for semantic indexing.
//!
//! Observations are immutable records of agent activity: a text payload,
//! its precomputed embedding vector, and optional metadata used for
//! filtered retrieval.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A stored observation.
///
/// Observations are the fundamental unit of storage. They are immutable
/// once indexed; there is no update or caller-visible delete. The `vector`
/// length must match the dimension the store was opened with, which is
/// checked at the storage boundary rather than here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Caller-assigned identifier. Uniqueness is not enforced; re-sending
    /// an id appends a second row.
    pub id: String,

    /// Natural-language content the vector was computed from
    pub text: String,

    /// Embedding vector
    pub vector: Vec<f32>,

    /// Originating project, used for filtered search
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Originating session, used for filtered search
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// ISO-8601 timestamp string. Informational only; never parsed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Observation category, e.g. "prompt" or "tool_result"
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Observation {
    /// Create a new observation with no optional metadata
    pub fn new(id: String, text: String, vector: Vec<f32>) -> Self {
        Self {
            id,
            text,
            vector,
            project: None,
            session_id: None,
            timestamp: None,
            kind: None,
        }
    }

    /// Set the project tag
    pub fn with_project(mut self, project: String) -> Self {
        self.project = Some(project);
        self
    }

    /// Set the session id
    pub fn with_session_id(mut self, session_id: String) -> Self {
        self.session_id = Some(session_id);
        self
    }

    /// Set the timestamp string
    pub fn with_timestamp(mut self, timestamp: String) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Set the observation category
    pub fn with_kind(mut self, kind: String) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// An observation as submitted for indexing, before validation.
///
/// Every field is optional at the wire level. [`ObservationCandidate::is_valid`]
/// decides whether the candidate can become an [`Observation`]; invalid
/// candidates are counted as skipped by the ingestion pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObservationCandidate {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub vector: Option<Vec<f32>>,

    #[serde(default)]
    pub project: Option<String>,

    #[serde(default)]
    pub session_id: Option<String>,

    #[serde(default)]
    pub timestamp: Option<String>,

    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl ObservationCandidate {
    /// A candidate is indexable when it has a non-empty `id`, a non-empty
    /// `text`, and a `vector` with at least one element. Dimensional
    /// correctness is a storage concern, not checked here.
    pub fn is_valid(&self) -> bool {
        let has_id = self.id.as_ref().is_some_and(|id| !id.is_empty());
        let has_text = self.text.as_ref().is_some_and(|text| !text.is_empty());
        let has_vector = self.vector.as_ref().is_some_and(|v| !v.is_empty());
        has_id && has_text && has_vector
    }

    /// Convert into a storable observation, stamping the current time as
    /// an RFC 3339 string when the caller supplied no timestamp.
    ///
    /// Returns `None` for candidates that fail [`ObservationCandidate::is_valid`].
    pub fn into_observation(self) -> Option<Observation> {
        if !self.is_valid() {
            return None;
        }
        Some(Observation {
            id: self.id?,
            text: self.text?,
            vector: self.vector?,
            project: self.project,
            session_id: self.session_id,
            timestamp: self
                .timestamp
                .or_else(|| Some(Utc::now().to_rfc3339())),
            kind: self.kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_candidate() -> ObservationCandidate {
        ObservationCandidate {
            id: Some("obs-1".to_string()),
            text: Some("implemented the retry loop".to_string()),
            vector: Some(vec![0.1, 0.2, 0.3]),
            project: Some("alpha".to_string()),
            session_id: Some("session-9".to_string()),
            timestamp: Some("2025-06-01T12:00:00Z".to_string()),
            kind: Some("prompt".to_string()),
        }
    }

    #[test]
    fn test_candidate_validity() {
        assert!(complete_candidate().is_valid());

        let missing_vector = ObservationCandidate {
            vector: None,
            ..complete_candidate()
        };
        assert!(!missing_vector.is_valid());

        let empty_vector = ObservationCandidate {
            vector: Some(vec![]),
            ..complete_candidate()
        };
        assert!(!empty_vector.is_valid());

        let empty_text = ObservationCandidate {
            text: Some(String::new()),
            ..complete_candidate()
        };
        assert!(!empty_text.is_valid());

        let missing_id = ObservationCandidate {
            id: None,
            ..complete_candidate()
        };
        assert!(!missing_id.is_valid());
    }

    #[test]
    fn test_into_observation_preserves_fields() {
        let obs = complete_candidate().into_observation().unwrap();
        assert_eq!(obs.id, "obs-1");
        assert_eq!(obs.text, "implemented the retry loop");
        assert_eq!(obs.vector, vec![0.1, 0.2, 0.3]);
        assert_eq!(obs.project.as_deref(), Some("alpha"));
        assert_eq!(obs.timestamp.as_deref(), Some("2025-06-01T12:00:00Z"));
        assert_eq!(obs.kind.as_deref(), Some("prompt"));
    }

    #[test]
    fn test_into_observation_defaults_timestamp() {
        let candidate = ObservationCandidate {
            timestamp: None,
            ..complete_candidate()
        };
        let obs = candidate.into_observation().unwrap();
        // Defaulted to ingestion time, RFC 3339 formatted
        let stamp = obs.timestamp.unwrap();
        assert!(stamp.contains('T'));
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());
    }

    #[test]
    fn test_into_observation_rejects_invalid() {
        let candidate = ObservationCandidate {
            id: Some("only-id".to_string()),
            ..Default::default()
        };
        assert!(candidate.into_observation().is_none());
    }

    #[test]
    fn test_candidate_deserializes_type_field() {
        let json = r#"{"id":"a","text":"hello","vector":[0.5],"type":"summary"}"#;
        let candidate: ObservationCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.kind.as_deref(), Some("summary"));
        assert!(candidate.is_valid());
    }

    #[test]
    fn test_observation_serializes_kind_as_type() {
        let obs = Observation::new("a".to_string(), "hello".to_string(), vec![0.5])
            .with_kind("summary".to_string());
        let json = serde_json::to_string(&obs).unwrap();
        assert!(json.contains(r#""type":"summary""#));
        assert!(!json.contains("kind"));
        // Absent optional fields stay out of the payload
        assert!(!json.contains("project"));
    }

    #[test]
    fn test_observation_serialization_roundtrip() {
        let obs = Observation::new(
            "obs-2".to_string(),
            "debugged the worker timeout".to_string(),
            vec![0.9, 0.8],
        )
        .with_project("beta".to_string())
        .with_session_id("session-4".to_string());

        let json = serde_json::to_string(&obs).unwrap();
        let decoded: Observation = serde_json::from_str(&json).unwrap();
        assert_eq!(obs, decoded);
    }
}
