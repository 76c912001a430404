//! Conversation transcripts stored as JSON.
//!
//! ```json
//! {
//!   "entries": [
//!     {"message": {"role": "user", "content": "What is the half-life?"}},
//!     {
//!       "message": {"role": "assistant", "content": {"sections": [...]}},
//!       "sources": [{"title": "Decay data", "url": "https://..."}],
//!       "analysisMethodology": "Fitted $N(t) = N_0 e^{-\\lambda t}$"
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::model::{ChatSource, Message};
use crate::view::ChatMessage;

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("failed to access transcript {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid transcript {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One message plus the extras shown alongside it
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptEntry {
    pub message: Message,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<ChatSource>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "analysis_methodology"
    )]
    pub analysis_methodology: Option<String>,
}

impl TranscriptEntry {
    pub fn new(message: Message) -> Self {
        Self {
            message,
            sources: None,
            analysis_methodology: None,
        }
    }

    /// Component for this entry, borrowing its data
    pub fn chat_message(&self) -> ChatMessage<'_> {
        let mut chat = ChatMessage::new(&self.message);
        if let Some(sources) = &self.sources {
            chat = chat.sources(sources);
        }
        if let Some(text) = &self.analysis_methodology {
            chat = chat.analysis_methodology(text);
        }
        chat
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Transcript {
    #[serde(default)]
    pub entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn load(path: &Path) -> Result<Self, TranscriptError> {
        let content = fs::read_to_string(path).map_err(|source| TranscriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let transcript: Transcript =
            serde_json::from_str(&content).map_err(|source| TranscriptError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        info!(path = %path.display(), entries = transcript.entries.len(), "loaded transcript");
        Ok(transcript)
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn save(&self, path: &Path) -> Result<(), TranscriptError> {
        let data = serde_json::to_string_pretty(self).map_err(|source| TranscriptError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, data).map_err(|source| TranscriptError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::PlainTextRenderer;
    use crate::model::{MessageContent, Role};
    use crate::view::MessageView;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"{
        "entries": [
            {"message": {"role": "user", "content": "Explain decay"}},
            {
                "message": {
                    "role": "assistant",
                    "content": {"sections": [{"type": "equation", "content": "N = N_0 e^{-t}"}]}
                },
                "sources": [{"title": "Decay data", "url": "https://example.org/decay"}],
                "analysisMethodology": "Least squares fit"
            }
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let transcript = Transcript::from_json_str(SAMPLE).unwrap();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.entries[0].message.role, Role::User);
        assert!(transcript.entries[0].sources.is_none());
        assert_eq!(
            transcript.entries[1].analysis_methodology.as_deref(),
            Some("Least squares fit")
        );
        assert!(matches!(
            transcript.entries[1].message.content,
            MessageContent::Structured(_)
        ));
    }

    #[test]
    fn test_snake_case_alias() {
        let json = r#"{"entries":[{"message":{"role":"assistant","content":"x"},"analysis_methodology":"m"}]}"#;
        let transcript = Transcript::from_json_str(json).unwrap();
        assert_eq!(transcript.entries[0].analysis_methodology.as_deref(), Some("m"));
    }

    #[test]
    fn test_entry_builds_component() {
        let transcript = Transcript::from_json_str(SAMPLE).unwrap();
        let view = transcript.entries[1].chat_message().layout(&PlainTextRenderer);
        let MessageView::Assistant(card) = view else {
            panic!("expected assistant card");
        };
        assert_eq!(card.sources.unwrap().rows.len(), 1);
        assert_eq!(
            card.methodology.unwrap().body.to_plain_string(),
            "Least squares fit"
        );
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chat.json");
        let transcript = Transcript::from_json_str(SAMPLE).unwrap();
        transcript.save(&path).unwrap();
        assert_eq!(Transcript::load(&path).unwrap(), transcript);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(Transcript::load(&missing), Err(TranscriptError::Io { .. })));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, r#"{"entries":[{"message":{"role":"robot","content":"x"}}]}"#).unwrap();
        assert!(matches!(Transcript::load(&bad), Err(TranscriptError::Parse { .. })));
    }
}
