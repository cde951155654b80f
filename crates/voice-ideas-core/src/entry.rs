//! Voice entry model
//!
//! One transcribed voice note as handed to the classifier. Only `transcript`,
//! `tags` and `emotion_score` take part in classification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default user id for entries that don't carry one
pub const DEFAULT_USER_ID: &str = "anonymous";

/// A single transcribed voice note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceEntry {
    pub id: String,
    pub user_id: String,
    pub transcript: String,
    /// User-applied tags, in recorded order. Duplicates are kept.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Signed sentiment score, absent when not computed
    #[serde(default)]
    pub emotion_score: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl VoiceEntry {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            user_id: DEFAULT_USER_ID.to_string(),
            transcript: transcript.into(),
            tags: Vec::new(),
            emotion_score: None,
            created_at: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_emotion_score(mut self, score: f64) -> Self {
        self.emotion_score = Some(score);
        self
    }
}
