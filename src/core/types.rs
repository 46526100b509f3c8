// src/core/types.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a comment as supplied by the backend.
pub type CommentId = String;

/// A short-form video as delivered by the feed endpoint.
/// Read-only from the client's point of view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Video {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub channel: String,
    pub thumbnail: String,
    pub url: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub unique_slang_terms: Vec<String>,
    pub comments_with_slang: Vec<Comment>,
}

impl Video {
    /// Title used in outgoing requests; the backend rejects empty titles.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled Video"
        } else {
            &self.title
        }
    }

    pub fn comment(&self, comment_id: &str) -> Option<&Comment> {
        self.comments_with_slang
            .iter()
            .find(|c| c.comment_id == comment_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    pub comment_id: CommentId,
    pub author: String,
    pub text: String,
    pub like_count: u64,
    pub detected_slang: Vec<String>,
}

/// A member of the learning set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    pub term: String,
    pub definition: String,
    pub example: String,
    pub learned_at: DateTime<Utc>,
    #[serde(default)]
    pub video_title: String,
    #[serde(default)]
    pub video_id: String,
}

/// Which of the two vocabulary sets an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VocabSet {
    Learning,
    Known,
}

impl VocabSet {
    pub fn other(self) -> Self {
        match self {
            VocabSet::Learning => VocabSet::Known,
            VocabSet::Known => VocabSet::Learning,
        }
    }
}

/// The video a vocabulary entry was picked up from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceVideo {
    pub title: String,
    pub id: String,
}

impl From<&Video> for SourceVideo {
    fn from(video: &Video) -> Self {
        Self {
            title: video.title.clone(),
            id: video.video_id.clone(),
        }
    }
}
