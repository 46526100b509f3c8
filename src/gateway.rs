// File: src/gateway.rs
//! Request/response plumbing for the evaluation backend.
//!
//! Every call is a single attempt. Failures come back as [`GatewayError`]
//! and the caller decides what to show; nothing here retries or backs off.

use crate::core::types::Video;
use crate::error::GatewayError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const VIDEOS_PATH: &str = "/api/videos";
pub const EVALUATE_PATH: &str = "/api/evaluate";
pub const RESPOND_PATH: &str = "/api/respond";
pub const EXPLAIN_PATH: &str = "/api/explain-comment";
pub const DEFINE_PATH: &str = "/api/define-word";
pub const SUGGEST_PATH: &str = "/api/suggest-slang";
pub const TRANSLATE_PATH: &str = "/api/translate-video";
pub const REFRESH_PATH: &str = "/api/refresh";
pub const SLANG_PATH: &str = "/api/slang";

// --- Wire types ---

pub const DEFAULT_TOPICS: [&str; 3] = ["gaming", "food review", "funny moments"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedRequest {
    pub topics: Vec<String>,
    pub custom_slang: Vec<String>,
    pub shorts_per_topic: u32,
    pub comments_per_short: u32,
}

impl Default for FeedRequest {
    fn default() -> Self {
        Self {
            topics: DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect(),
            custom_slang: Vec::new(),
            shorts_per_topic: 10,
            comments_per_short: 50,
        }
    }
}

impl FeedRequest {
    /// Trims, lowercases and dedups topics and custom slang. An empty topic
    /// list becomes [`DEFAULT_TOPICS`].
    pub fn normalized(mut self) -> Self {
        self.topics = normalize_terms(self.topics);
        if self.topics.is_empty() {
            self.topics = Self::default().topics;
        }
        self.custom_slang = normalize_terms(self.custom_slang);
        self
    }
}

fn normalize_terms(terms: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(terms.len());
    for term in terms {
        let term = term.trim().to_lowercase();
        if !term.is_empty() && !out.contains(&term) {
            out.push(term);
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    pub video_title: String,
    pub video_description: String,
    pub user_comment: String,
    pub target_language: String,
    pub video_view_count: u64,
    pub available_slang: Vec<String>,
    pub forbidden_slang: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Evaluation {
    pub score: i64,
    pub grammar_score: i64,
    pub context_score: i64,
    pub naturalness_score: i64,
    pub correction: String,
    pub mistakes: Vec<String>,
    pub good_parts: Vec<String>,
    pub likes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondRequest {
    pub user_comment: String,
    pub score: i64,
    pub mistakes: Vec<String>,
    pub correction: String,
    pub video_title: String,
    pub target_language: String,
    pub available_slang: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiResponse {
    pub ai_comment: String,
    pub author_name: String,
    pub likes: i64,
}

#[derive(Debug, Deserialize)]
struct RespondResponse {
    responses: Vec<AiResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainRequest {
    pub comment_text: String,
    pub video_title: String,
    pub video_description: String,
    pub detected_slang: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlangBreakdown {
    pub term: String,
    pub definition: String,
    pub usage: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub translation: String,
    #[serde(default)]
    pub slang_breakdown: Vec<SlangBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefineRequest {
    pub word: String,
    pub context: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordDefinition {
    pub word: String,
    pub definition: String,
    pub example: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestRequest {
    pub learned_terms: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlangSuggestion {
    pub term: String,
    pub definition: String,
    pub category: String,
    pub reason: String,
}

#[derive(Debug, Deserialize)]
struct SuggestResponse {
    #[serde(default)]
    suggestions: Vec<SlangSuggestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslateRequest {
    pub video_id: String,
    pub target_language: String,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translated_text: String,
    #[serde(default)]
    audio_base64: String,
}

/// A translated transcript with its decoded narration audio.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoTranslation {
    pub text: String,
    pub audio: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshRequest {
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DiscoveredSlang {
    Term(String),
    Detailed {
        term: String,
        #[serde(default)]
        definition: String,
    },
}

impl DiscoveredSlang {
    pub fn term(&self) -> &str {
        match self {
            DiscoveredSlang::Term(term) | DiscoveredSlang::Detailed { term, .. } => term,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RefreshOutcome {
    pub total_slang_terms: u64,
    pub new_slang_discovered: Vec<DiscoveredSlang>,
}

#[derive(Debug, Deserialize)]
struct SlangStats {
    #[serde(default)]
    total_terms: u64,
}

// --- Gateway ---

/// The remote collaborator behind every network action of the client.
pub trait EvaluationGateway {
    /// `None` asks for the backend's default feed (`GET`).
    fn fetch_videos(&self, request: Option<&FeedRequest>) -> Result<Vec<Video>, GatewayError>;
    fn evaluate(&self, request: &EvaluateRequest) -> Result<Evaluation, GatewayError>;
    fn respond(&self, request: &RespondRequest) -> Result<Vec<AiResponse>, GatewayError>;
    fn explain_comment(&self, request: &ExplainRequest) -> Result<Explanation, GatewayError>;
    fn define_word(&self, request: &DefineRequest) -> Result<WordDefinition, GatewayError>;
    fn suggest_slang(&self, request: &SuggestRequest) -> Result<Vec<SlangSuggestion>, GatewayError>;
    fn translate_video(&self, request: &TranslateRequest) -> Result<VideoTranslation, GatewayError>;
    fn refresh(&self, request: &RefreshRequest) -> Result<RefreshOutcome, GatewayError>;
    fn slang_total(&self) -> Result<u64, GatewayError>;
}

/// JSON-over-HTTP implementation backed by a blocking reqwest client.
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| GatewayError::Transport {
                path: base_url.to_string(),
                source,
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, GatewayError> {
        tracing::debug!(path, "POST");
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .map_err(|source| GatewayError::Transport {
                path: path.to_string(),
                source,
            })?;
        decode(path, response)
    }

    fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, GatewayError> {
        tracing::debug!(path, "GET");
        let response = self
            .client
            .get(self.url(path))
            .send()
            .map_err(|source| GatewayError::Transport {
                path: path.to_string(),
                source,
            })?;
        decode(path, response)
    }
}

fn decode<R: DeserializeOwned>(path: &str, response: Response) -> Result<R, GatewayError> {
    let status = response.status();
    if !status.is_success() {
        return Err(GatewayError::Status {
            path: path.to_string(),
            status: status.as_u16(),
        });
    }
    let body = response.text().map_err(|source| GatewayError::Transport {
        path: path.to_string(),
        source,
    })?;
    serde_json::from_str(&body).map_err(|e| GatewayError::Malformed {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

impl EvaluationGateway for HttpGateway {
    fn fetch_videos(&self, request: Option<&FeedRequest>) -> Result<Vec<Video>, GatewayError> {
        match request {
            Some(request) => self.post(VIDEOS_PATH, request),
            None => self.get(VIDEOS_PATH),
        }
    }

    fn evaluate(&self, request: &EvaluateRequest) -> Result<Evaluation, GatewayError> {
        self.post(EVALUATE_PATH, request)
    }

    fn respond(&self, request: &RespondRequest) -> Result<Vec<AiResponse>, GatewayError> {
        let response: RespondResponse = self.post(RESPOND_PATH, request)?;
        Ok(response.responses)
    }

    fn explain_comment(&self, request: &ExplainRequest) -> Result<Explanation, GatewayError> {
        self.post(EXPLAIN_PATH, request)
    }

    fn define_word(&self, request: &DefineRequest) -> Result<WordDefinition, GatewayError> {
        self.post(DEFINE_PATH, request)
    }

    fn suggest_slang(&self, request: &SuggestRequest) -> Result<Vec<SlangSuggestion>, GatewayError> {
        let response: SuggestResponse = self.post(SUGGEST_PATH, request)?;
        Ok(response.suggestions)
    }

    fn translate_video(&self, request: &TranslateRequest) -> Result<VideoTranslation, GatewayError> {
        let response: TranslateResponse = self.post(TRANSLATE_PATH, request)?;
        let audio = if response.audio_base64.is_empty() {
            Vec::new()
        } else {
            BASE64
                .decode(response.audio_base64.as_bytes())
                .map_err(|e| GatewayError::Malformed {
                    path: TRANSLATE_PATH.to_string(),
                    reason: format!("audio_base64: {e}"),
                })?
        };
        Ok(VideoTranslation {
            text: response.translated_text,
            audio,
        })
    }

    fn refresh(&self, request: &RefreshRequest) -> Result<RefreshOutcome, GatewayError> {
        self.post(REFRESH_PATH, request)
    }

    fn slang_total(&self) -> Result<u64, GatewayError> {
        let stats: SlangStats = self.get(SLANG_PATH)?;
        Ok(stats.total_terms)
    }
}
