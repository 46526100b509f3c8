// File: src/core/comments.rs
use crate::core::timer::{Banner, Typewriter};
use crate::core::types::CommentId;
use crate::error::GatewayError;
use crate::gateway::{AiResponse, Evaluation, Explanation};
use std::collections::HashMap;

pub const EXPLANATION_FALLBACK: &str = "Translation not available";
pub const SUBMIT_FALLBACK: &str =
    "Oops! Couldn't evaluate your comment. Check if the backend is running.";

#[derive(Debug, Clone, PartialEq)]
pub enum ExplanationState {
    Loading,
    Explained { explanation: Explanation, visible: bool },
    Failed { message: String, visible: bool },
}

/// What `request_explanation` decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplanationStep {
    /// Host must call the gateway and report back through `finish_explanation`.
    Fetch,
    /// Already resolved; visibility flipped.
    Toggled { visible: bool },
    /// A fetch for this comment is still outstanding.
    InFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub score: i64,
    pub grammar_score: Option<i64>,
    pub context_score: Option<i64>,
    pub naturalness_score: Option<i64>,
    pub message: String,
    pub correction: String,
    pub mistakes: Vec<String>,
    pub good_parts: Vec<String>,
}

impl Feedback {
    fn from_evaluation(evaluation: &Evaluation) -> Self {
        Self {
            kind: FeedbackKind::Success,
            score: evaluation.score,
            grammar_score: Some(evaluation.grammar_score),
            context_score: Some(evaluation.context_score),
            naturalness_score: Some(evaluation.naturalness_score),
            message: score_message(evaluation.score).to_string(),
            correction: evaluation.correction.clone(),
            mistakes: evaluation.mistakes.clone(),
            good_parts: evaluation.good_parts.clone(),
        }
    }

    fn failure() -> Self {
        Self {
            kind: FeedbackKind::Error,
            score: 0,
            grammar_score: None,
            context_score: None,
            naturalness_score: None,
            message: SUBMIT_FALLBACK.to_string(),
            correction: String::new(),
            mistakes: Vec::new(),
            good_parts: Vec::new(),
        }
    }
}

pub fn score_message(score: i64) -> &'static str {
    if score >= 80 {
        "You're cooking! 🔥"
    } else if score >= 50 {
        "Not bad, keep practicing!"
    } else {
        "Keep learning!"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedComment {
    /// Unique within the session.
    pub id: u64,
    pub text: String,
    pub user: String,
    pub likes: i64,
    pub evaluation: Evaluation,
    pub ai_responses: Vec<AiResponse>,
}

/// Handed out by `begin_submit`; must be returned to `finish_submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    generation: u64,
    pub text: String,
}

#[derive(Debug, Clone, Copy)]
pub struct CommentTimings {
    pub success_banner_ms: u64,
    pub error_banner_ms: u64,
    pub typewriter_char_ms: u64,
}

impl Default for CommentTimings {
    fn default() -> Self {
        Self {
            success_banner_ms: 8_000,
            error_banner_ms: 5_000,
            typewriter_char_ms: 30,
        }
    }
}

/// Comment panel, explanations and practice-comment submission.
///
/// The explanation cache lives for the whole session. Everything else is
/// per video and cleared by `reset_for_video`.
#[derive(Debug, Clone, Default)]
pub struct CommentController {
    explanations: HashMap<CommentId, ExplanationState>,
    panel_open: bool,
    draft: String,
    submitting: bool,
    generation: u64,
    submitted: Vec<SubmittedComment>,
    next_submitted_id: u64,
    feedback: Banner<Feedback>,
    typing: Option<Typewriter>,
    timings: CommentTimings,
}

impl CommentController {
    pub fn new(timings: CommentTimings) -> Self {
        Self {
            timings,
            ..Self::default()
        }
    }

    // --- explanations ---

    pub fn explanation(&self, comment_id: &str) -> Option<&ExplanationState> {
        self.explanations.get(comment_id)
    }

    pub fn request_explanation(&mut self, comment_id: &str) -> ExplanationStep {
        match self.explanations.get_mut(comment_id) {
            Some(ExplanationState::Loading) => ExplanationStep::InFlight,
            Some(ExplanationState::Explained { visible, .. })
            | Some(ExplanationState::Failed { visible, .. }) => {
                *visible = !*visible;
                ExplanationStep::Toggled { visible: *visible }
            }
            None => {
                self.explanations
                    .insert(comment_id.to_string(), ExplanationState::Loading);
                ExplanationStep::Fetch
            }
        }
    }

    /// Stores the outcome and returns the explanation on success so the
    /// caller can merge its slang breakdown into the vocabulary.
    pub fn finish_explanation(
        &mut self,
        comment_id: &str,
        result: Result<Explanation, GatewayError>,
    ) -> Option<Explanation> {
        if !matches!(self.explanations.get(comment_id), Some(ExplanationState::Loading)) {
            return None;
        }
        match result {
            Ok(explanation) => {
                self.explanations.insert(
                    comment_id.to_string(),
                    ExplanationState::Explained {
                        explanation: explanation.clone(),
                        visible: true,
                    },
                );
                Some(explanation)
            }
            Err(e) => {
                tracing::warn!(comment_id, error = %e, "explanation failed");
                self.explanations.insert(
                    comment_id.to_string(),
                    ExplanationState::Failed {
                        message: EXPLANATION_FALLBACK.to_string(),
                        visible: true,
                    },
                );
                None
            }
        }
    }

    // --- panel and draft ---

    pub fn panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn open_panel(&mut self) {
        self.panel_open = true;
    }

    pub fn close_panel(&mut self) {
        self.panel_open = false;
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: &str) {
        if !self.submitting {
            self.draft = text.to_string();
        }
    }

    /// Appends a suggested term followed by a space.
    pub fn add_slang_to_draft(&mut self, term: &str) {
        if self.submitting {
            return;
        }
        if !self.draft.is_empty() && !self.draft.ends_with(' ') {
            self.draft.push(' ');
        }
        self.draft.push_str(term);
        self.draft.push(' ');
    }

    // --- submission ---

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submitted(&self) -> &[SubmittedComment] {
        &self.submitted
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.current()
    }

    pub fn begin_submit(&mut self, text: &str) -> Option<SubmitTicket> {
        if text.trim().is_empty() || self.submitting {
            return None;
        }
        self.submitting = true;
        Some(SubmitTicket {
            generation: self.generation,
            text: text.to_string(),
        })
    }

    /// Always clears the submitting flag. A result for a video the user has
    /// since left is dropped.
    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket,
        result: Result<(Evaluation, Vec<AiResponse>), GatewayError>,
        now_ms: u64,
    ) {
        self.submitting = false;
        if ticket.generation != self.generation {
            tracing::debug!("dropping submission result for a previous video");
            return;
        }
        match result {
            Ok((evaluation, ai_responses)) => {
                tracing::info!(score = evaluation.score, "comment evaluated");
                if let Some(first) = ai_responses.first() {
                    self.typing = Some(Typewriter::start(
                        first.ai_comment.clone(),
                        now_ms,
                        self.timings.typewriter_char_ms,
                    ));
                }
                self.feedback.show(
                    Feedback::from_evaluation(&evaluation),
                    now_ms,
                    self.timings.success_banner_ms,
                );
                self.next_submitted_id += 1;
                self.submitted.push(SubmittedComment {
                    id: self.next_submitted_id,
                    text: ticket.text,
                    user: "You".to_string(),
                    likes: evaluation.likes,
                    evaluation,
                    ai_responses,
                });
                self.draft.clear();
            }
            Err(e) => {
                tracing::warn!(error = %e, "comment submission failed");
                self.feedback.show(
                    Feedback::failure(),
                    now_ms,
                    self.timings.error_banner_ms,
                );
            }
        }
    }

    /// Newest AI reply as revealed so far by the typewriter.
    pub fn typing_text(&self, now_ms: u64) -> Option<&str> {
        self.typing.as_ref().map(|t| t.visible(now_ms))
    }

    pub fn reset_for_video(&mut self) {
        self.panel_open = false;
        self.draft.clear();
        self.submitted.clear();
        self.feedback.hide();
        self.typing = None;
        self.generation += 1;
    }

    pub fn tick(&mut self, now_ms: u64) {
        self.feedback.tick(now_ms);
        if self.typing.as_ref().is_some_and(|t| t.is_done(now_ms)) && !self.feedback.is_visible() {
            self.typing = None;
        }
    }
}
