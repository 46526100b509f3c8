// File: tests/session.rs
use slang_core::config::AppConfig;
use slang_core::core::lexicon::Lexicon;
use slang_core::core::tokenizer::Token;
use slang_core::core::types::{Video, VocabSet};
use slang_core::error::GatewayError;
use slang_core::gateway::*;
use slang_core::persistence::FileStorage;
use slang_core::SlangEngine;
use std::path::Path;
use std::sync::Arc;

/// A backend that is never reachable.
struct Offline;

fn offline<T>() -> Result<T, GatewayError> {
    Err(GatewayError::Unavailable("offline".into()))
}

impl EvaluationGateway for Offline {
    fn fetch_videos(&self, _: Option<&FeedRequest>) -> Result<Vec<Video>, GatewayError> {
        offline()
    }
    fn evaluate(&self, _: &EvaluateRequest) -> Result<Evaluation, GatewayError> {
        offline()
    }
    fn respond(&self, _: &RespondRequest) -> Result<Vec<AiResponse>, GatewayError> {
        offline()
    }
    fn explain_comment(&self, _: &ExplainRequest) -> Result<Explanation, GatewayError> {
        offline()
    }
    fn define_word(&self, _: &DefineRequest) -> Result<WordDefinition, GatewayError> {
        offline()
    }
    fn suggest_slang(&self, _: &SuggestRequest) -> Result<Vec<SlangSuggestion>, GatewayError> {
        offline()
    }
    fn translate_video(&self, _: &TranslateRequest) -> Result<VideoTranslation, GatewayError> {
        offline()
    }
    fn refresh(&self, _: &RefreshRequest) -> Result<RefreshOutcome, GatewayError> {
        offline()
    }
    fn slang_total(&self) -> Result<u64, GatewayError> {
        offline()
    }
}

fn open(dir: &Path) -> SlangEngine {
    let mut engine = SlangEngine::new(
        AppConfig::default(),
        Arc::new(Lexicon::builtin().clone()),
        Box::new(Offline),
        Box::new(FileStorage::new(dir)),
    );
    engine.load_feed(vec![Video {
        video_id: "v1".into(),
        title: "Skate fails".into(),
        ..Video::default()
    }]);
    engine
}

fn flags(tokens: &[Token], term: &str) -> Option<(bool, bool)> {
    tokens.iter().find_map(|token| match token {
        Token::Word { term: t, known, learned, .. } if t == term => Some((*known, *learned)),
        _ => None,
    })
}

#[test]
fn vocabulary_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut engine = open(dir.path());
        engine.hover_word("rizz", "");
        assert!(engine.classify("rizz", VocabSet::Learning));
        engine.hover_word("mid", "");
        assert!(engine.classify("mid", VocabSet::Known));
    }

    let engine = open(dir.path());
    let entry = engine.vocabulary().entry("rizz").unwrap();
    assert_eq!(entry.video_title, "Skate fails");
    assert_eq!(entry.video_id, "v1");
    assert!(engine.vocabulary().is_known("mid"));

    let tokens = engine.tokenize("rizz is mid, ratio");
    assert_eq!(flags(&tokens, "rizz"), Some((false, true)));
    assert_eq!(flags(&tokens, "mid"), Some((true, false)));
    assert_eq!(flags(&tokens, "ratio"), Some((false, false)));
}

#[test]
fn moving_a_word_between_sets_is_persisted_once_reloaded() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut engine = open(dir.path());
        engine.hover_word("aura", "");
        engine.classify("aura", VocabSet::Known);
        assert!(engine.promote_term("aura", VocabSet::Learning));
    }

    let engine = open(dir.path());
    assert!(engine.vocabulary().is_learning("aura"));
    assert!(!engine.vocabulary().is_known("aura"));
    assert_eq!(
        engine.vocabulary().entry("aura").unwrap().definition,
        "Points representing someone's vibe or presence"
    );
}

#[test]
fn offline_backend_degrades_to_placeholders() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = open(dir.path());

    assert!(engine.fetch_feed(None).is_err());
    assert_eq!(engine.videos().len(), 1);

    engine.set_draft("lowkey bussin");
    assert!(engine.submit_comment(0));
    assert!(!engine.comments().is_submitting());
    assert!(engine.comments().feedback().is_some());

    engine.load_suggestions();
    assert!(engine.suggestions().is_empty());
    assert!(!engine.translate_current());
}
