// File: src/core/engine.rs
use crate::config::AppConfig;
use crate::core::comments::{CommentController, ExplanationStep};
use crate::core::gesture::{GestureInterpreter, NavCommand};
use crate::core::lexicon::Lexicon;
use crate::core::navigator::FeedNavigator;
use crate::core::timer::Banner;
use crate::core::tokenizer::{Token, Tokenizer};
use crate::core::tooltip::{DefinitionFetch, TooltipMachine};
use crate::core::types::{SourceVideo, VocabSet, Video};
use crate::error::GatewayError;
use crate::gateway::{
    AiResponse, DefineRequest, EvaluateRequest, Evaluation, EvaluationGateway, ExplainRequest,
    FeedRequest, RefreshRequest, RespondRequest, SlangSuggestion, SuggestRequest,
    TranslateRequest, VideoTranslation, WordDefinition,
};
use crate::learning::{NewTerm, VocabularyStore, PLACEHOLDER_DEFINITION};
use crate::persistence::SessionStorage;
use std::sync::Arc;

/// Outcome of the "refresh slang" action, shown as a self-hiding notice.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshNotice {
    Discovered(Vec<String>),
    UpToDate,
    Failed(String),
}

/// The client engine: owns the feed, the vocabulary and every piece of
/// per-video UI state, and routes user events between them.
///
/// Hosts feed it events plus the current clock (`now_ms`) and call
/// [`SlangEngine::tick`] regularly so scheduled tasks fire.
pub struct SlangEngine {
    config: AppConfig,
    lexicon: Arc<Lexicon>,
    tokenizer: Tokenizer,
    gateway: Box<dyn EvaluationGateway>,
    vocabulary: VocabularyStore,
    videos: Vec<Video>,
    navigator: FeedNavigator,
    gestures: GestureInterpreter,
    tooltip: TooltipMachine,
    comments: CommentController,
    translation: Option<VideoTranslation>,
    refresh_notice: Banner<RefreshNotice>,
    slang_total: Option<u64>,
    suggestions: Vec<SlangSuggestion>,
}

impl SlangEngine {
    pub fn new(
        config: AppConfig,
        lexicon: Arc<Lexicon>,
        gateway: Box<dyn EvaluationGateway>,
        storage: Box<dyn SessionStorage>,
    ) -> Self {
        Self {
            tokenizer: Tokenizer::new(Arc::clone(&lexicon)),
            tooltip: TooltipMachine::new(Arc::clone(&lexicon), config.tooltip_grace_ms),
            gestures: GestureInterpreter::new(config.swipe_threshold),
            comments: CommentController::new(config.comment_timings()),
            vocabulary: VocabularyStore::load(storage),
            videos: Vec::new(),
            navigator: FeedNavigator::default(),
            translation: None,
            refresh_notice: Banner::default(),
            slang_total: None,
            suggestions: Vec::new(),
            gateway,
            lexicon,
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &VocabularyStore {
        &self.vocabulary
    }

    pub fn tooltip(&self) -> &TooltipMachine {
        &self.tooltip
    }

    pub fn comments(&self) -> &CommentController {
        &self.comments
    }

    // --- feed ---

    pub fn load_feed(&mut self, videos: Vec<Video>) {
        tracing::info!(count = videos.len(), "feed loaded");
        self.navigator.reset(videos.len());
        self.videos = videos;
        self.reset_video_state();
    }

    /// Fetches the feed; `None` asks for the backend's default feed.
    pub fn fetch_feed(&mut self, request: Option<&FeedRequest>) -> Result<usize, GatewayError> {
        let videos = self.gateway.fetch_videos(request).map_err(|e| {
            tracing::warn!(error = %e, "could not load videos");
            e
        })?;
        let count = videos.len();
        self.load_feed(videos);
        Ok(count)
    }

    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    pub fn current_index(&self) -> usize {
        self.navigator.index()
    }

    pub fn current_video(&self) -> Option<&Video> {
        self.videos.get(self.navigator.index())
    }

    pub fn go_to(&mut self, index: usize) -> bool {
        let moved = self.navigator.go_to(index);
        if moved {
            self.reset_video_state();
        }
        moved
    }

    pub fn advance(&mut self) -> bool {
        let moved = self.navigator.advance();
        if moved {
            self.reset_video_state();
        }
        moved
    }

    pub fn retreat(&mut self) -> bool {
        let moved = self.navigator.retreat();
        if moved {
            self.reset_video_state();
        }
        moved
    }

    fn apply(&mut self, command: Option<NavCommand>) -> bool {
        match command {
            Some(NavCommand::Advance) => self.advance(),
            Some(NavCommand::Retreat) => self.retreat(),
            None => false,
        }
    }

    pub fn wheel(&mut self, delta_y: f32) -> bool {
        let command = self.gestures.wheel(delta_y, self.comments.panel_open());
        self.apply(command)
    }

    pub fn touch_start(&mut self, y: f32) {
        self.gestures.touch_start(y, self.comments.panel_open());
    }

    pub fn touch_move(&mut self, y: f32) {
        self.gestures.touch_move(y, self.comments.panel_open());
    }

    pub fn touch_end(&mut self) -> bool {
        let command = self.gestures.touch_end(self.comments.panel_open());
        self.apply(command)
    }

    fn reset_video_state(&mut self) {
        self.comments.reset_for_video();
        self.translation = None;
        self.tooltip.close();
    }

    // --- comment panel ---

    pub fn open_comments(&mut self) {
        self.comments.open_panel();
    }

    pub fn close_comments(&mut self) {
        self.comments.close_panel();
        self.tooltip.close();
    }

    pub fn set_draft(&mut self, text: &str) {
        self.comments.set_draft(text);
    }

    /// The first few slang terms detected in the current video.
    pub fn suggested_slang(&self) -> Vec<&str> {
        self.current_video()
            .map(|v| {
                v.unique_slang_terms
                    .iter()
                    .take(self.config.suggested_slang_count)
                    .map(String::as_str)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn add_slang_to_draft(&mut self, term: &str) {
        self.comments.add_slang_to_draft(term);
    }

    /// Evaluates the draft, then asks for AI replies. Returns `false` when
    /// nothing was sent (blank draft, submission in flight, empty feed).
    pub fn submit_comment(&mut self, now_ms: u64) -> bool {
        let Some(video) = self.videos.get(self.navigator.index()) else {
            return false;
        };
        let text = self.comments.draft().to_string();
        let Some(ticket) = self.comments.begin_submit(&text) else {
            return false;
        };
        let result = evaluate_and_respond(
            self.gateway.as_ref(),
            &self.config,
            &self.lexicon,
            video,
            &text,
        );
        self.comments.finish_submit(ticket, result, now_ms);
        true
    }

    // --- explanations and vocabulary ---

    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        self.tokenizer.tokenize(text, &self.vocabulary)
    }

    /// Explains a comment of the current video, or toggles an existing
    /// explanation. `None` when the comment is not on screen.
    pub fn explain_comment(&mut self, comment_id: &str) -> Option<ExplanationStep> {
        let video = self.videos.get(self.navigator.index())?;
        let comment = video.comment(comment_id)?;

        let step = self.comments.request_explanation(comment_id);
        if step != ExplanationStep::Fetch {
            return Some(step);
        }
        let request = ExplainRequest {
            comment_text: comment.text.clone(),
            video_title: video.display_title().to_string(),
            video_description: video.description.clone(),
            detected_slang: comment.detected_slang.clone(),
        };
        let result = self.gateway.explain_comment(&request);
        let source = SourceVideo::from(video);

        if let Some(explanation) = self.comments.finish_explanation(comment_id, result) {
            let mut added = 0usize;
            for item in explanation.slang_breakdown {
                let new_term = NewTerm {
                    term: item.term,
                    definition: item.definition,
                    example: item.usage,
                    source: source.clone(),
                };
                if self.vocabulary.add_to_learning(new_term) {
                    added += 1;
                }
            }
            tracing::debug!(comment_id, added, "merged slang breakdown");
        }
        Some(step)
    }

    /// Hover-enter on a word. Returns the fetch the host must perform, if any.
    pub fn hover_enter(&mut self, word: &str) -> Option<DefinitionFetch> {
        self.tooltip.hover_enter(word)
    }

    /// Performs a definition fetch and feeds the result back.
    pub fn resolve_definition(&mut self, fetch: &DefinitionFetch, context: &str) {
        let request = DefineRequest {
            word: fetch.word.clone(),
            context: context.to_string(),
        };
        let result = match self.gateway.define_word(&request) {
            Ok(definition) => Some(definition),
            Err(e) => {
                tracing::warn!(word = %fetch.word, error = %e, "definition lookup failed");
                None
            }
        };
        self.tooltip.resolve(fetch.ticket, &fetch.word, result);
    }

    /// Hover-enter followed by an immediate fetch when one is needed.
    pub fn hover_word(&mut self, word: &str, context: &str) {
        if let Some(fetch) = self.hover_enter(word) {
            self.resolve_definition(&fetch, context);
        }
    }

    pub fn hover_leave(&mut self, now_ms: u64) {
        self.tooltip.hover_leave(now_ms);
    }

    pub fn tooltip_panel_enter(&mut self) {
        self.tooltip.panel_enter();
    }

    pub fn tooltip_panel_leave(&mut self) {
        self.tooltip.panel_leave();
    }

    /// Files `word` under `target` (moving it from the other set if needed)
    /// and closes the tooltip, locked or not.
    pub fn classify(&mut self, word: &str, target: VocabSet) -> bool {
        let details = self.describe(word);
        let in_other = match target {
            VocabSet::Learning => self.vocabulary.is_known(word),
            VocabSet::Known => self.vocabulary.is_learning(word),
        };
        let changed = if in_other {
            self.vocabulary.promote(word, target, Some(details))
        } else {
            match target {
                VocabSet::Learning => self.vocabulary.add_to_learning(details),
                VocabSet::Known => self.vocabulary.add_to_known(word),
            }
        };
        self.tooltip.close();
        changed
    }

    pub fn remove_term(&mut self, term: &str, from: VocabSet) -> bool {
        self.vocabulary.remove(term, from)
    }

    pub fn promote_term(&mut self, term: &str, to: VocabSet) -> bool {
        let details = self.describe(term);
        self.vocabulary.promote(term, to, Some(details))
    }

    /// Best local knowledge about a word: fetched definition, then the
    /// lexicon, then a placeholder.
    fn describe(&self, word: &str) -> NewTerm {
        let (definition, example) = match self.tooltip.cached(word) {
            Some(WordDefinition { definition, example, .. }) => (definition.clone(), example.clone()),
            None => match self.lexicon.define(word) {
                Some(slang) => (slang.definition.clone(), slang.example.clone()),
                None => (PLACEHOLDER_DEFINITION.to_string(), String::new()),
            },
        };
        NewTerm {
            term: word.trim().to_string(),
            definition,
            example,
            source: self.current_video().map(SourceVideo::from).unwrap_or_default(),
        }
    }

    // --- translation, refresh, suggestions ---

    pub fn translation(&self) -> Option<&VideoTranslation> {
        self.translation.as_ref()
    }

    pub fn translate_current(&mut self) -> bool {
        let Some(video) = self.current_video() else {
            return false;
        };
        let request = TranslateRequest {
            video_id: video.video_id.clone(),
            target_language: self.config.target_language.clone(),
        };
        match self.gateway.translate_video(&request) {
            Ok(translation) => {
                tracing::info!(bytes = translation.audio.len(), "translation ready");
                self.translation = Some(translation);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "translation failed");
                self.translation = None;
                false
            }
        }
    }

    pub fn slang_total(&self) -> Option<u64> {
        self.slang_total
    }

    pub fn load_slang_total(&mut self) {
        match self.gateway.slang_total() {
            Ok(total) => self.slang_total = Some(total),
            Err(e) => tracing::warn!(error = %e, "could not load slang count"),
        }
    }

    pub fn refresh_notice(&self) -> Option<&RefreshNotice> {
        self.refresh_notice.current()
    }

    pub fn refresh_slang(&mut self, now_ms: u64) {
        let request = RefreshRequest {
            topics: self.config.feed.topics.clone(),
        };
        match self.gateway.refresh(&request) {
            Ok(outcome) => {
                self.slang_total = Some(outcome.total_slang_terms);
                if outcome.new_slang_discovered.is_empty() {
                    self.refresh_notice.show(
                        RefreshNotice::UpToDate,
                        now_ms,
                        self.config.refresh_empty_banner_ms,
                    );
                } else {
                    let terms = outcome
                        .new_slang_discovered
                        .iter()
                        .map(|d| d.term().to_string())
                        .collect();
                    self.refresh_notice.show(
                        RefreshNotice::Discovered(terms),
                        now_ms,
                        self.config.refresh_found_banner_ms,
                    );
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "slang refresh failed");
                self.refresh_notice.show(
                    RefreshNotice::Failed(e.to_string()),
                    now_ms,
                    self.config.refresh_error_banner_ms,
                );
            }
        }
    }

    pub fn suggestions(&self) -> &[SlangSuggestion] {
        &self.suggestions
    }

    /// Asks for new terms based on the learning set. Empty on failure.
    pub fn load_suggestions(&mut self) {
        if self.vocabulary.entries().is_empty() {
            self.suggestions.clear();
            return;
        }
        let request = SuggestRequest {
            learned_terms: self.vocabulary.learning_terms(),
        };
        self.suggestions = self.gateway.suggest_slang(&request).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load suggestions");
            Vec::new()
        });
    }

    // --- clock ---

    pub fn tick(&mut self, now_ms: u64) {
        self.tooltip.tick(now_ms);
        self.comments.tick(now_ms);
        self.refresh_notice.tick(now_ms);
    }
}

/// Evaluate, then generate replies. Stops at the first failure.
fn evaluate_and_respond(
    gateway: &dyn EvaluationGateway,
    config: &AppConfig,
    lexicon: &Lexicon,
    video: &Video,
    text: &str,
) -> Result<(Evaluation, Vec<AiResponse>), GatewayError> {
    let forbidden_slang = lexicon
        .slang_terms()
        .filter(|term| {
            !video
                .unique_slang_terms
                .iter()
                .any(|t| t.eq_ignore_ascii_case(term))
        })
        .map(str::to_string)
        .collect();

    let evaluation = gateway.evaluate(&EvaluateRequest {
        video_title: video.display_title().to_string(),
        video_description: video.description.clone(),
        user_comment: text.to_string(),
        target_language: config.target_language.clone(),
        video_view_count: video.view_count,
        available_slang: video.unique_slang_terms.clone(),
        forbidden_slang,
    })?;

    let responses = gateway.respond(&RespondRequest {
        user_comment: text.to_string(),
        score: evaluation.score,
        mistakes: evaluation.mistakes.clone(),
        correction: evaluation.correction.clone(),
        video_title: video.display_title().to_string(),
        target_language: config.target_language.clone(),
        available_slang: video.unique_slang_terms.clone(),
    })?;
    Ok((evaluation, responses))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::comments::{FeedbackKind, SUBMIT_FALLBACK};
    use crate::core::tooltip::TooltipContent;
    use crate::core::types::Comment;
    use crate::gateway::{DiscoveredSlang, Explanation, RefreshOutcome, SlangBreakdown};
    use crate::persistence::MemoryStorage;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Canned backend whose failures are switched on from the test body.
    #[derive(Default)]
    struct Script {
        failing: Cell<bool>,
        calls: RefCell<Vec<&'static str>>,
        last_evaluate: RefCell<Option<EvaluateRequest>>,
        explanation: RefCell<Explanation>,
        discovered: RefCell<Vec<DiscoveredSlang>>,
    }

    struct ScriptedGateway(Rc<Script>);

    impl ScriptedGateway {
        fn call(&self, name: &'static str) -> Result<(), GatewayError> {
            self.0.calls.borrow_mut().push(name);
            if self.0.failing.get() {
                Err(GatewayError::Unavailable(format!("{name} offline")))
            } else {
                Ok(())
            }
        }
    }

    impl EvaluationGateway for ScriptedGateway {
        fn fetch_videos(&self, _: Option<&FeedRequest>) -> Result<Vec<Video>, GatewayError> {
            self.call("videos")?;
            Ok(feed())
        }

        fn evaluate(&self, request: &EvaluateRequest) -> Result<Evaluation, GatewayError> {
            self.call("evaluate")?;
            *self.0.last_evaluate.borrow_mut() = Some(request.clone());
            Ok(Evaluation {
                score: 85,
                likes: 12,
                ..Evaluation::default()
            })
        }

        fn respond(&self, _: &RespondRequest) -> Result<Vec<AiResponse>, GatewayError> {
            self.call("respond")?;
            Ok(vec![AiResponse {
                ai_comment: "W take".into(),
                author_name: "sk8r".into(),
                likes: 3,
            }])
        }

        fn explain_comment(&self, _: &ExplainRequest) -> Result<Explanation, GatewayError> {
            self.call("explain")?;
            Ok(self.0.explanation.borrow().clone())
        }

        fn define_word(&self, request: &DefineRequest) -> Result<WordDefinition, GatewayError> {
            self.call("define")?;
            Ok(WordDefinition {
                word: request.word.clone(),
                definition: format!("meaning of {}", request.word),
                example: String::new(),
            })
        }

        fn suggest_slang(&self, _: &SuggestRequest) -> Result<Vec<SlangSuggestion>, GatewayError> {
            self.call("suggest")?;
            Ok(vec![SlangSuggestion {
                term: "aura".into(),
                ..SlangSuggestion::default()
            }])
        }

        fn translate_video(&self, _: &TranslateRequest) -> Result<VideoTranslation, GatewayError> {
            self.call("translate")?;
            Ok(VideoTranslation {
                text: "hola".into(),
                audio: vec![1, 2, 3],
            })
        }

        fn refresh(&self, _: &RefreshRequest) -> Result<RefreshOutcome, GatewayError> {
            self.call("refresh")?;
            Ok(RefreshOutcome {
                total_slang_terms: 140,
                new_slang_discovered: self.0.discovered.borrow().clone(),
            })
        }

        fn slang_total(&self) -> Result<u64, GatewayError> {
            self.call("slang")?;
            Ok(120)
        }
    }

    fn video(id: &str, slang: &[&str]) -> Video {
        Video {
            video_id: id.to_string(),
            title: format!("clip {id}"),
            unique_slang_terms: slang.iter().map(|s| s.to_string()).collect(),
            comments_with_slang: vec![Comment {
                comment_id: format!("{id}-c1"),
                author: "viewer".into(),
                text: "gyat that was bussin fr".into(),
                like_count: 10,
                detected_slang: vec!["gyat".into(), "bussin".into(), "fr".into()],
            }],
            ..Video::default()
        }
    }

    fn feed() -> Vec<Video> {
        vec![
            video("a", &["gyat", "bussin", "fr"]),
            video("b", &["rizz"]),
            video("c", &[]),
        ]
    }

    fn engine() -> (SlangEngine, Rc<Script>) {
        let script = Rc::new(Script::default());
        let mut engine = SlangEngine::new(
            AppConfig::default(),
            Arc::new(Lexicon::builtin().clone()),
            Box::new(ScriptedGateway(Rc::clone(&script))),
            Box::new(MemoryStorage::new()),
        );
        engine.load_feed(feed());
        (engine, script)
    }

    #[test]
    fn navigation_is_clamped_to_the_feed() {
        let (mut e, _) = engine();
        assert_eq!(e.current_index(), 0);
        assert!(!e.retreat());
        assert!(e.advance());
        assert!(e.advance());
        assert!(!e.advance());
        assert_eq!(e.current_index(), 2);
        assert!(e.retreat());
        assert_eq!(e.current_index(), 1);
        assert!(!e.go_to(3));
        assert!(e.go_to(0));
        assert_eq!(e.current_video().unwrap().video_id, "a");
    }

    #[test]
    fn empty_feed_ignores_navigation_and_submission() {
        let (mut e, script) = engine();
        e.load_feed(Vec::new());
        assert!(e.current_video().is_none());
        assert!(!e.advance());
        e.set_draft("no cap");
        assert!(!e.submit_comment(0));
        assert!(script.calls.borrow().is_empty());
    }

    #[test]
    fn moving_to_another_video_resets_its_state() {
        let (mut e, _) = engine();
        e.open_comments();
        e.set_draft("lowkey fire");
        assert!(e.translate_current());
        e.hover_word("bussin", "");
        assert!(e.tooltip().word().is_some());

        assert!(e.advance());
        assert!(!e.comments().panel_open());
        assert_eq!(e.comments().draft(), "");
        assert!(e.translation().is_none());
        assert!(e.tooltip().word().is_none());
    }

    #[test]
    fn gestures_are_swallowed_while_comments_are_open() {
        let (mut e, _) = engine();
        e.open_comments();
        assert!(!e.wheel(300.0));
        e.touch_start(400.0);
        e.touch_move(100.0);
        assert!(!e.touch_end());
        assert_eq!(e.current_index(), 0);
        assert!(e.comments().panel_open());

        e.close_comments();
        e.touch_start(400.0);
        e.touch_move(300.0);
        assert!(e.touch_end());
        assert_eq!(e.current_index(), 1);
        e.touch_start(300.0);
        e.touch_move(330.0);
        assert!(!e.touch_end());
    }

    #[test]
    fn submission_sends_available_and_forbidden_slang() {
        let (mut e, script) = engine();
        e.set_draft("gyat this is bussin");
        assert!(e.submit_comment(1_000));

        let request = script.last_evaluate.borrow().clone().unwrap();
        assert_eq!(request.available_slang, ["gyat", "bussin", "fr"]);
        assert!(request.forbidden_slang.contains(&"rizz".to_string()));
        assert!(!request.forbidden_slang.contains(&"gyat".to_string()));
        assert_eq!(*script.calls.borrow(), ["evaluate", "respond"]);

        let feedback = e.comments().feedback().unwrap();
        assert_eq!(feedback.kind, FeedbackKind::Success);
        assert_eq!(e.comments().submitted().len(), 1);
        assert_eq!(e.comments().submitted()[0].ai_responses[0].ai_comment, "W take");
        e.tick(9_000);
        assert!(e.comments().feedback().is_none());
    }

    #[test]
    fn failed_submission_shows_fallback_and_unlocks_input() {
        let (mut e, script) = engine();
        script.failing.set(true);
        e.set_draft("no cap");
        assert!(e.submit_comment(0));

        assert!(!e.comments().is_submitting());
        assert_eq!(e.comments().feedback().unwrap().message, SUBMIT_FALLBACK);
        assert_eq!(*script.calls.borrow(), ["evaluate"]);
        e.tick(4_999);
        assert!(e.comments().feedback().is_some());
        e.tick(5_000);
        assert!(e.comments().feedback().is_none());
    }

    #[test]
    fn explanation_merges_breakdown_once() {
        let (mut e, script) = engine();
        *script.explanation.borrow_mut() = Explanation {
            translation: "wow, that was great for real".into(),
            slang_breakdown: vec![
                SlangBreakdown {
                    term: "gyat".into(),
                    definition: "surprise".into(),
                    usage: "gyat!".into(),
                },
                SlangBreakdown {
                    term: "Gyat".into(),
                    definition: "duplicate".into(),
                    usage: String::new(),
                },
            ],
        };

        assert_eq!(e.explain_comment("a-c1"), Some(ExplanationStep::Fetch));
        let entries = e.vocabulary().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].definition, "surprise");
        assert_eq!(entries[0].video_title, "clip a");

        assert_eq!(
            e.explain_comment("a-c1"),
            Some(ExplanationStep::Toggled { visible: false })
        );
        assert_eq!(script.calls.borrow().len(), 1);
        assert_eq!(e.explain_comment("missing"), None);
    }

    #[test]
    fn classify_from_a_locked_tooltip_closes_it() {
        let (mut e, script) = engine();
        e.hover_word("bussin", "");
        e.tooltip_panel_enter();
        assert!(e.tooltip().is_locked());

        assert!(e.classify("bussin", VocabSet::Learning));
        assert!(e.tooltip().word().is_none());
        assert_eq!(e.vocabulary().entry("bussin").unwrap().definition, "Really good, excellent");

        e.hover_word("bussin", "");
        assert!(e.classify("bussin", VocabSet::Known));
        assert!(e.vocabulary().is_known("bussin"));
        assert!(!e.vocabulary().is_learning("bussin"));
        assert!(script.calls.borrow().is_empty());
    }

    #[test]
    fn unknown_words_are_fetched_and_cached() {
        let (mut e, script) = engine();
        e.hover_word("yapping", "so much yapping");
        assert!(matches!(e.tooltip().content(), Some(TooltipContent::Ready(_))));

        e.hover_leave(100);
        e.tick(249);
        assert!(e.tooltip().word().is_some());
        e.tick(250);
        assert!(e.tooltip().word().is_none());

        e.hover_word("yapping", "");
        assert_eq!(*script.calls.borrow(), ["define"]);
        assert!(e.classify("yapping", VocabSet::Learning));
        assert_eq!(e.vocabulary().entry("yapping").unwrap().definition, "meaning of yapping");
    }

    #[test]
    fn failed_definition_shows_unavailable() {
        let (mut e, script) = engine();
        script.failing.set(true);
        e.hover_word("yapping", "");
        assert_eq!(e.tooltip().content(), Some(TooltipContent::Unavailable));
        assert!(e.classify("yapping", VocabSet::Learning));
        assert_eq!(
            e.vocabulary().entry("yapping").unwrap().definition,
            PLACEHOLDER_DEFINITION
        );
    }

    #[test]
    fn refresh_notice_durations_follow_outcome() {
        let (mut e, script) = engine();
        *script.discovered.borrow_mut() = vec![DiscoveredSlang::Term("delulu".into())];
        e.refresh_slang(0);
        assert_eq!(
            e.refresh_notice(),
            Some(&RefreshNotice::Discovered(vec!["delulu".into()]))
        );
        assert_eq!(e.slang_total(), Some(140));
        e.tick(7_999);
        assert!(e.refresh_notice().is_some());
        e.tick(8_000);
        assert!(e.refresh_notice().is_none());

        script.discovered.borrow_mut().clear();
        e.refresh_slang(10_000);
        assert_eq!(e.refresh_notice(), Some(&RefreshNotice::UpToDate));
        e.tick(13_000);
        assert!(e.refresh_notice().is_none());

        script.failing.set(true);
        e.refresh_slang(20_000);
        assert!(matches!(e.refresh_notice(), Some(RefreshNotice::Failed(_))));
        e.tick(24_999);
        assert!(e.refresh_notice().is_some());
        e.tick(25_000);
        assert!(e.refresh_notice().is_none());
    }

    #[test]
    fn suggestions_need_learned_terms_and_fall_back_to_empty() {
        let (mut e, script) = engine();
        e.load_suggestions();
        assert!(e.suggestions().is_empty());
        assert!(script.calls.borrow().is_empty());

        e.hover_word("rizz", "");
        e.classify("rizz", VocabSet::Learning);
        e.load_suggestions();
        assert_eq!(e.suggestions()[0].term, "aura");

        script.failing.set(true);
        e.load_suggestions();
        assert!(e.suggestions().is_empty());
    }

    #[test]
    fn failed_translation_leaves_nothing_shown() {
        let (mut e, script) = engine();
        script.failing.set(true);
        assert!(!e.translate_current());
        assert!(e.translation().is_none());
        e.load_slang_total();
        assert_eq!(e.slang_total(), None);
    }
}
