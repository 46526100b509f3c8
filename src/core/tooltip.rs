// File: src/core/tooltip.rs
use crate::core::lexicon::Lexicon;
use crate::core::timer::ScheduledTask;
use crate::gateway::WordDefinition;
use std::collections::HashMap;
use std::sync::Arc;

pub const DEFINITION_UNAVAILABLE: &str = "Definition not available";

/// Identifies one definition fetch. Responses with an older ticket are stale.
pub type Ticket = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum TooltipContent {
    Loading,
    Ready(WordDefinition),
    Unavailable,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TooltipState {
    Hidden,
    Loading { word: String },
    Shown { word: String, definition: WordDefinition },
    /// The pointer is over the tooltip panel itself.
    Locked { word: String, content: TooltipContent },
}

/// Emitted by `hover_enter` when the host has to fetch a definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionFetch {
    pub ticket: Ticket,
    pub word: String,
}

/// Hover tooltip for comment words.
///
/// `Hidden → Loading → Shown → Locked`. The grace-period dismissal is a
/// task owned here; every transition that shows or closes the tooltip
/// cancels it first.
#[derive(Debug, Clone)]
pub struct TooltipMachine {
    state: TooltipState,
    /// `Some` while the shown word has no definition yet (or it failed).
    pending: Option<TooltipContent>,
    dismiss: ScheduledTask,
    grace_ms: u64,
    next_ticket: Ticket,
    active_ticket: Option<Ticket>,
    cache: HashMap<String, WordDefinition>,
    lexicon: Arc<Lexicon>,
}

impl TooltipMachine {
    pub fn new(lexicon: Arc<Lexicon>, grace_ms: u64) -> Self {
        Self {
            state: TooltipState::Hidden,
            pending: None,
            dismiss: ScheduledTask::idle(),
            grace_ms,
            next_ticket: 1,
            active_ticket: None,
            cache: HashMap::new(),
            lexicon,
        }
    }

    pub fn state(&self) -> &TooltipState {
        &self.state
    }

    pub fn word(&self) -> Option<&str> {
        match &self.state {
            TooltipState::Hidden => None,
            TooltipState::Loading { word }
            | TooltipState::Shown { word, .. }
            | TooltipState::Locked { word, .. } => Some(word),
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.state, TooltipState::Locked { .. })
    }

    pub fn dismissal_pending(&self) -> bool {
        self.dismiss.is_pending()
    }

    pub fn cached(&self, word: &str) -> Option<&WordDefinition> {
        self.cache.get(&word.to_lowercase())
    }

    /// Definition currently on screen, if any.
    pub fn definition(&self) -> Option<&WordDefinition> {
        match &self.state {
            TooltipState::Shown { definition, .. } => Some(definition),
            TooltipState::Locked {
                content: TooltipContent::Ready(definition),
                ..
            } => Some(definition),
            _ => None,
        }
    }

    pub fn hover_enter(&mut self, word: &str) -> Option<DefinitionFetch> {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return None;
        }
        match &self.state {
            TooltipState::Locked { word: shown, .. } => {
                if *shown != word {
                    tracing::trace!(%word, %shown, "tooltip locked, ignoring hover");
                }
                return None;
            }
            TooltipState::Loading { word: loading } if *loading == word => {
                self.dismiss.cancel();
                return None;
            }
            _ => {}
        }

        self.dismiss.cancel();
        if let Some(definition) = self.lookup(&word) {
            self.active_ticket = None;
            self.pending = None;
            self.state = TooltipState::Shown { word, definition };
            return None;
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.active_ticket = Some(ticket);
        self.pending = Some(TooltipContent::Loading);
        self.state = TooltipState::Loading { word: word.clone() };
        Some(DefinitionFetch { ticket, word })
    }

    pub fn hover_leave(&mut self, now_ms: u64) {
        match self.state {
            TooltipState::Hidden | TooltipState::Locked { .. } => {}
            _ => self.dismiss.schedule(now_ms, self.grace_ms),
        }
    }

    pub fn panel_enter(&mut self) {
        self.dismiss.cancel();
        let state = std::mem::replace(&mut self.state, TooltipState::Hidden);
        self.state = match state {
            TooltipState::Hidden => TooltipState::Hidden,
            TooltipState::Loading { word } => TooltipState::Locked {
                word,
                content: self.pending.clone().unwrap_or(TooltipContent::Loading),
            },
            TooltipState::Shown { word, definition } => TooltipState::Locked {
                word,
                content: TooltipContent::Ready(definition),
            },
            locked @ TooltipState::Locked { .. } => locked,
        };
    }

    pub fn panel_leave(&mut self) {
        if matches!(self.state, TooltipState::Locked { .. }) {
            self.close();
        }
    }

    /// Applies a definition fetch result. Successful results are cached even
    /// when stale; only the active ticket updates what is on screen.
    pub fn resolve(&mut self, ticket: Ticket, word: &str, result: Option<WordDefinition>) {
        let key = word.to_lowercase();
        if let Some(definition) = &result {
            self.cache.insert(key.clone(), definition.clone());
        }
        if self.active_ticket != Some(ticket) || self.word() != Some(key.as_str()) {
            tracing::debug!(ticket, word = %key, "dropping stale definition");
            return;
        }
        self.active_ticket = None;

        let content = match result {
            Some(definition) => TooltipContent::Ready(definition),
            None => TooltipContent::Unavailable,
        };
        let state = std::mem::replace(&mut self.state, TooltipState::Hidden);
        self.state = match (state, content) {
            (TooltipState::Loading { word }, TooltipContent::Ready(definition)) => {
                self.pending = None;
                TooltipState::Shown { word, definition }
            }
            (TooltipState::Loading { word }, content) => {
                self.pending = Some(content);
                TooltipState::Loading { word }
            }
            (TooltipState::Locked { word, .. }, content) => {
                self.pending = None;
                TooltipState::Locked { word, content }
            }
            (other, _) => other,
        };
    }

    /// What the tooltip body should display right now.
    pub fn content(&self) -> Option<TooltipContent> {
        match &self.state {
            TooltipState::Hidden => None,
            TooltipState::Loading { .. } => {
                Some(self.pending.clone().unwrap_or(TooltipContent::Loading))
            }
            TooltipState::Shown { definition, .. } => {
                Some(TooltipContent::Ready(definition.clone()))
            }
            TooltipState::Locked { content, .. } => Some(content.clone()),
        }
    }

    pub fn tick(&mut self, now_ms: u64) {
        if self.dismiss.fire_if_due(now_ms) && !self.is_locked() {
            self.close();
        }
    }

    /// Unconditional close: hides, unlocks and drops the pending dismissal.
    pub fn close(&mut self) {
        self.dismiss.cancel();
        self.active_ticket = None;
        self.pending = None;
        self.state = TooltipState::Hidden;
    }

    fn lookup(&self, word: &str) -> Option<WordDefinition> {
        if let Some(definition) = self.cache.get(word) {
            return Some(definition.clone());
        }
        self.lexicon.define(word).map(|slang| WordDefinition {
            word: word.to_string(),
            definition: slang.definition.clone(),
            example: slang.example.clone(),
        })
    }
}
