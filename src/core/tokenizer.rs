// File: src/core/tokenizer.rs
use crate::core::lexicon::Lexicon;
use crate::learning::VocabularyStore;
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

const MIN_WORD_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Whitespace, punctuation, stop words and fragments. Rendered as-is.
    Plain(String),
    /// A hoverable word.
    Word {
        text: String,
        term: String,
        known: bool,
        learned: bool,
    },
}

impl Token {
    pub fn text(&self) -> &str {
        match self {
            Token::Plain(text) | Token::Word { text, .. } => text,
        }
    }

    pub fn is_word(&self) -> bool {
        matches!(self, Token::Word { .. })
    }
}

/// Splits comment text into hoverable and non-hoverable runs.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    lexicon: Arc<Lexicon>,
}

/// Lowercase, alphanumeric-only form of a segment.
pub fn clean_word(segment: &str) -> String {
    segment
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

impl Tokenizer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn tokenize(&self, text: &str, vocabulary: &VocabularyStore) -> Vec<Token> {
        let mut tokens: Vec<Token> = Vec::new();
        for segment in text.split_word_bounds() {
            match self.classify(segment) {
                Some(term) => tokens.push(Token::Word {
                    text: segment.to_string(),
                    known: vocabulary.is_known(&term),
                    learned: vocabulary.is_learning(&term),
                    term,
                }),
                None => match tokens.last_mut() {
                    // Merge neighbouring plain runs so renderers get fewer spans.
                    Some(Token::Plain(prev)) => prev.push_str(segment),
                    _ => tokens.push(Token::Plain(segment.to_string())),
                },
            }
        }
        tokens
    }

    /// Returns the cleaned term when `segment` should be hoverable.
    fn classify(&self, segment: &str) -> Option<String> {
        let term = clean_word(segment);
        if term.chars().count() < MIN_WORD_CHARS
            || term.chars().all(|c| c.is_numeric())
            || self.lexicon.is_stop_word(&term)
        {
            return None;
        }
        Some(term)
    }
}
