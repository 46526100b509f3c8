// File: src/core/lexicon.rs
use crate::error::LexiconError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlangDefinition {
    pub definition: String,
    pub example: String,
}

/// Immutable dictionary data injected into the tokenizer and the tooltip.
///
/// Keys of `slang` and members of `stop_words` are stored lowercase.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    slang: BTreeMap<String, SlangDefinition>,
    stop_words: HashSet<String>,
}

/// On-disk form of a custom lexicon.
#[derive(Debug, Deserialize)]
struct LexiconFile {
    #[serde(default)]
    slang: BTreeMap<String, SlangDefinition>,
    #[serde(default)]
    stop_words: Vec<String>,
    /// Keep the built-in stop words and add these on top.
    #[serde(default = "default_true")]
    extend_builtin: bool,
}

fn default_true() -> bool {
    true
}

const BUILTIN_SLANG: &[(&str, &str, &str)] = &[
    ("cook", "To do something very well, to excel", "He really cooked with that comment"),
    ("cooked", "Ruined, done for, or extremely tired", "Bro is cooked after that fail"),
    ("sigma", "An independent, self-reliant person; a leader", "That was such a sigma move"),
    ("rizz", "Charisma, especially in romantic contexts", "He has infinite rizz"),
    ("gyat", "Expression of excitement or surprise", "Gyat! That was unexpected"),
    ("skibidi", "Nonsense term used for emphasis or humor", "That's so skibidi"),
    ("ohio", "Strange, weird, or cursed", "This video is so Ohio"),
    ("mewing", "Tongue posture technique (often used ironically)", "Can't talk, I'm mewing"),
    ("mogging", "Looking better than someone else", "He's mogging everyone here"),
    ("aura", "Points representing someone's vibe or presence", "+1000 aura for that"),
    ("glazing", "Excessively praising or hyping someone", "Stop glazing him bro"),
    ("edging", "Being on the edge or border of something", "This video is edging perfection"),
    ("bussin", "Really good, excellent", "This content is bussin fr"),
    ("no cap", "No lie, for real", "That was fire no cap"),
    ("fr", "For real, seriously", "This is peak content fr"),
    ("ngl", "Not gonna lie", "Ngl this slaps"),
    ("slay", "To do something exceptionally well", "You totally slayed that comment"),
    ("ate", "Did something perfectly", "She ate and left no crumbs"),
    ("lowkey", "Somewhat, kind of, secretly", "This is lowkey fire"),
    ("highkey", "Very, obviously, definitely", "This is highkey the best video"),
    ("mid", "Mediocre, not good or bad", "That take was mid"),
    ("based", "Being yourself regardless of others' opinions", "That's a based opinion"),
    ("ratio", "When a reply gets more likes than the original", "Ratio + L + fell off"),
    ("l", "Loss, failure, or something bad", "That's an L take"),
    ("w", "Win, success, or something good", "This is a W video"),
];

const BUILTIN_STOP_WORDS: &[&str] = &[
    // articles and determiners
    "a", "an", "the", "this", "that", "these", "those", "some", "any", "every", "each",
    // pronouns
    "i", "me", "my", "mine", "you", "your", "yours", "he", "him", "his", "she", "her", "hers",
    "it", "its", "we", "us", "our", "ours", "they", "them", "their", "theirs", "who", "what",
    "which", "im", "youre", "hes", "shes", "were", "theyre", "ive", "youve",
    // auxiliaries
    "is", "am", "are", "was", "be", "been", "being", "do", "does", "did", "done", "have",
    "has", "had", "will", "would", "can", "could", "should", "shall", "may", "might", "must",
    "dont", "doesnt", "didnt", "isnt", "arent", "wasnt", "cant", "wont", "gonna", "wanna",
    // common nouns and adjectives
    "video", "videos", "comment", "comments", "people", "thing", "things", "time", "way",
    "day", "man", "guy", "guys", "good", "bad", "new", "old", "great", "big", "little",
    "best", "really", "very", "so", "just", "like", "more", "most", "much", "many", "all",
    // prepositions
    "in", "on", "at", "to", "for", "of", "with", "by", "from", "about", "into", "over",
    "after", "before", "up", "down", "out", "off",
    // conjunctions
    "and", "or", "but", "if", "because", "as", "than", "then", "when", "while", "not", "no",
    // numbers
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "first",
    // greetings
    "hi", "hello", "hey", "yo", "bye", "thanks", "thank",
];

static BUILTIN: Lazy<Lexicon> = Lazy::new(|| {
    Lexicon::new(
        BUILTIN_SLANG.iter().map(|(term, definition, example)| {
            (
                term.to_string(),
                SlangDefinition {
                    definition: definition.to_string(),
                    example: example.to_string(),
                },
            )
        }),
        BUILTIN_STOP_WORDS.iter().map(|w| w.to_string()),
    )
});

impl Lexicon {
    pub fn new(
        slang: impl IntoIterator<Item = (String, SlangDefinition)>,
        stop_words: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            slang: slang
                .into_iter()
                .map(|(term, def)| (term.to_lowercase(), def))
                .collect(),
            stop_words: stop_words.into_iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// The dictionary compiled into the binary, built on first use.
    pub fn builtin() -> &'static Lexicon {
        &BUILTIN
    }

    /// Loads a JSON lexicon: `{"slang": {term: {definition, example}}, "stop_words": [...]}`.
    pub fn from_file(path: &Path) -> Result<Self, LexiconError> {
        let data = std::fs::read_to_string(path)?;
        let file: LexiconFile = serde_json::from_str(&data)?;

        let mut lexicon = if file.extend_builtin {
            Self::builtin().clone()
        } else {
            Self::default()
        };
        lexicon
            .slang
            .extend(file.slang.into_iter().map(|(t, d)| (t.to_lowercase(), d)));
        lexicon
            .stop_words
            .extend(file.stop_words.into_iter().map(|w| w.to_lowercase()));
        Ok(lexicon)
    }

    pub fn is_stop_word(&self, cleaned: &str) -> bool {
        self.stop_words.contains(cleaned)
    }

    pub fn define(&self, term: &str) -> Option<&SlangDefinition> {
        self.slang.get(&term.trim().to_lowercase())
    }

    pub fn slang_terms(&self) -> impl Iterator<Item = &str> {
        self.slang.keys().map(String::as_str)
    }
}
