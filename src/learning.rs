// File: src/learning.rs
use crate::core::types::{SourceVideo, VocabSet, VocabularyEntry};
use crate::persistence::{load_json, save_json, SessionStorage};
use chrono::Utc;

pub const LEARNING_KEY: &str = "slangfeed.learning";
pub const KNOWN_KEY: &str = "slangfeed.known";

/// Definition used when a term is promoted into the learning set without one.
pub const PLACEHOLDER_DEFINITION: &str = "Definition not available";

/// A term being added to the learning set.
#[derive(Debug, Clone, Default)]
pub struct NewTerm {
    pub term: String,
    pub definition: String,
    pub example: String,
    pub source: SourceVideo,
}

/// Owns both vocabulary sets and keeps them disjoint.
///
/// Every mutation persists both keys synchronously. A failed write is
/// logged and otherwise ignored, so the session keeps working in memory.
pub struct VocabularyStore {
    learning: Vec<VocabularyEntry>,
    known: Vec<String>,
    storage: Box<dyn SessionStorage>,
}

fn same_term(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

impl VocabularyStore {
    /// Loads both sets from `storage`, defaulting to empty sets.
    pub fn load(storage: Box<dyn SessionStorage>) -> Self {
        let learning: Vec<VocabularyEntry> =
            load_json(storage.as_ref(), LEARNING_KEY).unwrap_or_default();
        let known: Vec<String> = load_json(storage.as_ref(), KNOWN_KEY).unwrap_or_default();

        let mut store = Self {
            learning: Vec::with_capacity(learning.len()),
            known: Vec::with_capacity(known.len()),
            storage,
        };
        // Dedup on the way in. Learning wins if older data has a term in both sets.
        for entry in learning {
            if !store.is_learning(&entry.term) {
                store.learning.push(entry);
            }
        }
        for term in known {
            if !store.contains(&term) {
                store.known.push(term);
            }
        }
        tracing::debug!(
            learning = store.learning.len(),
            known = store.known.len(),
            "vocabulary loaded"
        );
        store
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.learning
    }

    pub fn known(&self) -> &[String] {
        &self.known
    }

    pub fn learning_terms(&self) -> Vec<String> {
        self.learning.iter().map(|e| e.term.clone()).collect()
    }

    pub fn is_learning(&self, term: &str) -> bool {
        self.learning.iter().any(|e| same_term(&e.term, term))
    }

    pub fn is_known(&self, term: &str) -> bool {
        self.known.iter().any(|k| same_term(k, term))
    }

    pub fn contains(&self, term: &str) -> bool {
        self.is_learning(term) || self.is_known(term)
    }

    pub fn entry(&self, term: &str) -> Option<&VocabularyEntry> {
        self.learning.iter().find(|e| same_term(&e.term, term))
    }

    /// Returns `false` when the term is blank or already in either set.
    pub fn add_to_learning(&mut self, term: NewTerm) -> bool {
        if term.term.trim().is_empty() || self.contains(&term.term) {
            return false;
        }
        self.push_learning(term);
        self.save();
        true
    }

    pub fn add_to_known(&mut self, term: &str) -> bool {
        if term.trim().is_empty() || self.contains(term) {
            return false;
        }
        self.known.push(term.trim().to_string());
        self.save();
        true
    }

    pub fn remove(&mut self, term: &str, from: VocabSet) -> bool {
        let removed = self.take(term, from);
        if removed.is_some() {
            self.save();
        }
        removed.is_some()
    }

    /// Moves `term` from the other set into `to` in one step.
    ///
    /// `fallback` supplies definition and example when moving into the
    /// learning set; the placeholder definition is used when absent.
    pub fn promote(&mut self, term: &str, to: VocabSet, fallback: Option<NewTerm>) -> bool {
        let Some(removed) = self.take(term, to.other()) else {
            return false;
        };
        match (to, removed) {
            (VocabSet::Known, Taken::Learning(entry)) => {
                self.known.push(entry.term);
            }
            (VocabSet::Learning, Taken::Known(known_term)) => {
                let mut new_term = fallback.unwrap_or_default();
                new_term.term = known_term;
                if new_term.definition.trim().is_empty() {
                    new_term.definition = PLACEHOLDER_DEFINITION.to_string();
                }
                self.push_learning(new_term);
            }
            // `take` only ever returns from the other set.
            _ => return false,
        }
        self.save();
        true
    }

    /// Persists both sets. Failures leave the in-memory state untouched.
    pub fn save(&mut self) {
        if let Err(e) = save_json(self.storage.as_mut(), LEARNING_KEY, &self.learning) {
            tracing::warn!(error = %e, "could not persist learning set");
        }
        if let Err(e) = save_json(self.storage.as_mut(), KNOWN_KEY, &self.known) {
            tracing::warn!(error = %e, "could not persist known set");
        }
    }

    fn push_learning(&mut self, term: NewTerm) {
        self.learning.push(VocabularyEntry {
            term: term.term.trim().to_string(),
            definition: term.definition,
            example: term.example,
            learned_at: Utc::now(),
            video_title: term.source.title,
            video_id: term.source.id,
        });
    }

    fn take(&mut self, term: &str, from: VocabSet) -> Option<Taken> {
        match from {
            VocabSet::Learning => {
                let pos = self.learning.iter().position(|e| same_term(&e.term, term))?;
                Some(Taken::Learning(self.learning.remove(pos)))
            }
            VocabSet::Known => {
                let pos = self.known.iter().position(|k| same_term(k, term))?;
                Some(Taken::Known(self.known.remove(pos)))
            }
        }
    }
}

enum Taken {
    Learning(VocabularyEntry),
    Known(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::persistence::MemoryStorage;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn term(t: &str) -> NewTerm {
        NewTerm {
            term: t.to_string(),
            definition: format!("meaning of {t}"),
            example: format!("{t} in a sentence"),
            source: SourceVideo::default(),
        }
    }

    /// Shares its map with the test so persisted values can be inspected.
    #[derive(Clone, Default)]
    struct SharedStorage(Rc<RefCell<MemoryStorage>>);

    impl SessionStorage for SharedStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.borrow().get(key)
        }
        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.0.borrow_mut().set(key, value)
        }
        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            self.0.borrow_mut().remove(key)
        }
    }

    struct BrokenStorage;

    impl SessionStorage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }
        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("no space left for {key}"),
            )))
        }
        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn learning_terms_are_unique_ignoring_case() {
        let mut store = VocabularyStore::load(Box::new(MemoryStorage::new()));
        assert!(store.add_to_learning(term("Rizz")));
        assert!(!store.add_to_learning(term("rizz")));
        assert_eq!(store.entries().len(), 1);
        assert_eq!(store.entries()[0].term, "Rizz");
    }

    #[test]
    fn known_terms_are_unique_and_disjoint_from_learning() {
        let mut store = VocabularyStore::load(Box::new(MemoryStorage::new()));
        assert!(store.add_to_known("bet"));
        assert!(!store.add_to_known("BET"));
        assert!(!store.add_to_learning(term("Bet")));
        assert_eq!(store.known(), ["bet".to_string()]);
        assert!(store.entries().is_empty());
    }

    #[test]
    fn promote_known_to_learning_moves_the_term() {
        let mut store = VocabularyStore::load(Box::new(MemoryStorage::new()));
        store.add_to_known("aura");

        assert!(store.promote("Aura", VocabSet::Learning, None));
        assert!(!store.is_known("aura"));
        assert!(store.is_learning("aura"));
        assert_eq!(
            store.entry("aura").map(|e| e.definition.as_str()),
            Some(PLACEHOLDER_DEFINITION)
        );
    }

    #[test]
    fn promote_learning_to_known_and_missing_terms() {
        let mut store = VocabularyStore::load(Box::new(MemoryStorage::new()));
        store.add_to_learning(term("mid"));

        assert!(!store.promote("mid", VocabSet::Learning, None));
        assert!(store.promote("MID", VocabSet::Known, None));
        assert!(store.is_known("mid"));
        assert!(!store.is_learning("mid"));
        assert!(!store.promote("ghost", VocabSet::Known, None));
    }

    #[test]
    fn remove_is_case_insensitive() {
        let mut store = VocabularyStore::load(Box::new(MemoryStorage::new()));
        store.add_to_learning(term("Sigma"));
        assert!(!store.remove("sigma", VocabSet::Known));
        assert!(store.remove("sigma", VocabSet::Learning));
        assert!(store.entries().is_empty());
    }

    #[test]
    fn mutations_persist_and_reload() {
        let shared = SharedStorage::default();
        let mut store = VocabularyStore::load(Box::new(shared.clone()));
        store.add_to_learning(term("gyat"));
        store.add_to_known("fr");

        let reloaded = VocabularyStore::load(Box::new(shared.clone()));
        assert!(reloaded.is_learning("gyat"));
        assert!(reloaded.is_known("fr"));
    }

    #[test]
    fn load_drops_terms_present_in_both_sets() {
        let mut raw = MemoryStorage::new();
        raw.set(
            LEARNING_KEY,
            r#"[{"term":"cap","definition":"lie","example":"no cap","learnedAt":"2024-01-01T00:00:00Z"}]"#,
        )
        .unwrap();
        raw.set(KNOWN_KEY, r#"["Cap","ngl","ngl"]"#).unwrap();

        let store = VocabularyStore::load(Box::new(raw));
        assert!(store.is_learning("cap"));
        assert_eq!(store.known(), ["ngl".to_string()]);
    }

    #[test]
    fn failed_writes_keep_the_session_working() {
        let mut store = VocabularyStore::load(Box::new(BrokenStorage));
        assert!(store.add_to_learning(term("slay")));
        assert!(store.is_learning("slay"));
    }
}
