/*!
 * Session-scoped translation memo.
 *
 * Caches single-word translations so a word that appears repeatedly across
 * a document (body, headers, footers) is sent to the external translator
 * exactly once. Keys are trimmed originals, values are trimmed
 * translations; entries are never evicted within a session and the whole
 * memo is discarded when the job ends.
 */

use std::collections::HashMap;
use std::sync::Arc;
use parking_lot::RwLock;
use log::debug;

/// Single-word translation memo with shared storage
pub struct TranslationMemo {
    /// Internal memo storage
    entries: Arc<RwLock<HashMap<String, String>>>,

    /// Lookup hit counter
    hits: Arc<RwLock<usize>>,

    /// Lookup miss counter
    misses: Arc<RwLock<usize>>,
}

impl TranslationMemo {
    /// Create a new empty memo
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            hits: Arc::new(RwLock::new(0)),
            misses: Arc::new(RwLock::new(0)),
        }
    }

    /// Look up the memoized translation of a word
    pub fn lookup(&self, word: &str) -> Option<String> {
        let key = word.trim();
        let entries = self.entries.read();

        match entries.get(key) {
            Some(translation) => {
                let mut hits = self.hits.write();
                *hits += 1;

                debug!("Memo hit for '{}'", key);
                Some(translation.clone())
            }
            None => {
                let mut misses = self.misses.write();
                *misses += 1;
                None
            }
        }
    }

    /// Record a resolved single-word translation.
    ///
    /// Multi-token originals are never memoized; a record attempt for one
    /// is dropped. Returns whether the entry was stored.
    pub fn record(&self, word: &str, translation: &str) -> bool {
        let key = word.trim();
        if key.is_empty() || key.chars().any(char::is_whitespace) {
            debug!("Skipping memo record for multi-token text '{}'", key);
            return false;
        }

        let mut entries = self.entries.write();
        entries.insert(key.to_string(), translation.trim().to_string());

        debug!("Memoized '{}'", key);
        true
    }

    /// Get memo statistics: (hits, misses, hit rate)
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = *self.hits.read();
        let misses = *self.misses.read();
        let total = hits + misses;

        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        (hits, misses, hit_rate)
    }

    /// Number of memoized words
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the memo holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for TranslationMemo {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TranslationMemo {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            hits: self.hits.clone(),
            misses: self.misses.clone(),
        }
    }
}
