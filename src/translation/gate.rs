/*!
 * Per-segment translation policy.
 *
 * Classifies every segment into exactly one of pass-through, cache-hit or
 * needs-translation, and owns the memo write-back rule for resolved
 * single-word segments.
 */

use log::debug;

use super::memo::TranslationMemo;

/// Outcome of classifying one segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentAction {
    /// Copy the text verbatim; no external call, no memo lookup
    PassThrough,

    /// Resolved from the memo; carries the final output text
    CacheHit(String),

    /// Must be sent to the external translator
    Translate,
}

/// Policy engine deciding what happens to each segment
pub struct TranslationGate {
    memo: TranslationMemo,
}

impl TranslationGate {
    /// Create a gate over the job's memo
    pub fn new(memo: TranslationMemo) -> Self {
        Self { memo }
    }

    /// Classify a segment's raw text.
    ///
    /// Pass-through covers empty or whitespace-only text, single
    /// characters, and text with no alphabetic content (numbers,
    /// punctuation, special characters). Memo lookup happens on the
    /// trimmed text; hits come back with edge whitespace repaired so the
    /// whitespace invariant holds without another pass.
    pub fn classify(&self, text: &str) -> SegmentAction {
        if text.is_empty() || text.chars().all(char::is_whitespace) {
            return SegmentAction::PassThrough;
        }

        if text.chars().count() == 1 {
            return SegmentAction::PassThrough;
        }

        let trimmed = text.trim();
        if !trimmed.chars().any(char::is_alphabetic) {
            return SegmentAction::PassThrough;
        }

        if let Some(hit) = self.memo.lookup(trimmed) {
            return SegmentAction::CacheHit(repair_edge_whitespace(text, &hit));
        }

        SegmentAction::Translate
    }

    /// Record a freshly translated segment in the memo when the original
    /// is a single token (no internal whitespace).
    pub fn record_translation(&self, original: &str, translated: &str) {
        let trimmed = original.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return;
        }

        if self.memo.record(trimmed, translated) {
            debug!("Gate memoized single-word segment '{}'", trimmed);
        }
    }

    /// The memo backing this gate
    pub fn memo(&self) -> &TranslationMemo {
        &self.memo
    }
}

/// Restore edge whitespace the external translator may have dropped:
/// if the original starts (or ends) with whitespace and the translation
/// does not, one space is prepended (or appended).
pub fn repair_edge_whitespace(original: &str, translated: &str) -> String {
    let mut repaired = translated.to_string();

    let original_leads = original.chars().next().is_some_and(char::is_whitespace);
    let translated_leads = repaired.chars().next().is_some_and(char::is_whitespace);
    if original_leads && !translated_leads {
        repaired.insert(0, ' ');
    }

    let original_trails = original.chars().last().is_some_and(char::is_whitespace);
    let translated_trails = repaired.chars().last().is_some_and(char::is_whitespace);
    if original_trails && !translated_trails {
        repaired.push(' ');
    }

    repaired
}
