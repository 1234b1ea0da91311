/*!
 * Tests for per-segment classification and whitespace repair
 */

use docxlate::translation::{
    repair_edge_whitespace, SegmentAction, TranslationGate, TranslationMemo,
};

fn gate() -> TranslationGate {
    TranslationGate::new(TranslationMemo::new())
}

#[test]
fn test_classify_withSingleCharacter_shouldPassThrough() {
    assert_eq!(gate().classify("A"), SegmentAction::PassThrough);
}

#[test]
fn test_classify_withDigits_shouldPassThrough() {
    assert_eq!(gate().classify("5"), SegmentAction::PassThrough);
    assert_eq!(gate().classify("12345"), SegmentAction::PassThrough);
}

#[test]
fn test_classify_withWhitespaceOnly_shouldPassThrough() {
    assert_eq!(gate().classify(""), SegmentAction::PassThrough);
    assert_eq!(gate().classify("   "), SegmentAction::PassThrough);
    assert_eq!(gate().classify("\t\n"), SegmentAction::PassThrough);
}

#[test]
fn test_classify_withPunctuation_shouldPassThrough() {
    assert_eq!(gate().classify("?!..."), SegmentAction::PassThrough);
    assert_eq!(gate().classify(" — "), SegmentAction::PassThrough);
}

#[test]
fn test_classify_withNonAlphabeticMix_shouldPassThrough() {
    assert_eq!(gate().classify("3.14"), SegmentAction::PassThrough);
    assert_eq!(gate().classify("12:30"), SegmentAction::PassThrough);
}

#[test]
fn test_classify_withWords_shouldTranslate() {
    assert_eq!(gate().classify("hola mundo"), SegmentAction::Translate);
    assert_eq!(gate().classify("palabra"), SegmentAction::Translate);
}

#[test]
fn test_classify_withMemoizedWord_shouldHitCache() {
    let memo = TranslationMemo::new();
    memo.record("hola", "hello");
    let gate = TranslationGate::new(memo);

    assert_eq!(
        gate.classify("hola"),
        SegmentAction::CacheHit("hello".to_string())
    );
}

#[test]
fn test_classify_cacheHit_shouldRepairEdgeWhitespace() {
    let memo = TranslationMemo::new();
    memo.record("hola", "hello");
    let gate = TranslationGate::new(memo);

    assert_eq!(
        gate.classify(" hola "),
        SegmentAction::CacheHit(" hello ".to_string())
    );
}

#[test]
fn test_recordTranslation_withSingleToken_shouldMemoize() {
    let gate = gate();

    gate.record_translation(" Capítulo ", " Chapter ");

    assert_eq!(
        gate.classify("Capítulo"),
        SegmentAction::CacheHit("Chapter".to_string())
    );
}

#[test]
fn test_recordTranslation_withMultipleTokens_shouldNotMemoize() {
    let gate = gate();

    gate.record_translation("hola mundo", "hello world");

    assert_eq!(gate.classify("hola mundo"), SegmentAction::Translate);
    assert!(gate.memo().is_empty());
}

#[test]
fn test_repairEdgeWhitespace_shouldRestoreBothSides() {
    assert_eq!(repair_edge_whitespace(" hola ", "hello"), " hello ");
}

#[test]
fn test_repairEdgeWhitespace_withLeadingOnly_shouldRestoreLeading() {
    assert_eq!(repair_edge_whitespace(" hola", "hello"), " hello");
}

#[test]
fn test_repairEdgeWhitespace_withTrailingOnly_shouldRestoreTrailing() {
    assert_eq!(repair_edge_whitespace("hola ", "hello"), "hello ");
}

#[test]
fn test_repairEdgeWhitespace_whenTranslationKeepsSpaces_shouldNotDouble() {
    assert_eq!(repair_edge_whitespace(" hola ", " hello "), " hello ");
}

#[test]
fn test_repairEdgeWhitespace_withoutOriginalSpaces_shouldLeaveUnchanged() {
    assert_eq!(repair_edge_whitespace("hola", "hello"), "hello");
}
