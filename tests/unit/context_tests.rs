/*!
 * Tests for positional context window extraction
 */

use docxlate::translation::ContextWindow;

#[test]
fn test_contextWindow_inMiddle_shouldTakeBothSides() {
    let text = "The quick brown fox jumps over the lazy dog";
    let window = ContextWindow::around(text, "fox");

    assert_eq!(window.preceding, "The quick brown ");
    assert_eq!(window.following, " jumps over the lazy dog");
}

#[test]
fn test_contextWindow_atStart_shouldHaveNoPreceding() {
    let text = "Hello world again";
    let window = ContextWindow::around(text, "Hello");

    assert_eq!(window.preceding, "");
    assert_eq!(window.following, " world again");
}

#[test]
fn test_contextWindow_atEnd_shouldHaveNoFollowing() {
    let text = "Hello world again";
    let window = ContextWindow::around(text, "again");

    assert_eq!(window.preceding, "Hello world ");
    assert_eq!(window.following, "");
}

#[test]
fn test_contextWindow_whenTruncated_shouldTrimToWordsAndMark() {
    let before: String = "alpha ".repeat(40);
    let after: String = "omega ".repeat(40);
    let text = format!("{}NEEDLE {}", before, after);

    let window = ContextWindow::around(&text, "NEEDLE");

    // Both sides are capped and marked with an ellipsis
    assert!(window.preceding.starts_with('…'));
    assert!(window.following.ends_with('…'));
    assert!(window.preceding.chars().count() <= 102);
    assert!(window.following.chars().count() <= 102);

    // Truncation never leaves partial words behind the marker
    assert!(window.preceding.trim_start_matches('…').starts_with("alpha"));
    assert!(window.following.trim_end_matches('…').ends_with("omega"));
}

#[test]
fn test_contextWindow_withMultibyteText_shouldStayOnCharBoundaries() {
    let before: String = "camión ".repeat(30);
    let text = format!("{}objetivo final", before);

    let window = ContextWindow::around(&text, "objetivo");

    assert!(window.preceding.contains("camión"));
    assert_eq!(window.following, " final");
}

#[test]
fn test_contextWindow_withUnknownSegment_shouldBeEmpty() {
    let window = ContextWindow::around("some document text", "missing");
    assert!(window.is_empty());
}

#[test]
fn test_contextWindow_withWhitespaceSegment_shouldBeEmpty() {
    let window = ContextWindow::around("some document text", "   ");
    assert!(window.is_empty());
}

#[test]
fn test_contextWindow_empty_shouldBeEmpty() {
    assert!(ContextWindow::empty().is_empty());
}
