/*!
 * Tests for text segmentation of markup parts
 */

use bytes::Bytes;

use docxlate::errors::MarkupError;
use docxlate::markup::{MarkupPart, TextSegmenter};

use crate::common;

fn part_from(xml: String) -> MarkupPart {
    MarkupPart::new(
        "document".to_string(),
        "word/document.xml".to_string(),
        Bytes::from(xml.into_bytes()),
    )
}

#[test]
fn test_segmenter_withTwoRuns_shouldYieldTwoSegments() {
    let xml = common::document_xml(&[&["Hello ", "world"]]);
    let mut part = part_from(xml);

    TextSegmenter::segment_part(&mut part).unwrap();

    assert_eq!(part.segments.len(), 2);
    assert_eq!(part.segments[0].text, "Hello ");
    assert_eq!(part.segments[1].text, "world");
}

#[test]
fn test_segmenter_ordering_shouldFollowReadingOrder() {
    let xml = common::document_xml(&[&["one", "two"], &["three"], &["four", "five"]]);
    let mut part = part_from(xml);

    TextSegmenter::segment_part(&mut part).unwrap();

    let texts: Vec<&str> = part.segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["one", "two", "three", "four", "five"]);

    // Node handles are the ordinal position in the same order
    for (index, segment) in part.segments.iter().enumerate() {
        assert_eq!(segment.node, index);
    }
}

#[test]
fn test_segmenter_withEmptyTextNode_shouldKeepSegmentSlot() {
    let xml = common::document_xml(&[&["before", "", "after"]]);
    let mut part = part_from(xml);

    TextSegmenter::segment_part(&mut part).unwrap();

    assert_eq!(part.segments.len(), 3);
    assert_eq!(part.segments[1].text, "");
    assert_eq!(part.segments[1].word_count(), 0);
    assert_eq!(part.segments[2].text, "after");
}

#[test]
fn test_segmenter_plainText_shouldJoinParagraphsWithNewlines() {
    let xml = common::document_xml(&[&["First", "paragraph"], &["Second paragraph"]]);
    let mut part = part_from(xml);

    TextSegmenter::segment_part(&mut part).unwrap();

    assert_eq!(part.plain_text, "First paragraph\nSecond paragraph");
}

#[test]
fn test_segmenter_withEntities_shouldDecodeText() {
    let xml = common::document_xml(&[&["Tom & Jerry <friends>"]]);
    let mut part = part_from(xml);

    TextSegmenter::segment_part(&mut part).unwrap();

    assert_eq!(part.segments[0].text, "Tom & Jerry <friends>");
}

#[test]
fn test_segmenter_withTextOutsideParagraph_shouldIgnoreIt() {
    let xml = format!(
        "<?xml version=\"1.0\"?>\n<w:document xmlns:w=\"{}\"><w:body>\
         <w:t>stray</w:t><w:p><w:r><w:t>kept</w:t></w:r></w:p>\
         </w:body></w:document>",
        common::W_NS
    );
    let mut part = part_from(xml);

    TextSegmenter::segment_part(&mut part).unwrap();

    assert_eq!(part.segments.len(), 1);
    assert_eq!(part.segments[0].text, "kept");
}

#[test]
fn test_segmenter_withForeignNamespace_shouldSkipLookalikes() {
    let xml = format!(
        "<?xml version=\"1.0\"?>\n<w:document xmlns:w=\"{}\" xmlns:x=\"urn:other\"><w:body>\
         <w:p><x:t>not text</x:t><w:r><w:t>real</w:t></w:r></w:p>\
         </w:body></w:document>",
        common::W_NS
    );
    let mut part = part_from(xml);

    TextSegmenter::segment_part(&mut part).unwrap();

    assert_eq!(part.segments.len(), 1);
    assert_eq!(part.segments[0].text, "real");
}

#[test]
fn test_segmenter_withMalformedMarkup_shouldFail() {
    let xml = format!(
        "<?xml version=\"1.0\"?>\n<w:document xmlns:w=\"{}\"><w:body><w:p></w:body></w:document>",
        common::W_NS
    );
    let mut part = part_from(xml);

    let result = TextSegmenter::segment_part(&mut part);

    assert!(matches!(
        result,
        Err(MarkupError::MalformedMarkup { .. })
    ));
}

#[test]
fn test_segmenter_withNoText_shouldYieldNoSegments() {
    let xml = common::document_xml(&[]);
    let mut part = part_from(xml);

    TextSegmenter::segment_part(&mut part).unwrap();

    assert!(part.segments.is_empty());
    assert_eq!(part.plain_text, "");
}
