/*!
 * Tests for the document package (zip) boundary
 */

use std::collections::HashMap;

use docxlate::document::{part_name, DocumentPackage, MAIN_DOCUMENT_PART};
use docxlate::errors::MarkupError;

use crate::common;

#[test]
fn test_package_fromBytes_shouldListEntriesInOrder() {
    let package = common::build_package(
        "doc",
        &[
            ("[Content_Types].xml", "<Types/>"),
            ("word/document.xml", "<doc/>"),
            ("word/header1.xml", "<hdr/>"),
        ],
    );

    let paths: Vec<&str> = package.entries().iter().map(|e| e.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["[Content_Types].xml", "word/document.xml", "word/header1.xml"]
    );
}

#[test]
fn test_package_partBytes_shouldReturnRawContent() {
    let package = common::build_package("doc", &[("word/document.xml", "<doc/>")]);

    let bytes = package.part_bytes(MAIN_DOCUMENT_PART).unwrap();
    assert_eq!(&bytes[..], b"<doc/>");

    assert!(package.part_bytes("word/missing.xml").is_none());
}

#[test]
fn test_translatablePaths_shouldOrderDocumentHeadersFooters() {
    let package = common::build_package(
        "doc",
        &[
            ("word/footer2.xml", "<ftr/>"),
            ("word/header2.xml", "<hdr/>"),
            ("word/document.xml", "<doc/>"),
            ("word/footer1.xml", "<ftr/>"),
            ("word/header1.xml", "<hdr/>"),
            ("word/styles.xml", "<styles/>"),
        ],
    );

    let paths = package.translatable_part_paths().unwrap();
    assert_eq!(
        paths,
        vec![
            "word/document.xml",
            "word/header1.xml",
            "word/header2.xml",
            "word/footer1.xml",
            "word/footer2.xml",
        ]
    );
}

#[test]
fn test_translatablePaths_shouldIgnoreNonPartLookalikes() {
    let package = common::build_package(
        "doc",
        &[
            ("word/document.xml", "<doc/>"),
            ("word/headerfoo.xml", "<x/>"),
            ("other/header1.xml", "<x/>"),
        ],
    );

    let paths = package.translatable_part_paths().unwrap();
    assert_eq!(paths, vec!["word/document.xml"]);
}

#[test]
fn test_translatablePaths_withoutMainDocument_shouldFail() {
    let package = common::build_package("doc", &[("word/header1.xml", "<hdr/>")]);

    let result = package.translatable_part_paths();
    assert!(matches!(result, Err(MarkupError::MissingPart(_))));
}

#[test]
fn test_repackage_shouldPreserveLayoutAndReplaceParts() {
    let package = common::build_package(
        "doc",
        &[
            ("[Content_Types].xml", "<Types/>"),
            ("word/document.xml", "<doc>old</doc>"),
            ("word/media/unrelated.bin", "binary-ish"),
        ],
    );

    let mut replacements = HashMap::new();
    replacements.insert(
        "word/document.xml".to_string(),
        b"<doc>new</doc>".to_vec(),
    );

    let output = package.repackage(&replacements).unwrap();
    let reopened = DocumentPackage::from_bytes("doc", &output).unwrap();

    let paths: Vec<&str> = reopened.entries().iter().map(|e| e.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "[Content_Types].xml",
            "word/document.xml",
            "word/media/unrelated.bin"
        ]
    );

    assert_eq!(
        &reopened.part_bytes("word/document.xml").unwrap()[..],
        b"<doc>new</doc>"
    );
    // Untouched entries round-trip byte-for-byte
    assert_eq!(
        &reopened.part_bytes("word/media/unrelated.bin").unwrap()[..],
        b"binary-ish"
    );
}

#[test]
fn test_partName_shouldStripDirectoryAndExtension() {
    assert_eq!(part_name("word/document.xml"), "document");
    assert_eq!(part_name("word/header1.xml"), "header1");
    assert_eq!(part_name("word/footer2.xml"), "footer2");
}

#[test]
fn test_package_fromBytes_withGarbage_shouldFail() {
    let result = DocumentPackage::from_bytes("doc", b"not a zip archive");
    assert!(result.is_err());
}
