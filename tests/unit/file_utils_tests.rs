/*!
 * Tests for file and directory utilities
 */

use std::path::PathBuf;

use docxlate::file_utils::FileManager;

#[test]
fn test_isDocumentPackage_shouldCheckExtension() {
    let dir = tempfile::tempdir().unwrap();

    let docx = dir.path().join("report.docx");
    std::fs::write(&docx, b"stub").unwrap();
    assert!(FileManager::is_document_package(&docx));

    let txt = dir.path().join("notes.txt");
    std::fs::write(&txt, b"stub").unwrap();
    assert!(!FileManager::is_document_package(&txt));

    assert!(!FileManager::is_document_package(dir.path()));
}

#[test]
fn test_findDocumentPackages_shouldSkipLockFiles() {
    let dir = tempfile::tempdir().unwrap();

    std::fs::write(dir.path().join("a.docx"), b"stub").unwrap();
    std::fs::write(dir.path().join("~$a.docx"), b"lock").unwrap();
    std::fs::write(dir.path().join("b.txt"), b"stub").unwrap();

    let found = FileManager::find_document_packages(dir.path()).unwrap();

    assert_eq!(found.len(), 1);
    assert!(found[0].ends_with("a.docx"));
}

#[test]
fn test_generateOutputPath_shouldUseDisplayName() {
    let path =
        FileManager::generate_output_path(Some("Informe Anual"), "informe", "/out", "en");

    assert_eq!(path, PathBuf::from("/out/Informe Anual.docx"));
}

#[test]
fn test_generateOutputPath_withoutDisplayName_shouldFallBackToStem() {
    let path = FileManager::generate_output_path(None, "informe", "/out", "en");

    assert_eq!(path, PathBuf::from("/out/informe.en.docx"));
}

#[test]
fn test_generateOutputPath_withUnusableDisplayName_shouldFallBackToStem() {
    let path = FileManager::generate_output_path(Some("///"), "informe", "/out", "en");

    assert_eq!(path, PathBuf::from("/out/informe.en.docx"));
}

#[test]
fn test_sanitizeFileStem_shouldDropSeparatorsAndControls() {
    assert_eq!(
        FileManager::sanitize_file_stem("a/b\\c:d*e?f\"g<h>i|j"),
        "a b c d e f g h i j"
    );
    assert_eq!(FileManager::sanitize_file_stem("  spaced   name \n"), "spaced name");
}

#[test]
fn test_ensureDir_shouldCreateNestedDirectories() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a/b/c");

    FileManager::ensure_dir(&nested).unwrap();

    assert!(FileManager::dir_exists(&nested));
}

#[test]
fn test_writeBytes_shouldCreateParentsAndRoundTrip() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("deep/out.bin");

    FileManager::write_bytes(&target, b"payload").unwrap();

    assert_eq!(FileManager::read_bytes(&target).unwrap(), b"payload");
}
