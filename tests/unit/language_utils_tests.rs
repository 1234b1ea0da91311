/*!
 * Tests for language code utilities
 */

use docxlate::language_utils::{
    get_language_name, language_codes_match, normalize_code, validate_language_code,
};

#[test]
fn test_validate_withTwoLetterCodes_shouldPass() {
    assert!(validate_language_code("en").is_ok());
    assert!(validate_language_code("es").is_ok());
    assert!(validate_language_code("FR").is_ok());
}

#[test]
fn test_validate_withThreeLetterCodes_shouldPass() {
    assert!(validate_language_code("eng").is_ok());
    assert!(validate_language_code("spa").is_ok());
}

#[test]
fn test_validate_withUnknownCode_shouldFail() {
    assert!(validate_language_code("zz").is_err());
    assert!(validate_language_code("q").is_err());
}

#[test]
fn test_normalize_shouldPreferTwoLetterCodes() {
    assert_eq!(normalize_code("eng").unwrap(), "en");
    assert_eq!(normalize_code("es").unwrap(), "es");
}

#[test]
fn test_getLanguageName_shouldReturnEnglishName() {
    assert_eq!(get_language_name("es").unwrap(), "Spanish");
    assert_eq!(get_language_name("fr").unwrap(), "French");
    assert_eq!(get_language_name("deu").unwrap(), "German");
}

#[test]
fn test_languageCodesMatch_shouldCompareAcrossFormats() {
    assert!(language_codes_match("en", "eng"));
    assert!(language_codes_match("es", "spa"));
    assert!(!language_codes_match("en", "es"));
    assert!(!language_codes_match("en", "zz"));
}
