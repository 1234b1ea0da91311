use std::collections::BTreeSet;

use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;

use super::package::DocumentPackage;

/// Archive path of the extended-properties part carrying the word count
const APP_PROPERTIES_PART: &str = "docProps/app.xml";

/// Document-level facts computed once at load time.
///
/// The declared word count doubles as the structural-corruption bound: no
/// part may ever produce more segments than the document declares words.
#[derive(Debug, Clone, Default)]
pub struct DocumentMetadata {
    /// Declared total word count
    pub word_count: usize,

    /// Sorted unique alphabetic tokens of the body text
    pub vocabulary: Vec<String>,

    /// Source filename without extension, translated later for display
    pub file_stem: String,
}

impl DocumentMetadata {
    /// Derive metadata from the package properties and the body plain text.
    ///
    /// Prefers the package's own `<Words>` declaration; documents written
    /// without extended properties fall back to a token count of the body.
    pub fn derive(package: &DocumentPackage, body_text: &str) -> Self {
        let declared = package
            .part_bytes(APP_PROPERTIES_PART)
            .and_then(|bytes| declared_word_count(bytes));

        let word_count = match declared {
            Some(count) => count,
            None => {
                let fallback = body_text.split_whitespace().count();
                debug!(
                    "No word-count declaration found, counted {} body tokens",
                    fallback
                );
                fallback
            }
        };

        Self {
            word_count,
            vocabulary: vocabulary(body_text),
            file_stem: package.file_stem.clone(),
        }
    }
}

/// Read the `<Words>` value from an extended-properties part
fn declared_word_count(raw: &[u8]) -> Option<usize> {
    let mut reader = Reader::from_reader(raw);
    let mut buf = Vec::new();
    let mut in_words = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => in_words = e.local_name().as_ref() == b"Words",
            Ok(Event::Text(e)) if in_words => {
                return e
                    .unescape()
                    .ok()
                    .and_then(|text| text.trim().parse::<usize>().ok());
            }
            Ok(Event::End(_)) => in_words = false,
            Ok(Event::Eof) => return None,
            Err(_) => return None,
            _ => {}
        }
        buf.clear();
    }
}

/// Collect the sorted unique alphabetic tokens of a text
pub fn vocabulary(text: &str) -> Vec<String> {
    let unique: BTreeSet<String> = text
        .split_whitespace()
        .map(|token| {
            token
                .trim_matches(|c: char| !c.is_alphabetic())
                .to_lowercase()
        })
        .filter(|token| !token.is_empty() && token.chars().all(char::is_alphabetic))
        .collect();

    unique.into_iter().collect()
}
