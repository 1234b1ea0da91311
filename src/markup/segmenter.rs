use log::debug;
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

use crate::errors::MarkupError;

use super::part::{MarkupPart, Segment};

// @module: Text extraction from WordprocessingML parts

/// Namespace of WordprocessingML body elements
pub const WORDPROCESSING_NS: &str =
    "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Walks a part's markup tree and extracts its ordered text segments.
///
/// Every lowest-level text node yields its own segment, in reading order;
/// adjacent styled runs are never merged, and empty nodes still occupy a
/// slot so write-back alignment is preserved. The paragraph-joined plain
/// text view is built in the same pass.
pub struct TextSegmenter;

impl TextSegmenter {
    /// Segment a part in place, filling its segment table and plain text
    pub fn segment_part(part: &mut MarkupPart) -> Result<(), MarkupError> {
        let raw = part.raw.clone();
        let (segments, plain_text) = Self::extract(&part.name, &raw)?;

        debug!(
            "Part '{}': {} segments, {} plain-text chars",
            part.name,
            segments.len(),
            plain_text.len()
        );

        part.segments = segments;
        part.plain_text = plain_text;
        Ok(())
    }

    /// Extract the ordered (node, text) pairs and the plain-text view
    fn extract(part: &str, raw: &[u8]) -> Result<(Vec<Segment>, String), MarkupError> {
        let mut reader = NsReader::from_reader(raw);
        let mut buf = Vec::new();

        let mut segments: Vec<Segment> = Vec::new();
        let mut lines: Vec<String> = Vec::new();
        let mut paragraph_runs: Vec<String> = Vec::new();
        let mut paragraph_depth = 0usize;
        // Some while inside a <w:t> element
        let mut current_text: Option<String> = None;

        loop {
            let (resolve, event) = reader
                .read_resolved_event_into(&mut buf)
                .map_err(|e| malformed(part, e))?;

            match event {
                Event::Start(e) => {
                    if is_wordprocessing(&resolve) {
                        match e.local_name().as_ref() {
                            b"p" => paragraph_depth += 1,
                            b"t" if paragraph_depth > 0 => current_text = Some(String::new()),
                            _ => {}
                        }
                    }
                }
                Event::Empty(e) => {
                    // A self-closed text node carries no words but still
                    // occupies a segment slot.
                    if is_wordprocessing(&resolve)
                        && e.local_name().as_ref() == b"t"
                        && paragraph_depth > 0
                    {
                        let node = segments.len();
                        segments.push(Segment::new(node, String::new()));
                        paragraph_runs.push(String::new());
                    }
                }
                Event::Text(e) => {
                    if let Some(text) = current_text.as_mut() {
                        let decoded = e.unescape().map_err(|err| malformed(part, err))?;
                        text.push_str(&decoded);
                    }
                }
                Event::CData(e) => {
                    if let Some(text) = current_text.as_mut() {
                        text.push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Event::End(e) => {
                    if is_wordprocessing(&resolve) {
                        match e.local_name().as_ref() {
                            b"p" => {
                                paragraph_depth = paragraph_depth.saturating_sub(1);
                                if paragraph_depth == 0 {
                                    lines.push(paragraph_runs.join(" "));
                                    paragraph_runs.clear();
                                }
                            }
                            b"t" => {
                                if let Some(text) = current_text.take() {
                                    let node = segments.len();
                                    paragraph_runs.push(text.clone());
                                    segments.push(Segment::new(node, text));
                                }
                            }
                            _ => {}
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }

            buf.clear();
        }

        Ok((segments, lines.join("\n")))
    }
}

/// Whether a resolved event sits in the WordprocessingML namespace
fn is_wordprocessing(resolve: &ResolveResult) -> bool {
    matches!(resolve, ResolveResult::Bound(Namespace(ns)) if *ns == WORDPROCESSING_NS.as_bytes())
}

fn malformed(part: &str, err: impl std::fmt::Display) -> MarkupError {
    MarkupError::MalformedMarkup {
        part: part.to_string(),
        detail: err.to_string(),
    }
}
