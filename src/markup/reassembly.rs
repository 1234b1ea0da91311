use std::collections::HashMap;

use bytes::Bytes;
use log::debug;
use quick_xml::events::{BytesText, Event};
use quick_xml::reader::NsReader;
use quick_xml::{Reader, Writer};

use crate::document::DocumentPackage;
use crate::errors::ReassemblyError;

use super::part::MarkupPart;
use super::segmenter::WORDPROCESSING_NS;

use quick_xml::name::{Namespace, ResolveResult};

// @module: Write-back, validation and repackaging

/// Writes resolved translations back into their parts, validates every
/// produced part, and assembles the output package.
///
/// Write-back is positional: the rewrite pass counts text nodes exactly the
/// way the segmenter did, so the nth extracted segment lands in the nth
/// node. Any count disagreement aborts the job instead of producing a
/// silently misaligned document.
pub struct ReassemblyValidator;

impl ReassemblyValidator {
    /// Rewrite one part, substituting each text node's content with the
    /// segment table's resolved text.
    pub fn rewrite_part(part: &MarkupPart) -> Result<Vec<u8>, ReassemblyError> {
        let translations: Vec<&str> =
            part.segments.iter().map(|s| s.resolved_text()).collect();
        Self::rewrite(&part.name, &part.raw, &translations)
    }

    fn rewrite(
        part: &str,
        raw: &[u8],
        translations: &[&str],
    ) -> Result<Vec<u8>, ReassemblyError> {
        let mut reader = NsReader::from_reader(raw);
        let mut writer = Writer::new(Vec::new());
        let mut buf = Vec::new();

        let mut node = 0usize;
        let mut paragraph_depth = 0usize;
        // Set while discarding the original content of a rewritten node
        let mut in_text_node = false;

        loop {
            let (resolve, event) = reader
                .read_resolved_event_into(&mut buf)
                .map_err(|e| packaging(part, e))?;

            match event {
                Event::Eof => break,
                Event::Start(e) => {
                    let in_namespace = is_wordprocessing(&resolve);
                    if in_namespace && e.local_name().as_ref() == b"p" {
                        paragraph_depth += 1;
                    }

                    let is_text_node = in_namespace
                        && e.local_name().as_ref() == b"t"
                        && paragraph_depth > 0;

                    if is_text_node {
                        let replacement = next_translation(part, translations, node)?;
                        node += 1;

                        writer
                            .write_event(Event::Start(e))
                            .map_err(|err| packaging(part, err))?;
                        if !replacement.is_empty() {
                            writer
                                .write_event(Event::Text(BytesText::new(replacement)))
                                .map_err(|err| packaging(part, err))?;
                        }
                        in_text_node = true;
                    } else {
                        writer
                            .write_event(Event::Start(e))
                            .map_err(|err| packaging(part, err))?;
                    }
                }
                Event::Empty(e) => {
                    let is_text_node = is_wordprocessing(&resolve)
                        && e.local_name().as_ref() == b"t"
                        && paragraph_depth > 0;

                    if is_text_node {
                        let replacement = next_translation(part, translations, node)?;
                        node += 1;

                        if replacement.is_empty() {
                            // Nothing to insert, keep the self-closed shape
                            writer
                                .write_event(Event::Empty(e))
                                .map_err(|err| packaging(part, err))?;
                        } else {
                            let owned = e.into_owned();
                            writer
                                .write_event(Event::Start(owned.clone()))
                                .map_err(|err| packaging(part, err))?;
                            writer
                                .write_event(Event::Text(BytesText::new(replacement)))
                                .map_err(|err| packaging(part, err))?;
                            writer
                                .write_event(Event::End(owned.to_end()))
                                .map_err(|err| packaging(part, err))?;
                        }
                    } else {
                        writer
                            .write_event(Event::Empty(e))
                            .map_err(|err| packaging(part, err))?;
                    }
                }
                Event::Text(e) => {
                    if !in_text_node {
                        writer
                            .write_event(Event::Text(e))
                            .map_err(|err| packaging(part, err))?;
                    }
                }
                Event::CData(e) => {
                    if !in_text_node {
                        writer
                            .write_event(Event::CData(e))
                            .map_err(|err| packaging(part, err))?;
                    }
                }
                Event::End(e) => {
                    if is_wordprocessing(&resolve) {
                        match e.local_name().as_ref() {
                            b"p" => paragraph_depth = paragraph_depth.saturating_sub(1),
                            b"t" => in_text_node = false,
                            _ => {}
                        }
                    }
                    writer
                        .write_event(Event::End(e))
                        .map_err(|err| packaging(part, err))?;
                }
                other => {
                    writer
                        .write_event(other)
                        .map_err(|err| packaging(part, err))?;
                }
            }

            buf.clear();
        }

        if node != translations.len() {
            return Err(ReassemblyError::NodeCountMismatch {
                part: part.to_string(),
                nodes: node,
                translations: translations.len(),
            });
        }

        Ok(writer.into_inner())
    }

    /// Check that a produced part parses as well-formed markup
    pub fn validate_well_formed(part: &str, raw: &[u8]) -> Result<(), ReassemblyError> {
        let mut reader = Reader::from_reader(raw);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Eof) => return Ok(()),
                Ok(_) => {}
                Err(e) => {
                    return Err(ReassemblyError::ValidationFailed {
                        part: part.to_string(),
                        detail: e.to_string(),
                    });
                }
            }
            buf.clear();
        }
    }

    /// Rewrite every part, validate all markup entries of the package, and
    /// assemble the output archive. Validation failure in any part
    /// suppresses the whole output.
    pub fn reassemble(
        package: &DocumentPackage,
        parts: &[MarkupPart],
    ) -> Result<Bytes, ReassemblyError> {
        let mut replacements: HashMap<String, Vec<u8>> = HashMap::new();

        for part in parts {
            let rewritten = Self::rewrite_part(part)?;
            replacements.insert(part.path.clone(), rewritten);
        }

        for entry in package.entries() {
            if entry.is_dir || !is_markup_entry(&entry.path) {
                continue;
            }
            let data: &[u8] = match replacements.get(&entry.path) {
                Some(replaced) => replaced,
                None => &entry.data,
            };
            Self::validate_well_formed(&entry.path, data)?;
        }

        debug!(
            "Reassembled {} parts ({} entries total)",
            parts.len(),
            package.entries().len()
        );

        package.repackage(&replacements)
    }
}

/// Whether an archive entry holds XML that must round-trip the validator
fn is_markup_entry(path: &str) -> bool {
    path.ends_with(".xml") || path.ends_with(".rels")
}

fn next_translation<'a>(
    part: &str,
    translations: &[&'a str],
    node: usize,
) -> Result<&'a str, ReassemblyError> {
    translations
        .get(node)
        .copied()
        .ok_or_else(|| ReassemblyError::NodeCountMismatch {
            part: part.to_string(),
            nodes: node + 1,
            translations: translations.len(),
        })
}

fn is_wordprocessing(resolve: &ResolveResult) -> bool {
    matches!(resolve, ResolveResult::Bound(Namespace(ns)) if *ns == WORDPROCESSING_NS.as_bytes())
}

fn packaging(part: &str, err: impl std::fmt::Display) -> ReassemblyError {
    ReassemblyError::PackagingFailed(format!("rewriting part '{}': {}", part, err))
}
