use bytes::Bytes;

// @module: Part and segment data model

/// How a segment was (or will be) resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Not yet classified
    Pending,
    /// Copied verbatim, never sent anywhere
    PassThrough,
    /// Resolved from the session memo
    CacheHit,
    /// Resolved by an external translation call
    Translated,
}

/// One minimal translatable text unit bound to a text node of a part.
///
/// The node reference is the ordinal index of the text node in document
/// order; extraction and write-back count nodes identically, which is what
/// keeps the one-to-one positional correspondence.
#[derive(Debug, Clone)]
pub struct Segment {
    /// Ordinal index of the owning text node within the part
    pub node: usize,

    /// Raw text content, whitespace untouched
    pub text: String,

    /// Classification assigned during the translating phase
    pub kind: SegmentKind,

    /// Resolved output text, None until the segment is processed
    pub translation: Option<String>,
}

impl Segment {
    /// Create an unresolved segment
    pub fn new(node: usize, text: String) -> Self {
        Self {
            node,
            text,
            kind: SegmentKind::Pending,
            translation: None,
        }
    }

    /// Mark the segment resolved with its output text
    pub fn resolve(&mut self, kind: SegmentKind, translation: String) {
        self.kind = kind;
        self.translation = Some(translation);
    }

    /// Whether the segment has been classified and resolved
    pub fn is_resolved(&self) -> bool {
        self.kind != SegmentKind::Pending && self.translation.is_some()
    }

    /// The text to write back: the resolved translation, or the original
    /// text for segments that were never resolved
    pub fn resolved_text(&self) -> &str {
        self.translation.as_deref().unwrap_or(&self.text)
    }

    /// Number of whitespace-separated tokens in the raw text
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// One parseable unit of the document package (body, header or footer)
/// with its extracted segment table.
#[derive(Debug, Clone)]
pub struct MarkupPart {
    /// Part identity (e.g. "document", "header1")
    pub name: String,

    /// Archive path of the part (e.g. "word/document.xml")
    pub path: String,

    /// Raw part bytes as read from the package
    pub raw: Bytes,

    /// Ordered segments, one per text node; empty until segmentation
    pub segments: Vec<Segment>,

    /// Paragraph-joined readable text of the part
    pub plain_text: String,
}

impl MarkupPart {
    /// Create a part that has not been segmented yet
    pub fn new(name: String, path: String, raw: Bytes) -> Self {
        Self {
            name,
            path,
            raw,
            segments: Vec::new(),
            plain_text: String::new(),
        }
    }

    /// Number of resolved segments
    pub fn resolved_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_resolved()).count()
    }
}
