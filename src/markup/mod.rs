/*!
 * Markup tree handling for document parts.
 *
 * Each translatable part (body, header, footer) is processed as an XML
 * event stream: the segmenter extracts the ordered text nodes, and the
 * reassembly pass streams the original events back out with only the text
 * inside targeted nodes replaced. Node references are ordinal indices into
 * the part's text-node table, never live pointers, so a part can be
 * re-streamed any number of times without dangling references.
 */

pub mod part;
pub mod reassembly;
pub mod segmenter;

pub use part::{MarkupPart, Segment, SegmentKind};
pub use reassembly::ReassemblyValidator;
pub use segmenter::TextSegmenter;
