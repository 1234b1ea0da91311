/*!
 * Document package handling.
 *
 * A Word document is a zip archive of XML parts. This module owns the thin
 * archive boundary (reading parts in order, writing them back with the
 * original layout) and the document-level metadata derived at load time.
 */

pub mod metadata;
pub mod package;

pub use metadata::DocumentMetadata;
pub use package::{DocumentPackage, PackageEntry, part_name, MAIN_DOCUMENT_PART};
