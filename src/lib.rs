/*!
 * # docxlate - structure-preserving document translation
 *
 * A Rust library and CLI for translating the text of Word document
 * packages while preserving every non-text structural element
 * byte-for-byte.
 *
 * ## Features
 *
 * - Extract translatable text runs from a package's markup parts
 *   (body, headers, footers) in reading order
 * - Translate via OpenAI-compatible providers, with positional context
 *   windows around each body segment
 * - Memoize single-word translations for the session so repeated words
 *   cost one external call
 * - Repair edge whitespace the external translator drops
 * - Validate every rebuilt part before the output package is exposed
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: Package (zip) boundary and document metadata
 * - `markup`: Part segmentation and reassembly:
 *   - `markup::segmenter`: Ordered text-node extraction
 *   - `markup::reassembly`: Write-back, validation, repackaging
 * - `translation`: The translation pipeline:
 *   - `translation::pipeline`: Job aggregate and orchestrator
 *   - `translation::gate`: Per-segment policy
 *   - `translation::memo`: Session memo for single words
 *   - `translation::invoker`: External-call adapter
 * - `providers`: Client implementations for translation backends:
 *   - `providers::openai`: OpenAI-compatible API client
 *   - `providers::mock`: Deterministic test provider
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod markup;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use document::{DocumentMetadata, DocumentPackage};
pub use markup::{MarkupPart, Segment, SegmentKind, TextSegmenter};
pub use translation::{
    PipelineOrchestrator, TranslatedDocument, TranslationInvoker, TranslationJob, TranslationMemo,
};
pub use errors::{AppError, MarkupError, ProviderError, ReassemblyError, TranslationError};
