/*!
 * Error types for the docxlate application.
 *
 * This module contains custom error types for different parts of the pipeline,
 * using the thiserror crate for ergonomic error definitions. Every variant is
 * fatal to the enclosing translation job; the only designed short-circuits
 * (pass-through and cache-hit classification) are not errors at all.
 */

use thiserror::Error;

/// Errors that can occur when talking to a translation provider API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors raised while parsing or segmenting a document part's markup.
///
/// All of these mean the package is structurally suspect; the job aborts
/// before any external call is made.
#[derive(Error, Debug)]
pub enum MarkupError {
    /// A part's XML could not be parsed
    #[error("malformed markup in part '{part}': {detail}")]
    MalformedMarkup {
        /// Part name (e.g. "document", "header1")
        part: String,
        /// Parser diagnostic
        detail: String,
    },

    /// A required part is missing from the package
    #[error("package is missing required part '{0}'")]
    MissingPart(String),

    /// Segment-count sanity check failed
    #[error(
        "part '{part}' produced {segments} segments but the document declares only {word_count} words"
    )]
    SegmentCountExceeded {
        /// Part name
        part: String,
        /// Number of segments extracted
        segments: usize,
        /// Declared document word count
        word_count: usize,
    },
}

/// Errors that can occur during the translating phase
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// A specific segment failed, with enough context for a manual retry
    #[error("translating segment {segment} of part '{part}': {source}")]
    SegmentFailed {
        /// Part name
        part: String,
        /// Zero-based segment index within the part
        segment: usize,
        /// Underlying provider failure
        source: ProviderError,
    },

    /// The provider returned an empty or unusable completion
    #[error("provider returned an empty translation for '{context}'")]
    EmptyTranslation {
        /// What was being translated when the empty completion came back
        context: String,
    },
}

/// Errors raised while writing translations back and validating the output
#[derive(Error, Debug)]
pub enum ReassemblyError {
    /// A rebuilt part failed the well-formedness check
    #[error("part '{part}' failed well-formedness validation: {detail}")]
    ValidationFailed {
        /// Part name
        part: String,
        /// Parser diagnostic
        detail: String,
    },

    /// The number of text nodes no longer matches the resolved translations
    #[error("part '{part}' has {nodes} text nodes but {translations} resolved translations")]
    NodeCountMismatch {
        /// Part name
        part: String,
        /// Text nodes seen during the rewrite pass
        nodes: usize,
        /// Translations available for write-back
        translations: usize,
    },

    /// The output archive could not be assembled
    #[error("failed to package output archive: {0}")]
    PackagingFailed(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Structural error in the document's markup
    #[error("Markup error: {0}")]
    Markup(#[from] MarkupError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error from reassembly or output validation
    #[error("Reassembly error: {0}")]
    Reassembly(#[from] ReassemblyError),

    /// Local programming-contract violation (e.g. mismatched metric lists)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The job was refused before any external call was made
    #[error("Job not allowed to proceed: {0}")]
    JobRejected(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
