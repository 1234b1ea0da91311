/*!
 * Translation pipeline for document packages.
 *
 * This module contains the core of the extraction → translation →
 * reassembly pipeline. It is split into several submodules:
 *
 * - `pipeline`: Job aggregate, state machine and orchestrator
 * - `gate`: Per-segment policy (pass-through / cache-hit / translate)
 * - `memo`: Session-scoped single-word translation memo
 * - `invoker`: Adapter around the external translation collaborator
 * - `context`: Positional context windows over the body text
 * - `cost`: Cost ledger and usage reporting
 */

// Re-export main types for easier usage
pub use self::context::ContextWindow;
pub use self::cost::{CostLedger, UsageReport};
pub use self::gate::{repair_edge_whitespace, SegmentAction, TranslationGate};
pub use self::invoker::{
    CooldownPolicy, TranslationInvoker, TranslationOutcome, TranslationRequest,
};
pub use self::memo::TranslationMemo;
pub use self::pipeline::{
    JobState, PipelineOrchestrator, PipelineProgress, ProgressCallback, TranslatedDocument,
    TranslationJob,
};

// Submodules
pub mod context;
pub mod cost;
pub mod gate;
pub mod invoker;
pub mod memo;
pub mod pipeline;
