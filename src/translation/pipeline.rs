/*!
 * Pipeline orchestrator for whole-document translation jobs.
 *
 * The orchestrator drives one job through its phases:
 * 1. Extracting: segment every part and sanity-check the counts
 * 2. Translating: classify and resolve each segment in reading order
 * 3. Reassembling: write back, validate and package the output
 *
 * Any failure in any phase moves the job to Failed and nothing is exposed;
 * writes only ever happen during reassembly, so a translation failure
 * leaves the source trees untouched.
 */

use bytes::Bytes;
use log::{debug, info};

use crate::app_config::Config;
use crate::document::{part_name, DocumentMetadata, DocumentPackage};
use crate::errors::{AppError, MarkupError, ReassemblyError, TranslationError};
use crate::language_utils;
use crate::markup::{MarkupPart, ReassemblyValidator, SegmentKind, TextSegmenter};

use super::context::ContextWindow;
use super::cost::CostLedger;
use super::gate::{SegmentAction, TranslationGate};
use super::invoker::{sample_excerpt, TranslationInvoker, TranslationRequest};
use super::memo::TranslationMemo;

/// Sentences per sampled excerpt when inferring the document topic
const TOPIC_SAMPLE_SENTENCES: usize = 5;

/// Phases of a translation job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// Created, nothing has run yet
    Idle,
    /// Segmenting parts and checking counts
    Extracting,
    /// Resolving segments
    Translating,
    /// Writing back, validating, packaging
    Reassembling,
    /// Finished successfully
    Done,
    /// Aborted; no output was exposed
    Failed,
}

/// One document-translation job: the aggregate that owns the parts, the
/// memo, the ledger and the document facts for a single session.
pub struct TranslationJob {
    /// The opened package this job translates
    pub package: DocumentPackage,

    /// Parts in processing order: document, then headers, then footers
    pub parts: Vec<MarkupPart>,

    /// Session memo of single-word translations
    pub memo: TranslationMemo,

    /// Accumulated external-call cost
    pub ledger: CostLedger,

    /// Source language code
    pub source_language: String,

    /// Target language code
    pub target_language: String,

    /// Configured domain context; empty means infer one
    pub domain_context: String,

    /// Optional word-count ceiling from the admission collaborator
    pub word_budget: Option<usize>,

    /// Document facts, filled during extraction
    pub metadata: DocumentMetadata,

    /// Translated display filename, set during translation
    pub display_name: Option<String>,

    state: JobState,
}

impl TranslationJob {
    /// Create a job over an opened package
    pub fn new(package: DocumentPackage, config: &Config) -> Result<Self, MarkupError> {
        let paths = package.translatable_part_paths()?;

        let parts = paths
            .into_iter()
            .map(|path| {
                let raw = package
                    .part_bytes(&path)
                    .cloned()
                    .unwrap_or_default();
                MarkupPart::new(part_name(&path), path, raw)
            })
            .collect();

        Ok(Self {
            package,
            parts,
            memo: TranslationMemo::new(),
            ledger: CostLedger::new(),
            source_language: config.source_language.clone(),
            target_language: config.target_language.clone(),
            domain_context: config.domain_context.clone(),
            word_budget: config.quota_words,
            metadata: DocumentMetadata::default(),
            display_name: None,
            state: JobState::Idle,
        })
    }

    /// Current job state
    pub fn state(&self) -> JobState {
        self.state
    }

    /// Total accumulated cost so far
    pub fn total_cost(&self) -> f64 {
        self.ledger.total()
    }

    fn transition(&mut self, next: JobState) {
        debug!("Job state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// Progress snapshot emitted while a job runs.
///
/// Both fractions are monotonically increasing within their scope; the
/// segment fraction resets to zero at the start of each new part.
#[derive(Debug, Clone)]
pub struct PipelineProgress {
    /// Phase the job is in
    pub state: JobState,

    /// Index of the active part
    pub part_index: usize,

    /// Total number of parts
    pub part_count: usize,

    /// Name of the active part
    pub part_name: String,

    /// Index of the active segment within the part
    pub segment_index: usize,

    /// Total segments in the active part
    pub segment_count: usize,
}

impl PipelineProgress {
    /// Fraction of parts completed
    pub fn part_fraction(&self) -> f32 {
        if self.part_count == 0 {
            0.0
        } else {
            self.part_index as f32 / self.part_count as f32
        }
    }

    /// Fraction of the active part's segments completed
    pub fn segment_fraction(&self) -> f32 {
        if self.segment_count == 0 {
            0.0
        } else {
            self.segment_index as f32 / self.segment_count as f32
        }
    }
}

/// Callback receiving progress snapshots
pub type ProgressCallback = Box<dyn Fn(PipelineProgress) + Send + Sync>;

/// The finished product of a successful job
#[derive(Debug, Clone)]
pub struct TranslatedDocument {
    /// Output package bytes, same internal layout as the input
    pub bytes: Bytes,

    /// Translated display filename (no extension)
    pub display_name: String,

    /// Total external-call cost
    pub total_cost: f64,
}

/// Drives translation jobs through their phases
pub struct PipelineOrchestrator {
    invoker: TranslationInvoker,
}

impl PipelineOrchestrator {
    /// Create an orchestrator around an invoker
    pub fn new(invoker: TranslationInvoker) -> Self {
        Self { invoker }
    }

    /// Run a job to completion.
    ///
    /// On any error the job transitions to Failed and no output exists;
    /// the error names the stage and, where possible, the offending
    /// part and segment.
    pub async fn run(
        &self,
        job: &mut TranslationJob,
        progress: Option<&ProgressCallback>,
    ) -> Result<TranslatedDocument, AppError> {
        match self.drive(job, progress).await {
            Ok(document) => {
                job.transition(JobState::Done);
                info!(
                    "Job done: '{}' translated for {:.4}",
                    document.display_name, document.total_cost
                );
                Ok(document)
            }
            Err(error) => {
                job.transition(JobState::Failed);
                Err(error)
            }
        }
    }

    async fn drive(
        &self,
        job: &mut TranslationJob,
        progress: Option<&ProgressCallback>,
    ) -> Result<TranslatedDocument, AppError> {
        self.extract(job)?;
        self.translate(job, progress).await?;
        self.reassemble(job)
    }

    /// Segment every part, derive metadata and enforce the structural
    /// sanity check before any external call can happen.
    fn extract(&self, job: &mut TranslationJob) -> Result<(), AppError> {
        job.transition(JobState::Extracting);

        for part in &mut job.parts {
            TextSegmenter::segment_part(part)?;
        }

        let body_text = job.parts[0].plain_text.clone();
        job.metadata = DocumentMetadata::derive(&job.package, &body_text);

        for part in &job.parts {
            if part.segments.len() > job.metadata.word_count {
                return Err(MarkupError::SegmentCountExceeded {
                    part: part.name.clone(),
                    segments: part.segments.len(),
                    word_count: job.metadata.word_count,
                }
                .into());
            }
        }

        if let Some(budget) = job.word_budget {
            if job.metadata.word_count > budget {
                return Err(AppError::JobRejected(format!(
                    "document declares {} words, above the allowed {}",
                    job.metadata.word_count, budget
                )));
            }
        }

        info!(
            "Extracted {} parts, {} declared words, {} distinct terms",
            job.parts.len(),
            job.metadata.word_count,
            job.metadata.vocabulary.len()
        );

        Ok(())
    }

    /// Resolve every segment of every part, in fixed order.
    async fn translate(
        &self,
        job: &mut TranslationJob,
        progress: Option<&ProgressCallback>,
    ) -> Result<(), AppError> {
        job.transition(JobState::Translating);

        let origin = display_language(&job.source_language);
        let destiny = display_language(&job.target_language);

        let domain = self.resolve_domain_context(job, &origin).await?;

        // The filename gets its own call, outside the segment loop
        let stem = job.metadata.file_stem.clone();
        let outcome = self
            .invoker
            .translate_plain(&stem, &origin, &destiny)
            .await
            .map_err(AppError::Translation)?;
        job.ledger.add(outcome.cost);
        job.display_name = Some(outcome.text.trim().to_string());

        let doc_features = format!(
            "{} words, {} distinct terms",
            job.metadata.word_count,
            job.metadata.vocabulary.len()
        );

        let gate = TranslationGate::new(job.memo.clone());
        let part_count = job.parts.len();

        for part_index in 0..part_count {
            let part_name = job.parts[part_index].name.clone();
            let plain_text = job.parts[part_index].plain_text.clone();
            let segment_count = job.parts[part_index].segments.len();
            let is_body = part_index == 0;

            debug!(
                "Translating part '{}' ({} segments)",
                part_name, segment_count
            );

            for segment_index in 0..segment_count {
                emit(
                    progress,
                    PipelineProgress {
                        state: JobState::Translating,
                        part_index,
                        part_count,
                        part_name: part_name.clone(),
                        segment_index,
                        segment_count,
                    },
                );

                let segment_text = job.parts[part_index].segments[segment_index].text.clone();

                match gate.classify(&segment_text) {
                    SegmentAction::PassThrough => {
                        job.parts[part_index].segments[segment_index]
                            .resolve(SegmentKind::PassThrough, segment_text);
                    }
                    SegmentAction::CacheHit(hit) => {
                        job.parts[part_index].segments[segment_index]
                            .resolve(SegmentKind::CacheHit, hit);
                    }
                    SegmentAction::Translate => {
                        let window = if is_body {
                            ContextWindow::around(&plain_text, &segment_text)
                        } else {
                            ContextWindow::empty()
                        };

                        let request = TranslationRequest {
                            text: &segment_text,
                            origin_lang: &origin,
                            destiny_lang: &destiny,
                            domain_context: &domain,
                            doc_features: &doc_features,
                            preceding_context: &window.preceding,
                            following_context: &window.following,
                        };

                        let outcome = self
                            .invoker
                            .invoke(&request)
                            .await
                            .map_err(|e| segment_error(&part_name, segment_index, e))?;

                        job.ledger.add(outcome.cost);
                        gate.record_translation(&segment_text, &outcome.text);
                        job.parts[part_index].segments[segment_index]
                            .resolve(SegmentKind::Translated, outcome.text);
                    }
                }
            }

            emit(
                progress,
                PipelineProgress {
                    state: JobState::Translating,
                    part_index,
                    part_count,
                    part_name: part_name.clone(),
                    segment_index: segment_count,
                    segment_count,
                },
            );
        }

        if let Some(last) = job.parts.last() {
            emit(
                progress,
                PipelineProgress {
                    state: JobState::Translating,
                    part_index: part_count,
                    part_count,
                    part_name: last.name.clone(),
                    segment_index: last.segments.len(),
                    segment_count: last.segments.len(),
                },
            );
        }

        let (hits, misses, hit_rate) = job.memo.stats();
        debug!(
            "Memo after translation: {} entries, {} hits / {} misses ({:.0}% hit rate)",
            job.memo.len(),
            hits,
            misses,
            hit_rate * 100.0
        );

        Ok(())
    }

    /// Write translations back, validate every markup entry and package
    /// the output archive.
    fn reassemble(&self, job: &mut TranslationJob) -> Result<TranslatedDocument, AppError> {
        job.transition(JobState::Reassembling);

        for part in &job.parts {
            let resolved = part.resolved_count();
            if resolved != part.segments.len() {
                return Err(ReassemblyError::NodeCountMismatch {
                    part: part.name.clone(),
                    nodes: part.segments.len(),
                    translations: resolved,
                }
                .into());
            }
        }

        let bytes = ReassemblyValidator::reassemble(&job.package, &job.parts)?;

        Ok(TranslatedDocument {
            bytes,
            display_name: job
                .display_name
                .clone()
                .unwrap_or_else(|| job.metadata.file_stem.clone()),
            total_cost: job.ledger.total(),
        })
    }

    /// Use the configured domain context, or infer one from two sampled
    /// excerpts of the body text.
    async fn resolve_domain_context(
        &self,
        job: &mut TranslationJob,
        origin: &str,
    ) -> Result<String, AppError> {
        if !job.domain_context.trim().is_empty() {
            return Ok(job.domain_context.clone());
        }

        let body_text = job.parts[0].plain_text.clone();
        let sentences: Vec<&str> = body_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if sentences.is_empty() {
            return Ok(String::new());
        }

        let (excerpt_one, excerpt_two) = {
            let mut rng = rand::rng();
            (
                sample_excerpt(&sentences, TOPIC_SAMPLE_SENTENCES, &mut rng),
                sample_excerpt(&sentences, TOPIC_SAMPLE_SENTENCES, &mut rng),
            )
        };

        let (topic, cost) = self
            .invoker
            .infer_topic(&excerpt_one, &excerpt_two, origin)
            .await
            .map_err(AppError::Translation)?;

        job.ledger.add(cost);
        info!("Inferred document topic: {}", topic);

        Ok(topic)
    }
}

/// Human-readable language name for prompts, falling back to the raw code
fn display_language(code: &str) -> String {
    language_utils::get_language_name(code).unwrap_or_else(|_| code.to_string())
}

fn segment_error(part: &str, segment: usize, error: TranslationError) -> AppError {
    match error {
        TranslationError::Provider(source) => {
            AppError::Translation(TranslationError::SegmentFailed {
                part: part.to_string(),
                segment,
                source,
            })
        }
        other => AppError::Translation(other),
    }
}

fn emit(progress: Option<&ProgressCallback>, update: PipelineProgress) {
    if let Some(callback) = progress {
        callback(update);
    }
}
