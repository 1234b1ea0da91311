use anyhow::{anyhow, Result};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use std::time::Instant;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::document::DocumentPackage;
use crate::file_utils::FileManager;
use crate::translation::{
    PipelineOrchestrator, PipelineProgress, ProgressCallback, TranslationInvoker, TranslationJob,
    UsageReport,
};

// @module: Application controller for document translation

/// Main application controller for document package translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.source_language.is_empty() && !self.config.target_language.is_empty()
    }

    /// Run the main workflow for one document with output to the given directory
    pub async fn run(
        &self,
        input_file: PathBuf,
        output_dir: PathBuf,
        force_overwrite: bool,
    ) -> Result<()> {
        let multi_progress = MultiProgress::new();
        self.run_with_progress(input_file, output_dir, &multi_progress, force_overwrite)
            .await
    }

    /// Run the controller with progress reporting
    async fn run_with_progress(
        &self,
        input_file: PathBuf,
        output_dir: PathBuf,
        multi_progress: &MultiProgress,
        force_overwrite: bool,
    ) -> Result<()> {
        let start_time = Instant::now();

        if !input_file.exists() {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        if !FileManager::is_document_package(&input_file) {
            return Err(anyhow!(
                "Input file is not a document package (.docx): {:?}",
                input_file
            ));
        }

        FileManager::ensure_dir(&output_dir)?;

        let input_stem = input_file
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "document".to_string());

        // Load the package and build the job
        let package = DocumentPackage::open(&input_file)?;
        let mut job = TranslationJob::new(package, &self.config)?;

        let invoker = TranslationInvoker::new(&self.config.translation)?;
        let orchestrator = PipelineOrchestrator::new(invoker);

        // One bar for parts, one for segments within the active part
        let parts_bar = multi_progress.add(ProgressBar::new(job.parts.len() as u64));
        let segments_bar = multi_progress.add(ProgressBar::new(0));

        let template_result = ProgressStyle::default_bar()
            .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        parts_bar.set_style(template_result.clone().progress_chars("█▓▒░"));
        segments_bar.set_style(template_result.progress_chars("█▓▒░"));
        parts_bar.set_message("parts");

        let parts_bar_cb = parts_bar.clone();
        let segments_bar_cb = segments_bar.clone();
        let callback: ProgressCallback = Box::new(move |progress: PipelineProgress| {
            parts_bar_cb.set_position(progress.part_index as u64);
            segments_bar_cb.set_length(progress.segment_count as u64);
            segments_bar_cb.set_position(progress.segment_index as u64);
            segments_bar_cb.set_message(progress.part_name.clone());
        });

        let result = orchestrator.run(&mut job, Some(&callback)).await;

        parts_bar.finish_and_clear();
        segments_bar.finish_and_clear();

        let document = result?;

        // Name the output after the translated display name
        let output_path = FileManager::generate_output_path(
            Some(document.display_name.as_str()),
            &input_stem,
            &output_dir,
            &self.config.target_language,
        );

        if output_path.exists() && !force_overwrite {
            warn!(
                "Skipping write, output already exists (use -f to force overwrite): {:?}",
                output_path
            );
            return Ok(());
        }

        FileManager::write_bytes(&output_path, &document.bytes)?;

        let segment_total: usize = job.parts.iter().map(|p| p.segments.len()).sum();
        let report = UsageReport::from_pairs(
            &["declared_words", "segments", "memo_entries", "total_cost"],
            &[
                job.metadata.word_count as f64,
                segment_total as f64,
                job.memo.len() as f64,
                document.total_cost,
            ],
        )
        .map_err(|e| anyhow!(e.to_string()))?;

        debug!("Usage report: {}", report.summary());
        info!(
            "Translation complete in {:.1}s: {:?} (cost {:.4})",
            start_time.elapsed().as_secs_f32(),
            output_path,
            document.total_cost
        );

        Ok(())
    }

    /// Process every document package under a directory
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let documents = FileManager::find_document_packages(&input_dir)?;
        if documents.is_empty() {
            warn!("No document packages found in {:?}", input_dir);
            return Ok(());
        }

        info!("Found {} document(s) to process", documents.len());

        let multi_progress = MultiProgress::new();
        let folder_bar = multi_progress.add(ProgressBar::new(documents.len() as u64));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_bar.set_style(template_result.progress_chars("█▓▒░"));

        let mut failures = 0usize;
        for document in &documents {
            folder_bar.set_message(
                document
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
            );

            let output_dir = document
                .parent()
                .unwrap_or(Path::new("."))
                .to_path_buf();

            if let Err(e) = self
                .run_with_progress(
                    document.clone(),
                    output_dir,
                    &multi_progress,
                    force_overwrite,
                )
                .await
            {
                error!("Failed to translate {:?}: {}", document, e);
                failures += 1;
            }

            folder_bar.inc(1);
        }

        folder_bar.finish_and_clear();
        info!(
            "Finished processing {} document(s), {} failed",
            documents.len(),
            failures
        );

        Ok(())
    }
}
