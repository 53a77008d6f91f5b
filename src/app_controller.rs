use anyhow::{Result, Context};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::app_config::{Config, TranslationProvider};
use crate::document::{DocumentFormat, DocumentNode};
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::translation::guard::PlaceholderGuard;
use crate::translation::walker::{TreeWalker, WalkReport};
use crate::translation::{BatchWalker, TranslationService};

// @module: Application controller for locale file translation

/// Main application controller for locale translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        if config.translation.provider == TranslationProvider::Script
            && !language_utils::is_chinese_tag(&config.target_language)
        {
            warn!(
                "Script conversion targets Chinese variants; only mapped characters in '{}' will change",
                config.target_language
            );
        }
        Ok(Self { config })
    }

    /// Run the main workflow for a single locale file
    pub async fn run(&self, input_file: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        let multi_progress = MultiProgress::new();
        self.run_with_progress(&input_file, &output_dir, &multi_progress, force_overwrite).await
    }

    /// Run the main workflow for every locale file under a directory
    pub async fn run_folder(&self, input_dir: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow::anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let locale_files = FileManager::find_locale_files(&input_dir)?;
        if locale_files.is_empty() {
            warn!("No locale files (.yml/.yaml/.json) found in {:?}", input_dir);
            return Ok(());
        }
        info!("Found {} locale files to process", locale_files.len());

        let multi_progress = MultiProgress::new();
        let folder_pb = multi_progress.add(ProgressBar::new(locale_files.len() as u64));
        folder_pb.set_style(Self::progress_style("files"));
        folder_pb.set_message("Processing files");

        let mut failures = 0usize;
        for file in &locale_files {
            if let Err(e) = self
                .run_with_progress(file, &output_dir, &multi_progress, force_overwrite)
                .await
            {
                // One broken file must not stop the rest of the folder
                warn!("Failed to process {:?}: {}", file, e);
                failures += 1;
            }
            folder_pb.inc(1);
        }
        folder_pb.finish_and_clear();

        if failures > 0 {
            warn!("{} of {} files failed", failures, locale_files.len());
        }
        Ok(())
    }

    /// Process one locale file with progress reporting
    async fn run_with_progress(
        &self,
        input_file: &Path,
        output_dir: &Path,
        multi_progress: &MultiProgress,
        force_overwrite: bool,
    ) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(input_file) {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }

        let format = DocumentFormat::from_path(input_file).ok_or_else(|| {
            anyhow::anyhow!("Unsupported file format (expected .yml/.yaml/.json): {:?}", input_file)
        })?;

        FileManager::ensure_dir(output_dir)?;

        // Skip existing translations unless forced
        let output_path =
            FileManager::generate_output_path(input_file, output_dir, &self.config.target_language);
        if output_path.exists() && !force_overwrite {
            warn!(
                "Skipping {:?}, translation already exists (use -f to force overwrite)",
                input_file
            );
            return Ok(());
        }

        let content = FileManager::read_to_string(input_file)?;
        let document = DocumentNode::parse(&content, format)
            .with_context(|| format!("Failed to parse {:?}", input_file))?;

        info!(
            "Translating {:?} ({} strings) -> {}",
            input_file,
            document.count_text_leaves(),
            self.config.target_language
        );

        let (translated, report) = self.translate_document(&document, multi_progress).await?;

        let serialized = translated.serialize(format)?;
        FileManager::write_to_file(&output_path, &serialized)?;

        info!(
            "Wrote {:?}: {} translated, {} kept original, {} skipped ({} alignment failures) in {}",
            output_path,
            report.translated,
            report.failed,
            report.skipped_empty + report.skipped_protected,
            report.alignment_failures,
            Self::format_duration(start_time.elapsed())
        );

        Ok(())
    }

    /// Translate a parsed document with a per-chunk progress bar
    async fn translate_document(
        &self,
        document: &DocumentNode,
        multi_progress: &MultiProgress,
    ) -> Result<(DocumentNode, WalkReport)> {
        let service = TranslationService::new(&self.config)?;

        let walker = TreeWalker::new(
            PlaceholderGuard::new(&self.config.tokens)?,
            self.config.tokens.protected_key_prefixes.clone(),
        );
        let batch_walker = BatchWalker::new(
            walker,
            self.config.translation.get_batch_size(),
            self.config.translation.optimal_concurrent_requests(),
        );

        let total_chunks = batch_walker.chunk_count(document) as u64;
        let progress_bar = multi_progress.add(ProgressBar::new(total_chunks));
        progress_bar.set_style(Self::progress_style("chunks"));
        progress_bar.set_message(format!(
            "{} -> {}",
            self.config.translation.provider.display_name(),
            self.config.target_language
        ));

        let pb = Arc::new(progress_bar);
        let pb_callback = pb.clone();
        let (translated, report) = batch_walker
            .walk_batched(document, &service, move |completed, _total| {
                pb_callback.set_position(completed as u64);
            })
            .await;

        pb.finish_and_clear();
        Ok((translated, report))
    }

    /// Shared progress bar style; falls back to plain bars on odd terminals
    fn progress_style(unit: &str) -> ProgressStyle {
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {unit} ({{percent}}%) {{msg}} {{eta}}"
            ))
            .or_else(|_| {
                ProgressStyle::default_bar()
                    .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}")
            })
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░")
    }

    /// Format a duration as a short human-readable string
    fn format_duration(duration: std::time::Duration) -> String {
        let total_secs = duration.as_secs();
        if total_secs >= 60 {
            format!("{}m {}s", total_secs / 60, total_secs % 60)
        } else {
            format!("{}.{:01}s", total_secs, duration.subsec_millis() / 100)
        }
    }
}
