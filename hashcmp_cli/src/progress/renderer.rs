//! Progress rendering for the CLI
//!
//! Turns [`ProgressUpdate`] messages into indicatif bars: one bar counting
//! files, plus a byte bar for each file while it is being hashed.

use colored::*;
use hashcmp_core::progress::ProgressUpdate;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::mpsc;

const FILES_TEMPLATE: &str = "{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files";
const BYTES_TEMPLATE: &str =
    "  {prefix} [{bar:30.green/white}] {bytes}/{total_bytes} {bytes_per_sec}";

/// Render progress updates until every sender is dropped
pub async fn render_progress(mut rx: mpsc::UnboundedReceiver<ProgressUpdate>) {
    let mut renderer = ProgressRenderer::new(ProgressDrawTarget::stderr());

    while let Some(update) = rx.recv().await {
        renderer.handle_update(update);
    }

    renderer.finish();
}

/// Progress renderer that manages visual progress display
pub struct ProgressRenderer {
    multi: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: HashMap<PathBuf, ProgressBar>,
    files_done: u64,
}

impl ProgressRenderer {
    pub fn new(target: ProgressDrawTarget) -> Self {
        Self {
            multi: MultiProgress::with_draw_target(target),
            batch_bar: None,
            file_bars: HashMap::new(),
            files_done: 0,
        }
    }

    /// Handle a progress update
    pub fn handle_update(&mut self, update: ProgressUpdate) {
        match update {
            ProgressUpdate::FileProgress {
                path,
                bytes_processed,
                total_bytes,
                operation: _,
            } => self.update_file_progress(path, bytes_processed, total_bytes),

            ProgressUpdate::BatchProgress {
                current: _,
                total,
                current_file,
            } => self.update_batch_progress(total, current_file),

            // Unnamed hash progress carries no file identity
            ProgressUpdate::HashProgress { .. } => {}
        }
    }

    /// Files completed so far
    pub fn files_done(&self) -> u64 {
        self.files_done
    }

    fn update_file_progress(&mut self, path: PathBuf, bytes_processed: u64, total_bytes: u64) {
        let multi = &self.multi;
        let bar = self.file_bars.entry(path.clone()).or_insert_with(|| {
            let bar = multi.add(ProgressBar::new(total_bytes));
            bar.set_style(
                ProgressStyle::with_template(BYTES_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=> "),
            );
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            bar.set_prefix(file_name);
            bar
        });

        // Parallel workers report independently; keep the furthest
        if bytes_processed > bar.position() {
            bar.set_position(bytes_processed);
        }
    }

    fn update_batch_progress(&mut self, total: usize, current_file: Option<String>) {
        let multi = &self.multi;
        let batch_bar = self.batch_bar.get_or_insert_with(|| {
            let bar = multi.insert(0, ProgressBar::new(total as u64));
            bar.set_style(
                ProgressStyle::with_template(FILES_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("##-"),
            );
            bar.set_message("Hashing".bold().to_string());
            bar
        });

        self.files_done += 1;
        batch_bar.set_position(self.files_done);

        if let Some(file) = current_file
            && let Some(bar) = self.file_bars.remove(&PathBuf::from(file))
        {
            bar.finish_and_clear();
            self.multi.remove(&bar);
        }
    }

    /// Finish all progress bars
    pub fn finish(self) {
        for (_, bar) in self.file_bars {
            bar.finish_and_clear();
        }

        if let Some(bar) = self.batch_bar {
            bar.finish_with_message("✓ Hashing complete".green().to_string());
        }
    }
}
