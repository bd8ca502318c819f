// file: src/pipeline/progress.rs
// description: progress tracking and statistics for multi-file ingest runs
// reference: uses indicatif for progress bars and tracks processing metrics

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::cell::Cell;
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct IngestStats {
    pub files_ingested: usize,
    pub files_failed: usize,
    pub records_created: usize,
    pub rows_dropped: usize,
    pub total_bytes: u64,
    pub duration_ms: u64,
}

impl IngestStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records_per_second(&self) -> f64 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        self.records_created as f64 * 1000.0 / self.duration_ms as f64
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.files_ingested + self.files_failed;
        if total == 0 {
            return 0.0;
        }
        (self.files_ingested as f64 / total as f64) * 100.0
    }
}

/// Counters are updated from a single task; the tracker is not `Sync`.
pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    files_ingested: Cell<usize>,
    files_failed: Cell<usize>,
    records_created: Cell<usize>,
    rows_dropped: Cell<usize>,
    total_bytes: Cell<u64>,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_files: usize) -> Self {
        Self::with_color(total_files, true)
    }

    pub fn with_color(total_files: usize, colored: bool) -> Self {
        let multi_progress = MultiProgress::new();
        Self::build(multi_progress, total_files, colored)
    }

    /// Tracker that draws nothing; counters still work.
    pub fn hidden(total_files: usize) -> Self {
        let multi_progress = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
        Self::build(multi_progress, total_files, false)
    }

    fn build(multi_progress: MultiProgress, total_files: usize, colored: bool) -> Self {
        let main_bar = create_progress_bar(&multi_progress, total_files as u64, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self {
            main_bar,
            detail_bar,
            files_ingested: Cell::new(0),
            files_failed: Cell::new(0),
            records_created: Cell::new(0),
            rows_dropped: Cell::new(0),
            total_bytes: Cell::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn file_ingested(&self, records: usize, rows_dropped: usize, bytes: u64) {
        bump(&self.files_ingested, 1);
        bump(&self.records_created, records);
        bump(&self.rows_dropped, rows_dropped);
        self.total_bytes.set(self.total_bytes.get().saturating_add(bytes));
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn file_failed(&self) {
        bump(&self.files_failed, 1);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn set_current(&self, file_name: &str) {
        self.main_bar.set_message(file_name.to_string());
    }

    /// Prints a line above the bars without corrupting them.
    pub fn println(&self, line: &str) {
        self.main_bar.suspend(|| println!("{}", line));
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Ingest complete");
        self.detail_bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> IngestStats {
        IngestStats {
            files_ingested: self.files_ingested.get(),
            files_failed: self.files_failed.get(),
            records_created: self.records_created.get(),
            rows_dropped: self.rows_dropped.get(),
            total_bytes: self.total_bytes.get(),
            duration_ms: self.start_time.elapsed().as_millis() as u64,
        }
    }

    fn update_detail_bar(&self) {
        let records = self.records_created.get();
        let dropped = self.rows_dropped.get();
        let failed = self.files_failed.get();

        self.detail_bar.set_message(format!(
            "Records: {} | Dropped rows: {} | Failed files: {}",
            records, dropped, failed
        ));
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn bump(counter: &Cell<usize>, by: usize) {
    counter.set(counter.get().saturating_add(by));
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    let (template, chars) = if colored {
        (
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            "█▓▒░",
        )
    } else {
        ("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}", "=>-")
    };

    if let Ok(style) = ProgressStyle::default_bar().template(template) {
        bar.set_style(style.progress_chars(chars));
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    if let Ok(style) = ProgressStyle::default_bar().template("{msg}") {
        bar.set_style(style);
    }
    bar
}
