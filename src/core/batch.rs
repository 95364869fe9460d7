use crate::core::reader::RecordReader;
use crate::core::validator::validate;
use crate::domain::model::{BatchSummary, SubmissionResult, ValidationResult};
use crate::domain::ports::Submitter;
use crate::utils::error::{ImportError, Result};
use std::path::Path;
use tracing::instrument::WithSubscriber;
use tracing::Dispatch;

/// Drives one file through validation and submission, one row at a time.
///
/// Every failure ends in a log line: file-level problems abort the run with no
/// summary, row-level problems are counted and the loop moves on.
pub struct BatchOrchestrator<S: Submitter> {
    submitter: S,
    dispatch: Dispatch,
    error_log: String,
}

impl<S: Submitter> BatchOrchestrator<S> {
    pub fn new(submitter: S, dispatch: Dispatch) -> Self {
        Self {
            submitter,
            dispatch,
            error_log: "error_log.txt".to_string(),
        }
    }

    /// Log file named in the end-of-run warning.
    pub fn with_error_log(mut self, error_log: impl Into<String>) -> Self {
        self.error_log = error_log.into();
        self
    }

    /// Returns the summary when every row was processed, `None` when the run aborted.
    pub async fn run(&self, path: &Path) -> Option<BatchSummary> {
        self.run_logged(path)
            .with_subscriber(self.dispatch.clone())
            .await
    }

    async fn run_logged(&self, path: &Path) -> Option<BatchSummary> {
        match self.process(path).await {
            Ok(summary) => {
                self.report(&summary);
                Some(summary)
            }
            Err(e @ (ImportError::FileNotFound { .. } | ImportError::SchemaError { .. })) => {
                tracing::error!("{}", e);
                None
            }
            Err(e) => {
                tracing::error!("Error reading CSV file: {}", e);
                None
            }
        }
    }

    async fn process(&self, path: &Path) -> Result<BatchSummary> {
        let reader = RecordReader::open(path)?;
        tracing::info!("Starting to process file: {}", path.display());

        let mut summary = BatchSummary::default();

        for row in reader {
            let row = row?;
            summary.total += 1;

            let record = match validate(&row) {
                ValidationResult::Valid(record) => record,
                ValidationResult::Invalid(reason) => {
                    summary.skipped += 1;
                    tracing::warn!("Row {} skipped: {} - Data: {}", row.row_number, reason, row);
                    continue;
                }
            };

            match self.submitter.submit(&record).await {
                SubmissionResult::Created => summary.successful += 1,
                SubmissionResult::Failed(failure) => {
                    summary.failed += 1;
                    tracing::error!(
                        "Row {} failed: {} - User: {}",
                        row.row_number,
                        failure,
                        row.get("email").unwrap_or("unknown")
                    );
                }
            }
        }

        Ok(summary)
    }

    fn report(&self, summary: &BatchSummary) {
        tracing::info!("{}", "=".repeat(50));
        tracing::info!("PROCESSING COMPLETE");
        tracing::info!("Total rows: {}", summary.total);
        tracing::info!("Successfully created: {}", summary.successful);
        tracing::info!("Skipped (validation failed): {}", summary.skipped);
        tracing::info!("Failed (API errors): {}", summary.failed);

        if summary.has_problems() {
            tracing::warn!(
                "Some users were not created. Check {} for details.",
                self.error_log
            );
        }
    }
}
