pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::Settings;

pub use core::{
    batch::BatchOrchestrator, reader::RecordReader, submitter::ApiSubmitter, validator::validate,
};
pub use domain::model::{
    BatchSummary, InvalidReason, RawRecord, SubmissionResult, SubmitFailure, UserRecord,
    ValidationResult,
};
pub use utils::error::{ImportError, Result};
pub use utils::logger::{LogConfig, LogSink, MemoryLog};
