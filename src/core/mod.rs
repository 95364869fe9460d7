pub mod batch;
pub mod reader;
pub mod submitter;
pub mod validator;

pub use crate::domain::model::{
    BatchSummary, RawRecord, SubmissionResult, UserRecord, ValidationResult,
};
pub use crate::domain::ports::{ConfigProvider, Submitter};
pub use crate::utils::error::Result;
