use crate::domain::model::{SubmissionResult, UserRecord};
use async_trait::async_trait;
use std::path::Path;

/// Account-creation endpoint. One call per record, no retry.
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, record: &UserRecord) -> SubmissionResult;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &Path;
    fn api_endpoint(&self) -> &str;
    fn log_file(&self) -> &Path;
}
