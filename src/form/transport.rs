use std::future::Future;
use std::time::Duration;

use log::debug;

use crate::errors::UploadError;
use crate::models::response::UploadResult;
use crate::models::submission::Submission;
use crate::routes::upload::acknowledge;

/// Whatever carries a [`Submission`] from the form to the upload endpoint.
pub trait SubmitTransport {
    fn send(
        &self,
        submission: Submission,
    ) -> impl Future<Output = Result<UploadResult, UploadError>>;
}

/// Waits a fixed delay and acknowledges without contacting anything.
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    delay: Duration,
}

impl SimulatedTransport {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl SubmitTransport for SimulatedTransport {
    async fn send(&self, submission: Submission) -> Result<UploadResult, UploadError> {
        debug!(
            "Simulating upload of submission {} ({:?} delay)",
            submission.id, self.delay
        );
        tokio::time::sleep(self.delay).await;
        Ok(UploadResult::accepted())
    }
}

/// Waits a fixed delay, then hands the submission to the upload endpoint's
/// acknowledgement in-process.
#[derive(Debug, Clone)]
pub struct LocalEndpoint {
    delay: Duration,
}

impl LocalEndpoint {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl SubmitTransport for LocalEndpoint {
    async fn send(&self, submission: Submission) -> Result<UploadResult, UploadError> {
        tokio::time::sleep(self.delay).await;
        let id = submission.id;
        let result = acknowledge(submission);
        if !result.success {
            return Err(UploadError::SubmissionFailed(format!(
                "submission {} was not acknowledged",
                id
            )));
        }
        Ok(result)
    }
}
