use std::time::{Duration, Instant};

use panelgate_models::SendEmailParams;
use tracing::{error, info, warn};

use crate::utils::email::{MailError, Mailer};

#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("邮件发送失败: {0}")]
    Mail(#[from] MailError),

    #[error("Job timed out after {0:?}")]
    Timeout(Duration),
}

/// Delivers one transactional email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendEmailJob {
    pub params: SendEmailParams,
}

impl SendEmailJob {
    pub const QUEUE: &'static str = "send_email";
    pub const TRIES: u32 = 3;
    pub const TIMEOUT: Duration = Duration::from_secs(60);
    pub const MAX_EXCEPTIONS: u32 = 3;

    pub fn new(params: SendEmailParams) -> Self {
        Self { params }
    }

    /// Runs attempt number `attempt` (1-based) under [`Self::TIMEOUT`].
    pub async fn handle(&self, mailer: &dyn Mailer, attempt: u32) -> Result<(), JobError> {
        self.handle_with_timeout(mailer, attempt, Self::TIMEOUT).await
    }

    /// Returns an error only when the attempt should be retried. A mail
    /// failure on the final attempt is logged and swallowed.
    pub async fn handle_with_timeout(
        &self,
        mailer: &dyn Mailer,
        attempt: u32,
        timeout: Duration,
    ) -> Result<(), JobError> {
        let start = Instant::now();
        let email = self.params.email.as_str();
        let subject = self.params.subject.as_str();

        info!(email, subject, attempt, max_tries = Self::TRIES, "SendEmailJob started");

        let result = match tokio::time::timeout(timeout, mailer.send(&self.params)).await {
            Ok(result) => result,
            Err(_) => {
                let err = JobError::Timeout(timeout);
                error!(
                    email,
                    subject,
                    attempt,
                    error = %err,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "SendEmailJob exception"
                );
                return Err(err);
            }
        };

        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(()) => {
                info!(email, subject, attempt, duration_ms, "SendEmailJob completed successfully");
                Ok(())
            }
            Err(e) => {
                warn!(email, subject, attempt, error = %e, duration_ms, "SendEmailJob failed");

                if attempt < Self::TRIES {
                    return Err(JobError::Mail(e));
                }

                error!(email, subject, attempt, error = %e, "SendEmailJob max attempts reached");
                Ok(())
            }
        }
    }

    /// Called once the job will not run again.
    pub fn failed(&self, error: &JobError, attempts: u32) {
        error!(
            email = %self.params.email,
            subject = %self.params.subject,
            error = %error,
            attempts,
            "SendEmailJob permanently failed"
        );
    }
}
