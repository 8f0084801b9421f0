use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use panelgate_cache::{CacheError, PanelStore};
use panelgate_models::SendEmailParams;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use super::send_email::SendEmailJob;
use crate::utils::email::Mailer;

/// Wire format of a queued mail job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedJob {
    pub id: String,
    pub params: SendEmailParams,
    /// Attempts already made.
    pub attempts: u32,
    /// Attempts that ended in an error.
    #[serde(default)]
    pub exceptions: u32,
}

impl QueuedJob {
    pub fn new(params: SendEmailParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            params,
            attempts: 0,
            exceptions: 0,
        }
    }
}

/// Producer side of the mail queue.
#[derive(Clone)]
pub struct MailQueue {
    store: Arc<dyn PanelStore>,
}

impl MailQueue {
    pub fn new(store: Arc<dyn PanelStore>) -> Self {
        Self { store }
    }

    /// Enqueues a mail and returns the job id.
    #[instrument(skip(self, params), fields(email = %params.email))]
    pub async fn dispatch(&self, params: SendEmailParams) -> Result<String, CacheError> {
        let job = QueuedJob::new(params);
        self.push(&job).await?;
        debug!(job_id = %job.id, "SendEmailJob queued");
        Ok(job.id)
    }

    async fn push(&self, job: &QueuedJob) -> Result<(), CacheError> {
        let payload = serde_json::to_string(job)?;
        self.store.push_job(SendEmailJob::QUEUE, &payload).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    Completed,
    Retried { attempts: u32 },
    Failed { attempts: u32 },
    /// Payload could not be decoded and was dropped.
    Discarded,
}

/// Consumer side of the mail queue.
pub struct MailWorker {
    queue: MailQueue,
    store: Arc<dyn PanelStore>,
    mailer: Arc<dyn Mailer>,
    poll_timeout: Duration,
    job_timeout: Duration,
}

impl MailWorker {
    pub fn new(store: Arc<dyn PanelStore>, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            queue: MailQueue::new(store.clone()),
            store,
            mailer,
            poll_timeout: Duration::from_secs(1),
            job_timeout: SendEmailJob::TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_poll_timeout(mut self, poll_timeout: Duration) -> Self {
        self.poll_timeout = poll_timeout;
        self
    }

    #[must_use]
    pub fn with_job_timeout(mut self, job_timeout: Duration) -> Self {
        self.job_timeout = job_timeout;
        self
    }

    /// Pops and runs at most one job. `None` when the queue stayed empty.
    pub async fn run_once(&self) -> Result<Option<JobOutcome>, CacheError> {
        let Some(payload) = self
            .store
            .pop_job(SendEmailJob::QUEUE, self.poll_timeout)
            .await?
        else {
            return Ok(None);
        };

        let mut queued: QueuedJob = match serde_json::from_str(&payload) {
            Ok(job) => job,
            Err(e) => {
                error!(error = %e, "Discarding undecodable SendEmailJob payload");
                return Ok(Some(JobOutcome::Discarded));
            }
        };

        let job = SendEmailJob::new(queued.params.clone());
        queued.attempts += 1;
        let attempt = queued.attempts;

        let Err(err) = job
            .handle_with_timeout(self.mailer.as_ref(), attempt, self.job_timeout)
            .await
        else {
            return Ok(Some(JobOutcome::Completed));
        };

        queued.exceptions += 1;

        if queued.attempts < SendEmailJob::TRIES && queued.exceptions < SendEmailJob::MAX_EXCEPTIONS {
            warn!(job_id = %queued.id, attempt, error = %err, "SendEmailJob will be retried");
            self.queue.push(&queued).await?;
            return Ok(Some(JobOutcome::Retried { attempts: attempt }));
        }

        job.failed(&err, attempt);
        Ok(Some(JobOutcome::Failed { attempts: attempt }))
    }

    /// Processes jobs until `shutdown` resolves.
    ///
    /// Shutdown is only observed between jobs: a popped job always runs to
    /// completion, including its re-enqueue.
    pub async fn run<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        info!(queue = SendEmailJob::QUEUE, "Mail worker started");
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = std::future::ready(()) => {}
            }

            if let Err(e) = self.run_once().await {
                error!(error = %e, "Mail queue error");
                tokio::time::sleep(self.poll_timeout).await;
            }
        }

        info!("Mail worker stopped");
    }
}
