//! Queued background work.
//!
//! Jobs are JSON payloads on Redis lists. The API pushes with
//! [`MailQueue::dispatch`]; `panelgate worker` pops them with [`MailWorker`].

pub mod queue;
pub mod send_email;

pub use queue::{JobOutcome, MailQueue, MailWorker, QueuedJob};
pub use send_email::{JobError, SendEmailJob};
