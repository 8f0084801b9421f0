//! Outgoing mail.
//!
//! [`SmtpMailer`] sends through `lettre`; [`LogMailer`] only records the
//! message and is used when SMTP is switched off.

use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::header;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use panelgate_config::EmailConfig;
use panelgate_models::SendEmailParams;
use tracing::{info, instrument};

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid address: {0}")]
    Address(String),

    #[error("Failed to build email: {0}")]
    Build(String),

    #[error("SMTP error: {0}")]
    Transport(String),

    #[error("Mail task join error: {0}")]
    Join(String),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, params: &SendEmailParams) -> Result<(), MailError>;
}

/// Picks the SMTP or log mailer from `SMTP_ENABLED`.
pub fn mailer_from_config(config: &EmailConfig) -> Arc<dyn Mailer> {
    if config.enabled {
        Arc::new(SmtpMailer::new(config.clone()))
    } else {
        Arc::new(LogMailer)
    }
}

pub struct SmtpMailer {
    config: EmailConfig,
}

impl SmtpMailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    fn build_message(&self, params: &SendEmailParams) -> Result<Message, MailError> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        Message::builder()
            .from(from.parse().map_err(|e| MailError::Address(format!("{}", e)))?)
            .to(params
                .email
                .parse()
                .map_err(|e| MailError::Address(format!("{}", e)))?)
            .subject(params.subject.as_str())
            .header(header::ContentType::TEXT_PLAIN)
            .body(params.content.clone())
            .map_err(|e| MailError::Build(e.to_string()))
    }

    fn transport(&self) -> Result<SmtpTransport, MailError> {
        if self.config.smtp_username.is_empty() {
            return Ok(SmtpTransport::builder_dangerous(&self.config.smtp_host)
                .port(self.config.smtp_port)
                .build());
        }

        let creds = Credentials::new(
            self.config.smtp_username.clone(),
            self.config.smtp_password.clone(),
        );

        Ok(SmtpTransport::relay(&self.config.smtp_host)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .port(self.config.smtp_port)
            .credentials(creds)
            .build())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    #[instrument(skip(self, params), fields(email = %params.email, subject = %params.subject))]
    async fn send(&self, params: &SendEmailParams) -> Result<(), MailError> {
        let message = self.build_message(params)?;
        let transport = self.transport()?;

        tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| MailError::Join(e.to_string()))?
            .map_err(|e| MailError::Transport(e.to_string()))?;

        Ok(())
    }
}

pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, params: &SendEmailParams) -> Result<(), MailError> {
        info!(
            email = %params.email,
            subject = %params.subject,
            content_len = params.content.len(),
            "SMTP disabled, email not sent"
        );
        Ok(())
    }
}
