//! Outgoing mail. Delivery is pluggable; the default mailer only records messages in the log.

use confhub_domain::events::ConferenceCreated;
use std::borrow::Cow;
use std::fmt::Debug;
use tracing::info;

pub const CONFIRMATION_SUBJECT: &str = "You created a new Conference!";

#[confhub_derive::confhub_error]
pub enum MailError {
    #[error("Mail delivery failed{}: {message}", format_context(context))]
    Delivery { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl Mail {
    /// Confirmation sent to the organizer of a freshly created conference.
    #[must_use]
    pub fn conference_confirmation(event: &ConferenceCreated) -> Self {
        Self {
            to: event.organizer_email.clone(),
            subject: CONFIRMATION_SUBJECT.to_owned(),
            body: format!(
                "Hi {}, you have created the following conference:\r\n\r\n{} ({})",
                event.organizer_name, event.name, event.conference_key
            ),
        }
    }
}

pub trait Mailer: Debug + Send + Sync + 'static {
    /// Delivers `mail`.
    ///
    /// # Errors
    /// Returns [`MailError::Delivery`] when the message could not be handed off.
    fn send(&self, mail: &Mail) -> Result<(), MailError>;
}

/// Writes every message to the log instead of delivering it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, mail: &Mail) -> Result<(), MailError> {
        info!(to = %mail.to, subject = %mail.subject, body = %mail.body, "Mail sent");
        Ok(())
    }
}
