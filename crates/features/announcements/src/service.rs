use crate::Announcements;
use crate::mail::{Mail, MailError};
use confhub_database::DatabaseError;
use confhub_domain::constants::{FEATURED_SPEAKER_KEY, RECENT_ANNOUNCEMENTS_KEY};
use confhub_domain::events::{ConferenceCreated, SessionCreated};
use tracing::debug;

impl Announcements {
    /// Rebuilds the "nearly sold out" announcement from the stored seat counts.
    ///
    /// Returns the new text, or `None` after clearing the entry when no conference qualifies.
    ///
    /// # Errors
    /// Returns a [`DatabaseError`] when the conferences cannot be loaded.
    pub async fn refresh_announcement(&self) -> Result<Option<String>, DatabaseError> {
        let nearly_sold_out =
            self.database.conferences_with_seats_between(0, self.nearly_sold_out_threshold).await?;

        if nearly_sold_out.is_empty() {
            self.cache.clear(RECENT_ANNOUNCEMENTS_KEY);
            return Ok(None);
        }

        let names: Vec<&str> = nearly_sold_out.iter().map(|c| c.name.as_str()).collect();
        let text = format!(
            "Last chance to attend! The following conferences are nearly sold out: {}",
            names.join(", ")
        );
        self.cache.set(RECENT_ANNOUNCEMENTS_KEY, text.clone());
        debug!(conferences = names.len(), "Announcement refreshed");

        Ok(Some(text))
    }

    /// Current announcement, empty when there is none.
    #[must_use]
    pub fn announcement(&self) -> String {
        self.cache.get(RECENT_ANNOUNCEMENTS_KEY).unwrap_or_default()
    }

    #[must_use]
    pub fn featured_speaker(&self) -> String {
        self.cache.get(FEATURED_SPEAKER_KEY).unwrap_or_default()
    }

    /// Features the new session's speaker when they give more than one session at that
    /// conference. Returns whether the featured speaker changed.
    ///
    /// # Errors
    /// Returns a [`DatabaseError`] when the speaker's sessions cannot be loaded.
    pub async fn update_featured_speaker(
        &self,
        event: &SessionCreated,
    ) -> Result<bool, DatabaseError> {
        let Some(speaker) = event.speaker.as_deref().filter(|s| !s.trim().is_empty()) else {
            return Ok(false);
        };

        let sessions =
            self.database.sessions_by_conference_and_speaker(&event.conference_key, speaker).await?;
        if sessions.len() <= 1 {
            return Ok(false);
        }

        let names: Vec<&str> = sessions.iter().map(|s| s.name.as_str()).collect();
        self.cache.set(
            FEATURED_SPEAKER_KEY,
            format!("Our featured speaker is {speaker} for the following sessions: {}", names.join(", ")),
        );
        debug!(speaker, sessions = names.len(), "Featured speaker updated");

        Ok(true)
    }

    /// Sends the organizer's confirmation mail.
    ///
    /// # Errors
    /// Propagates the mailer's [`MailError`].
    pub fn send_confirmation(&self, event: &ConferenceCreated) -> Result<(), MailError> {
        self.mailer.send(&Mail::conference_confirmation(event))
    }
}
