use super::in_key_order;
use crate::records::SessionRecord;
use crate::{Database, DatabaseError, DatabaseErrorExt};

const SELECT_SESSIONS: &str = "SELECT * OMIT id FROM conference_session";

impl Database {
    pub async fn create_session(&self, record: &SessionRecord) -> Result<(), DatabaseError> {
        self.query("CREATE conference_session CONTENT $record RETURN NONE")
            .bind(("record", record.clone()))
            .await
            .context("Creating session")?
            .check()
            .map_err(surrealdb::Error::from)?;
        Ok(())
    }

    pub async fn session(&self, key: &str) -> Result<Option<SessionRecord>, DatabaseError> {
        let mut rows = self
            .query(format!("{SELECT_SESSIONS} WHERE key = $key LIMIT 1"))
            .bind(("key", key.to_owned()))
            .await
            .context("Loading session")?;

        Ok(rows.take::<Vec<SessionRecord>>(0)?.into_iter().next())
    }

    /// Loads sessions in the order of `keys`; unknown keys are skipped.
    pub async fn sessions_by_keys(
        &self,
        keys: &[String],
    ) -> Result<Vec<SessionRecord>, DatabaseError> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut rows = self
            .query(format!("{SELECT_SESSIONS} WHERE key IN $keys"))
            .bind(("keys", keys.to_vec()))
            .await
            .context("Loading sessions by key")?;

        let records: Vec<SessionRecord> = rows.take(0)?;
        Ok(in_key_order(keys, records, |r| r.key.as_str()))
    }

    pub async fn sessions_by_conference(
        &self,
        conference_key: &str,
    ) -> Result<Vec<SessionRecord>, DatabaseError> {
        let mut rows = self
            .query(format!(
                "{SELECT_SESSIONS} WHERE conference_key = $conference_key \
                 ORDER BY start_date, start_time, name"
            ))
            .bind(("conference_key", conference_key.to_owned()))
            .await
            .context("Loading sessions of conference")?;

        Ok(rows.take(0)?)
    }

    pub async fn sessions_by_conference_and_type(
        &self,
        conference_key: &str,
        session_type: &str,
    ) -> Result<Vec<SessionRecord>, DatabaseError> {
        let mut rows = self
            .query(format!(
                "{SELECT_SESSIONS} WHERE conference_key = $conference_key \
                 AND session_type = $session_type ORDER BY start_date, start_time, name"
            ))
            .bind(("conference_key", conference_key.to_owned()))
            .bind(("session_type", session_type.to_owned()))
            .await
            .context("Loading sessions of conference by type")?;

        Ok(rows.take(0)?)
    }

    pub async fn sessions_by_conference_and_speaker(
        &self,
        conference_key: &str,
        speaker: &str,
    ) -> Result<Vec<SessionRecord>, DatabaseError> {
        let mut rows = self
            .query(format!(
                "{SELECT_SESSIONS} WHERE conference_key = $conference_key \
                 AND speaker = $speaker ORDER BY name"
            ))
            .bind(("conference_key", conference_key.to_owned()))
            .bind(("speaker", speaker.to_owned()))
            .await
            .context("Loading sessions of conference by speaker")?;

        Ok(rows.take(0)?)
    }

    pub async fn sessions_by_speaker(
        &self,
        speaker: &str,
    ) -> Result<Vec<SessionRecord>, DatabaseError> {
        let mut rows = self
            .query(format!("{SELECT_SESSIONS} WHERE speaker = $speaker ORDER BY name"))
            .bind(("speaker", speaker.to_owned()))
            .await
            .context("Loading sessions by speaker")?;

        Ok(rows.take(0)?)
    }

    pub async fn sessions_by_speaker_and_type(
        &self,
        speaker: &str,
        session_type: &str,
    ) -> Result<Vec<SessionRecord>, DatabaseError> {
        let mut rows = self
            .query(format!(
                "{SELECT_SESSIONS} WHERE speaker = $speaker AND session_type = $session_type \
                 ORDER BY name"
            ))
            .bind(("speaker", speaker.to_owned()))
            .bind(("session_type", session_type.to_owned()))
            .await
            .context("Loading sessions by speaker and type")?;

        Ok(rows.take(0)?)
    }

    /// Sessions whose `start_time` is known and not earlier than `time` (`HH:MM`).
    pub async fn sessions_starting_at_or_after(
        &self,
        time: &str,
    ) -> Result<Vec<SessionRecord>, DatabaseError> {
        let mut rows = self
            .query(format!(
                "{SELECT_SESSIONS} WHERE start_time != NONE AND start_time != NULL \
                 AND start_time >= $time ORDER BY start_time, name"
            ))
            .bind(("time", time.to_owned()))
            .await
            .context("Loading sessions starting after")?;

        Ok(rows.take(0)?)
    }

    /// Sessions whose `start_time` is known and earlier than `time` (`HH:MM`).
    pub async fn sessions_starting_before(
        &self,
        time: &str,
    ) -> Result<Vec<SessionRecord>, DatabaseError> {
        let mut rows = self
            .query(format!(
                "{SELECT_SESSIONS} WHERE start_time != NONE AND start_time != NULL \
                 AND start_time < $time ORDER BY start_time, name"
            ))
            .bind(("time", time.to_owned()))
            .await
            .context("Loading sessions starting before")?;

        Ok(rows.take(0)?)
    }

    pub async fn all_sessions(&self) -> Result<Vec<SessionRecord>, DatabaseError> {
        let mut rows = self
            .query(format!("{SELECT_SESSIONS} ORDER BY start_time, name"))
            .await
            .context("Loading sessions")?;

        Ok(rows.take(0)?)
    }
}
