use super::in_key_order;
use crate::records::ConferenceRecord;
use crate::{Database, DatabaseError, DatabaseErrorExt};

impl Database {
    pub async fn create_conference(&self, record: &ConferenceRecord) -> Result<(), DatabaseError> {
        self.query("CREATE conference CONTENT $record RETURN NONE")
            .bind(("record", record.clone()))
            .await
            .context("Creating conference")?
            .check()
            .map_err(surrealdb::Error::from)?;
        Ok(())
    }

    pub async fn conference(&self, key: &str) -> Result<Option<ConferenceRecord>, DatabaseError> {
        let mut rows = self
            .query("SELECT * OMIT id FROM conference WHERE key = $key LIMIT 1")
            .bind(("key", key.to_owned()))
            .await
            .context("Loading conference")?;

        Ok(rows.take::<Vec<ConferenceRecord>>(0)?.into_iter().next())
    }

    /// Replaces the stored conference that has the same key.
    pub async fn save_conference(&self, record: &ConferenceRecord) -> Result<(), DatabaseError> {
        self.query("UPDATE conference CONTENT $record WHERE key = $key RETURN NONE")
            .bind(("record", record.clone()))
            .bind(("key", record.key.clone()))
            .await
            .context("Saving conference")?
            .check()
            .map_err(surrealdb::Error::from)?;
        Ok(())
    }

    pub async fn conferences_by_organizer(
        &self,
        user_id: &str,
    ) -> Result<Vec<ConferenceRecord>, DatabaseError> {
        let mut rows = self
            .query("SELECT * OMIT id FROM conference WHERE organizer_user_id = $user_id ORDER BY name")
            .bind(("user_id", user_id.to_owned()))
            .await
            .context("Loading conferences by organizer")?;

        Ok(rows.take(0)?)
    }

    /// Loads conferences in the order of `keys`; unknown keys are skipped.
    pub async fn conferences_by_keys(
        &self,
        keys: &[String],
    ) -> Result<Vec<ConferenceRecord>, DatabaseError> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut rows = self
            .query("SELECT * OMIT id FROM conference WHERE key IN $keys")
            .bind(("keys", keys.to_vec()))
            .await
            .context("Loading conferences by key")?;

        let records: Vec<ConferenceRecord> = rows.take(0)?;
        Ok(in_key_order(keys, records, |r| r.key.as_str()))
    }

    /// Every conference, ordered by name.
    pub async fn all_conferences(&self) -> Result<Vec<ConferenceRecord>, DatabaseError> {
        let mut rows = self
            .query("SELECT * OMIT id FROM conference ORDER BY name")
            .await
            .context("Loading conferences")?;

        Ok(rows.take(0)?)
    }

    /// Conferences with `min_exclusive < seats_available <= max_inclusive`, ordered by name.
    pub async fn conferences_with_seats_between(
        &self,
        min_exclusive: i64,
        max_inclusive: i64,
    ) -> Result<Vec<ConferenceRecord>, DatabaseError> {
        let mut rows = self
            .query(
                "SELECT * OMIT id FROM conference \
                 WHERE seats_available > $min AND seats_available <= $max ORDER BY name",
            )
            .bind(("min", min_exclusive))
            .bind(("max", max_inclusive))
            .await
            .context("Loading conferences by seats")?;

        Ok(rows.take(0)?)
    }
}
