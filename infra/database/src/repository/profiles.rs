use crate::records::ProfileRecord;
use crate::{Database, DatabaseError, DatabaseErrorExt};
use tracing::debug;

impl Database {
    /// Loads the profile of `user_id`.
    pub async fn profile(&self, user_id: &str) -> Result<Option<ProfileRecord>, DatabaseError> {
        let mut rows = self
            .query("SELECT * OMIT id FROM profile WHERE user_id = $user_id LIMIT 1")
            .bind(("user_id", user_id.to_owned()))
            .await
            .context("Loading profile")?;

        Ok(rows.take::<Vec<ProfileRecord>>(0)?.into_iter().next())
    }

    /// Returns the profile of `user_id`, creating a fresh one on first access.
    pub async fn ensure_profile(
        &self,
        user_id: &str,
        display_name: &str,
        email: &str,
    ) -> Result<ProfileRecord, DatabaseError> {
        if let Some(existing) = self.profile(user_id).await? {
            return Ok(existing);
        }

        let record = ProfileRecord::new(user_id, display_name, email);
        let created = self
            .query("CREATE profile CONTENT $record RETURN NONE")
            .bind(("record", record.clone()))
            .await
            .and_then(|response| response.check().map_err(surrealdb::Error::from));

        match created {
            Ok(_) => {
                debug!(user_id, "Profile created");
                Ok(record)
            },
            // A concurrent first request won the unique index.
            Err(err) => self.profile(user_id).await?.ok_or(DatabaseError::Surreal {
                source: err,
                context: Some("Creating profile".into()),
            }),
        }
    }

    /// Updates the editable profile fields; key lists are left untouched.
    pub async fn save_profile_details(
        &self,
        user_id: &str,
        display_name: &str,
        tee_shirt_size: &str,
    ) -> Result<(), DatabaseError> {
        self.query(
            "UPDATE profile SET display_name = $display_name, tee_shirt_size = $tee_shirt_size \
             WHERE user_id = $user_id RETURN NONE",
        )
        .bind(("user_id", user_id.to_owned()))
        .bind(("display_name", display_name.to_owned()))
        .bind(("tee_shirt_size", tee_shirt_size.to_owned()))
        .await
        .context("Saving profile")?
        .check()
        .map_err(surrealdb::Error::from)?;
        Ok(())
    }

    /// Appends a session to the wishlist unless it is already there.
    pub async fn add_wishlist_session(&self, user_id: &str, key: &str) -> Result<(), DatabaseError> {
        self.query(
            "UPDATE profile SET session_keys_wishlist = array::union(session_keys_wishlist, [$key]) \
             WHERE user_id = $user_id RETURN NONE",
        )
        .bind(("user_id", user_id.to_owned()))
        .bind(("key", key.to_owned()))
        .await
        .context("Adding wishlist session")?
        .check()
        .map_err(surrealdb::Error::from)?;
        Ok(())
    }

    pub async fn remove_wishlist_session(&self, user_id: &str, key: &str) -> Result<(), DatabaseError> {
        self.query("UPDATE profile SET session_keys_wishlist -= $key WHERE user_id = $user_id RETURN NONE")
            .bind(("user_id", user_id.to_owned()))
            .bind(("key", key.to_owned()))
            .await
            .context("Removing wishlist session")?
            .check()
            .map_err(surrealdb::Error::from)?;
        Ok(())
    }
}
