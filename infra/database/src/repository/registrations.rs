use crate::records::SeatChange;
use crate::{Database, DatabaseError, DatabaseErrorExt};
use tracing::debug;

// Both directions read the seat count and the profile list, then write both records inside
// one transaction. A failed write or a commit conflict rolls back the pair.
const REGISTER: &str = "
    BEGIN TRANSACTION;
    LET $attending = (SELECT VALUE conference_keys_to_attend FROM profile WHERE user_id = $user_id)[0];
    LET $seats = (SELECT VALUE seats_available FROM conference WHERE key = $key)[0];
    LET $outcome = IF $seats = NONE { 'missing_conference' }
        ELSE IF $attending = NONE { 'missing_profile' }
        ELSE IF $key IN $attending { 'already_registered' }
        ELSE IF $seats <= 0 { 'sold_out' }
        ELSE { 'registered' };
    IF $outcome = 'registered' {
        UPDATE conference SET seats_available -= 1 WHERE key = $key RETURN NONE;
        UPDATE profile SET conference_keys_to_attend = array::union(conference_keys_to_attend, [$key])
            WHERE user_id = $user_id RETURN NONE;
    };
    RETURN $outcome;
    COMMIT TRANSACTION;";

const UNREGISTER: &str = "
    BEGIN TRANSACTION;
    LET $attending = (SELECT VALUE conference_keys_to_attend FROM profile WHERE user_id = $user_id)[0];
    LET $seats = (SELECT VALUE seats_available FROM conference WHERE key = $key)[0];
    LET $outcome = IF $seats = NONE { 'missing_conference' }
        ELSE IF $attending = NONE { 'missing_profile' }
        ELSE IF $key IN $attending { 'unregistered' }
        ELSE { 'not_registered' };
    IF $outcome = 'unregistered' {
        UPDATE conference SET seats_available += 1 WHERE key = $key RETURN NONE;
        UPDATE profile SET conference_keys_to_attend -= $key WHERE user_id = $user_id RETURN NONE;
    };
    RETURN $outcome;
    COMMIT TRANSACTION;";

impl Database {
    /// Takes a seat of `key` and adds it to the attendee's list in one transaction.
    pub async fn register_attendee(
        &self,
        user_id: &str,
        key: &str,
    ) -> Result<SeatChange, DatabaseError> {
        self.seat_change(REGISTER, user_id, key).await.context("Registering attendee")
    }

    /// Gives the seat back and removes `key` from the attendee's list in one transaction.
    pub async fn unregister_attendee(
        &self,
        user_id: &str,
        key: &str,
    ) -> Result<SeatChange, DatabaseError> {
        self.seat_change(UNREGISTER, user_id, key).await.context("Unregistering attendee")
    }

    async fn seat_change(
        &self,
        script: &'static str,
        user_id: &str,
        key: &str,
    ) -> Result<SeatChange, DatabaseError> {
        let mut response = self
            .query(script)
            .bind(("user_id", user_id.to_owned()))
            .bind(("key", key.to_owned()))
            .await?
            .check()
            .map_err(surrealdb::Error::from)?;

        let last = response.num_statements().saturating_sub(1);
        let outcome: Option<String> = response.take(last)?;
        let change = outcome.as_deref().and_then(SeatChange::parse).ok_or_else(|| {
            DatabaseError::Internal {
                message: format!("Unexpected seat change outcome {outcome:?}").into(),
                context: None,
            }
        })?;

        debug!(user_id, key, ?change, "Seat change");
        Ok(change)
    }
}
