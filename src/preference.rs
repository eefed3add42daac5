use uuid::Uuid;

use crate::models::{Preference, PreferenceRecord, Resolved};
use crate::store::{StoreError, TreatmentStore};

/// Newest preference for the user, or the defaults when there is none or
/// the store could not be read.
pub async fn resolve(store: &dyn TreatmentStore, user_id: Uuid) -> Resolved<Preference> {
    from_lookup(user_id, store.latest_preference(user_id).await)
}

pub fn from_lookup(
    user_id: Uuid,
    lookup: Result<Option<PreferenceRecord>, StoreError>,
) -> Resolved<Preference> {
    match lookup {
        Ok(Some(record)) => {
            let preference = Preference::from(&record);
            if preference.skin_tone.is_none() {
                tracing::warn!(%user_id, skin_tone = %record.skin_tone, "unrecognised skin tone code");
            }
            if preference.hair_color.is_none() {
                tracing::warn!(%user_id, hair_color = %record.hair_color, "unrecognised hair color code");
            }
            tracing::debug!(%user_id, created_at = %record.created_at, "resolved stored preference");
            Resolved::Fresh(preference)
        }
        Ok(None) => {
            tracing::debug!(%user_id, "no stored preference, using defaults");
            Resolved::Fallback(Preference::default())
        }
        Err(err) => {
            tracing::warn!(%user_id, error = %err, "failed to read preference, using defaults");
            Resolved::Fallback(Preference::default())
        }
    }
}
