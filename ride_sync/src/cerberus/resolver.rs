use ride_sync_lib::scooter::{DisplayId, TripLog};
use serde_json::Value;

use crate::{config::SortOrder, SyncError};

use super::{constants::*, CerberusClient};

/// Resolves the opaque scooter id to the display id used by the rides endpoint.
pub struct IdentityResolver {
    client: CerberusClient,
    // Only the first trip log is read, the endpoint takes no limit.
    limit: u32,
    sort: SortOrder,
}

impl IdentityResolver {
    pub fn new(client: CerberusClient, limit: u32, sort: SortOrder) -> Self {
        Self { client, limit, sort }
    }

    pub async fn resolve(&self, scooter_id: &str) -> Result<DisplayId, SyncError> {
        let query = format!("{SCOOTER}={scooter_id}&{SORT}={TRIPLOG_SORT_FIELD}%20{}", self.sort);
        let url = self.client.endpoint(TRIPLOGS_PATH, &query);

        tracing::debug!(limit = self.limit, "Fetching trip logs for scooter {scooter_id}");
        let logs: Vec<Value> = self.client.get_json(url, "trip log endpoint").await?;

        let Some(first) = logs.into_iter().next() else {
            return Err(SyncError::EmptyTripLog(scooter_id.to_string()));
        };

        let log: TripLog = serde_json::from_value(first)
            .map_err(|err| SyncError::Schema(format!("first trip log has no scooter display id: {err}")))?;

        let display_id = log
            .display_id()
            .ok_or_else(|| SyncError::Schema(format!("display id {:?} is too short", log.scooter.display_id)))?;

        tracing::info!("Successfully retrieved scooter display id: {display_id}");
        Ok(display_id)
    }
}
