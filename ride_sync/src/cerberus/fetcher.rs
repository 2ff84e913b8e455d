use ride_sync_lib::{ride::RideRecord, scooter::DisplayId};
use serde::Deserialize;

use crate::{config::SortOrder, SyncError};

use super::{constants::*, CerberusClient};

/// `{"data": {"trips": [...]}}`
#[derive(Deserialize)]
struct RidesResponse {
    data: RidesData,
}

#[derive(Deserialize)]
struct RidesData {
    trips: Vec<RideRecord>,
}

pub struct RideFetcher {
    client: CerberusClient,
    limit: u32,
    sort: SortOrder,
}

impl RideFetcher {
    pub fn new(client: CerberusClient, limit: u32, sort: SortOrder) -> Self {
        Self { client, limit, sort }
    }

    /// Fetches the latest rides of the scooter. Makes no call without a display id.
    pub async fn fetch(&self, display_id: Option<&DisplayId>) -> Result<Vec<RideRecord>, SyncError> {
        let Some(display_id) = display_id else {
            tracing::warn!("Cannot fetch ride details, scooter display id is missing");
            return Err(SyncError::MissingDisplayId);
        };

        let query = format!(
            "{SCOOTER_ID}={display_id}&{LIMIT}={}&{SORT}={RIDE_SORT_FIELD}%20{}",
            self.limit, self.sort
        );
        let url = self.client.endpoint(RIDES_PATH, &query);

        let response: RidesResponse = self.client.get_json(url, "rides endpoint").await.map_err(|err| match err {
            SyncError::Schema(msg) => SyncError::Schema(format!("missing 'data'/'trips' or a trip without 'ride_id': {msg}")),
            other => other,
        })?;

        tracing::info!("Fetched {} rides for scooter {display_id}", response.data.trips.len());
        Ok(response.data.trips)
    }
}

#[tokio::test]
async fn test_missing_display_id_makes_no_call() {
    // Nothing listens here, a request would fail with a transport error.
    let client = CerberusClient::new(reqwest::Client::new(), "http://127.0.0.1:9", "token".into()).unwrap();
    let fetcher = RideFetcher::new(client, 20, SortOrder::Desc);

    assert!(matches!(fetcher.fetch(None).await, Err(SyncError::MissingDisplayId)));
}
