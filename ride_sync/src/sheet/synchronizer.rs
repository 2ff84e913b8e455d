use ride_sync_lib::{
    payload::RidePush,
    ride::{RideId, RideRecord},
};

use crate::SyncError;

use super::SheetWebhook;

/// Above this many new rides, only the most recent ones raise an alert.
pub const ALERT_THRESHOLD: usize = 10;
/// How many of the most recent rides alert when over the threshold.
pub const ALERT_TAIL: usize = 5;

/// Whether the ride at `index` of `count` new rides (sorted by ride id) should
/// ask the webhook for a chat alert.
pub fn alert_flag(index: usize, count: usize) -> bool {
    if count > ALERT_THRESHOLD {
        index >= count - ALERT_TAIL
    } else {
        true
    }
}

/// What a synchronization did with the rides it was given.
#[derive(Debug, Default)]
pub struct SheetSummary {
    pub new_rides: usize,
    pub pushed: Vec<RideId>,
    pub skipped: Vec<(RideId, SyncError)>,
}

pub struct SheetSynchronizer {
    webhook: SheetWebhook,
}

impl SheetSynchronizer {
    pub fn new(webhook: SheetWebhook) -> Self {
        Self { webhook }
    }

    /// Pushes the rides the sheet does not know yet, oldest id first.
    ///
    /// An error means the known ids could not be read and nothing was pushed.
    /// A failed push is recorded in the summary and the remaining rides are
    /// still sent.
    pub async fn sync(&self, rides: Option<Vec<RideRecord>>) -> Result<SheetSummary, SyncError> {
        let rides = match rides {
            Some(rides) if !rides.is_empty() => rides,
            _ => {
                tracing::info!("No ride data to process");
                return Ok(SheetSummary::default());
            }
        };

        let known_ids = self.webhook.fetch_known_ids().await?;
        tracing::debug!("Sheet already holds {} rides", known_ids.len());

        let new_rides = known_ids.unseen(rides);
        tracing::info!("Found {} new rides to process", new_rides.len());

        if new_rides.is_empty() {
            tracing::info!("No new ride data to send");
            return Ok(SheetSummary::default());
        }

        let count = new_rides.len();
        let mut summary = SheetSummary {
            new_rides: count,
            ..Default::default()
        };

        for (index, ride) in new_rides.iter().enumerate() {
            let ride_id = ride.ride_id().clone();
            match self.push(ride, alert_flag(index, count)).await {
                Ok(response) => {
                    tracing::info!("Response from sheet webhook for ride {ride_id}: {response}");
                    summary.pushed.push(ride_id);
                }
                Err(err) => {
                    tracing::error!("Push failed for ride {ride_id}: {err}");
                    summary.skipped.push((ride_id, err));
                }
            }
        }

        Ok(summary)
    }

    async fn push(&self, ride: &RideRecord, alert: bool) -> Result<String, SyncError> {
        let push = RidePush::new(ride, alert).map_err(|err| SyncError::Encode(err.to_string()))?;
        self.webhook.push(&push).await
    }
}
