use std::fmt;

use reqwest::Client;
use ride_sync_lib::ride::RideId;

use crate::{
    cerberus::{CerberusClient, IdentityResolver, RideFetcher},
    sheet::{SheetSummary, SheetSynchronizer, SheetWebhook},
    Config, SyncError, USER_AGENT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResolveDisplayId,
    FetchRides,
    FetchKnownIds,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::ResolveDisplayId => "resolve display id",
            Stage::FetchRides => "fetch rides",
            Stage::FetchKnownIds => "fetch known ride ids",
        })
    }
}

/// Outcome of one run. A halted stage stops the run, skipped rides do not.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub halted: Option<(Stage, SyncError)>,
    pub new_rides: usize,
    pub pushed: Vec<RideId>,
    pub skipped: Vec<(RideId, SyncError)>,
}

impl SyncReport {
    pub fn is_clean(&self) -> bool {
        self.halted.is_none() && self.skipped.is_empty()
    }

    pub fn halted_at(&self) -> Option<Stage> {
        self.halted.as_ref().map(|(stage, _)| *stage)
    }

    fn halt(&mut self, stage: Stage, err: SyncError) {
        tracing::error!("Stage '{stage}' failed: {err}");
        self.halted = Some((stage, err));
    }

    fn absorb(&mut self, summary: SheetSummary) {
        self.new_rides = summary.new_rides;
        self.pushed = summary.pushed;
        self.skipped = summary.skipped;
    }
}

/// One scooter, one sheet: resolve the display id, fetch the latest rides and
/// push the ones the sheet does not have yet.
pub struct RideSync {
    config: Config,
    resolver: IdentityResolver,
    fetcher: RideFetcher,
    synchronizer: SheetSynchronizer,
}

impl RideSync {
    pub fn new(config: Config) -> Result<Self, SyncError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| SyncError::Config(format!("failed to build http client: {err}")))?;

        let cerberus = CerberusClient::new(http.clone(), &config.api_base_url, config.api_token.clone())?;
        let webhook = SheetWebhook::new(http, &config.webhook_url)?;

        Ok(Self {
            resolver: IdentityResolver::new(cerberus.clone(), config.triplog_limit, config.sort),
            fetcher: RideFetcher::new(cerberus, config.ride_limit, config.sort),
            synchronizer: SheetSynchronizer::new(webhook),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the whole workflow once. Never fails: problems end up in the report.
    pub async fn run(&self) -> SyncReport {
        let mut report = SyncReport::default();

        let display_id = match self.resolver.resolve(&self.config.scooter_id).await {
            Ok(display_id) => display_id,
            Err(err) => {
                report.halt(Stage::ResolveDisplayId, err);
                tracing::error!("Workflow terminated: failed to retrieve necessary scooter id");
                return report;
            }
        };

        let rides = match self.fetcher.fetch(Some(&display_id)).await {
            Ok(rides) => Some(rides),
            Err(err) => {
                report.halt(Stage::FetchRides, err);
                None
            }
        };

        match self.synchronizer.sync(rides).await {
            Ok(summary) => report.absorb(summary),
            Err(err) => report.halt(Stage::FetchKnownIds, err),
        }

        tracing::info!(
            "Run finished: {} new, {} pushed, {} skipped",
            report.new_rides,
            report.pushed.len(),
            report.skipped.len()
        );
        report
    }
}

#[test]
fn test_invalid_urls_are_rejected() {
    let mut config = Config::new("scooter".into(), "token".into(), "not a url".into());
    assert!(matches!(RideSync::new(config.clone()), Err(SyncError::Config(_))));

    config.webhook_url = "https://sheet.example/exec".into();
    config.api_base_url = "::".into();
    assert!(matches!(RideSync::new(config.clone()), Err(SyncError::Config(_))));

    config.api_base_url = "https://cerberus.example/api/v1".into();
    assert!(RideSync::new(config).is_ok());
}
