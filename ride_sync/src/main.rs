use clap::Parser;
use ride_sync::{Config, RideSync, SortOrder, DEFAULT_API_BASE_URL};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ride_sync")]
#[command(about = "Forward new scooter rides to the spreadsheet webhook", long_about = None)]
struct Cli {
    /// Opaque scooter id used by the trip log endpoint
    #[arg(long, env = "scooter_id")]
    scooter_id: String,
    /// Bearer token for the telemetry API
    #[arg(long, env = "api_token", hide_env_values = true)]
    api_token: String,
    /// Spreadsheet webhook, read for known ids and written with new rides
    #[arg(long, env = "webhook_url")]
    webhook_url: String,
    #[arg(long, env = "api_base_url", default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,
    /// How many trip logs to ask for when resolving the display id
    #[arg(long, default_value_t = 1)]
    triplog_limit: u32,
    /// How many of the latest rides to compare against the sheet
    #[arg(long, default_value_t = 20)]
    ride_limit: u32,
    #[arg(long, value_enum, default_value_t = SortOrder::Desc)]
    sort: SortOrder,
    /// Exit with an error when a stage halted or a ride could not be pushed
    #[arg(long)]
    strict: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            scooter_id: cli.scooter_id,
            api_token: cli.api_token,
            webhook_url: cli.webhook_url,
            api_base_url: cli.api_base_url,
            triplog_limit: cli.triplog_limit,
            ride_limit: cli.ride_limit,
            sort: cli.sort,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Values from .env win over the inherited environment.
    let dotenv = dotenvy::dotenv_override();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info,ride_sync_lib=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match dotenv {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!("Failed to load .env file: {err}"),
    }

    let cli = Cli::parse();
    let strict = cli.strict;

    let ride_sync = RideSync::new(cli.into())?;
    tracing::debug!("Starting with {:?}", ride_sync.config());

    let report = ride_sync.run().await;

    if strict && !report.is_clean() {
        match &report.halted {
            Some((stage, err)) => anyhow::bail!("stage '{stage}' halted the run: {err}"),
            None => anyhow::bail!("{} of {} new rides could not be pushed", report.skipped.len(), report.new_rides),
        }
    }

    Ok(())
}
