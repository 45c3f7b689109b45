//! Watch command - follow live vehicle positions from the terminal.

use std::sync::Arc;

use clap::Args;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use transitwatch::geo::Viewport;
use transitwatch::service::HttpTransitService;
use transitwatch::store::IniSelectionStore;
use transitwatch::{ControllerConfig, ControllerEvent, ViewStateController};

use crate::error::CliError;
use crate::surface::LogSurface;

/// Arguments for the watch command.
#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Transit backend base URL
    #[arg(long, default_value = "http://localhost:5000")]
    pub server: String,

    /// Select a country before watching (replaces the stored one)
    #[arg(long)]
    pub country: Option<String>,

    /// Select a dataset before watching
    #[arg(long, requires = "country")]
    pub dataset: Option<String>,

    /// Filter to a route, repeatable
    #[arg(long = "route", requires = "dataset")]
    pub routes: Vec<String>,

    /// Refresh interval in seconds
    #[arg(long, default_value_t = 60)]
    pub interval: u32,

    /// Zoom level (stops are included from zoom 14 up)
    #[arg(long, default_value_t = 12)]
    pub zoom: u8,

    /// Northern viewport bound in degrees
    #[arg(long, default_value_t = 42.0)]
    pub north: f64,

    /// Southern viewport bound in degrees
    #[arg(long, default_value_t = 41.8)]
    pub south: f64,

    /// Eastern viewport bound in degrees
    #[arg(long, default_value_t = 12.6)]
    pub east: f64,

    /// Western viewport bound in degrees
    #[arg(long, default_value_t = 12.4)]
    pub west: f64,
}

/// Run the watch command.
pub fn run(args: WatchArgs) -> Result<(), CliError> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Runtime(format!("failed to start runtime: {}", e)))?;
    runtime.block_on(watch(args))
}

async fn watch(args: WatchArgs) -> Result<(), CliError> {
    let service = HttpTransitService::new(&args.server)?;
    let store_path = IniSelectionStore::default_path()
        .ok_or_else(|| CliError::Config("Could not determine the config directory".to_string()))?;
    let store = IniSelectionStore::open(store_path);

    let viewport = Viewport::new(args.north, args.south, args.east, args.west);
    let surface = LogSurface::new(viewport, args.zoom);

    let config = ControllerConfig {
        interval_seconds: args.interval,
        ..ControllerConfig::default()
    };

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    // Queued before the loop starts: processed in order, after the stored
    // selection has been restored.
    if let Some(country) = args.country {
        let _ = events_tx.send(ControllerEvent::SelectCountry(country));
        if let Some(dataset) = args.dataset {
            let _ = events_tx.send(ControllerEvent::SelectDataset(dataset));
            for route_id in args.routes {
                let _ = events_tx.send(ControllerEvent::ToggleRoute {
                    route_id,
                    selected: true,
                });
            }
        }
    }

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutting down");
            signal_token.cancel();
        }
    });

    info!(server = %args.server, interval = args.interval, "Watching");
    ViewStateController::new(surface, Arc::new(service), store, config)
        .run(events_rx, shutdown)
        .await;

    Ok(())
}
