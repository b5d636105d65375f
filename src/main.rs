use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use property_scout::config::Cli;
use property_scout::models::SearchSnapshot;
use property_scout::notify::NotificationBus;
use property_scout::remote::{FixtureBackend, HttpBackend, SaveService, SearchService};
use property_scout::search::{
    render_table, OperationController, SaveOutcome, SearchOutcome, Skipped, StrictBuilder,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!("🏠 Property Scout");

    let (searcher, saver): (Arc<dyn SearchService>, Arc<dyn SaveService>) = if cli.offline {
        info!("Using offline fixture listings");
        let backend = Arc::new(FixtureBackend::new());
        (backend.clone() as Arc<dyn SearchService>, backend as Arc<dyn SaveService>)
    } else {
        info!("Using backend at {}", cli.endpoint);
        let backend = Arc::new(HttpBackend::new(cli.backend_config())?);
        (backend.clone() as Arc<dyn SearchService>, backend as Arc<dyn SaveService>)
    };

    let notifier = Arc::new(NotificationBus::default());
    let mut controller = OperationController::new(searcher, saver, notifier);
    if cli.strict {
        controller = controller.with_builder(StrictBuilder);
    }
    controller.update_filters(|filters| cli.apply_filters(filters));

    match controller.search().await {
        SearchOutcome::Found(count) => info!("Found {} properties", count),
        SearchOutcome::Skipped(Skipped::NotReady) => {
            anyhow::bail!("Enter a city and state, or a zip code, to search");
        }
        SearchOutcome::Skipped(Skipped::Busy) => anyhow::bail!("A search is already running"),
        // Already reported through the notification bus.
        SearchOutcome::Failed(err) => return Err(err.into()),
    }

    let rows = controller.rows();
    if controller.show_empty_state() {
        println!("No properties matched.");
    } else {
        println!("{}", render_table(&rows));
    }

    if let Some(path) = &cli.output {
        let snapshot = SearchSnapshot {
            request: controller.build_request()?,
            rows,
            searched_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("💾 Saved search snapshot to {}", path.display());
    }

    if cli.save {
        match controller.save().await {
            SaveOutcome::Saved(result) => info!("Saved as search {}", result.search_id),
            SaveOutcome::Skipped(_) => warn!("Nothing to save"),
            SaveOutcome::Failed(err) => return Err(err.into()),
        }
    }

    Ok(())
}
