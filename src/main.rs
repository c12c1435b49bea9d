//! FestHub worker daemon
//!
//! Main application entry point. Runs the live notification pump (change
//! feed inserts -> in-memory feed -> toast log lines) and the periodic
//! star-count read-repair pass.

use futures::StreamExt;
use tokio::time::{interval, Duration};
use tracing::{error, info, warn};

use festhub::{
    config::Settings,
    feed::PgChangeFeed,
    services::ServiceFactory,
    store,
    utils::{helpers::truncate_text, logging},
    Datastore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard must outlive the runtime
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", festhub::info());

    // Initialize database connection
    info!("Connecting to database...");
    let pool = store::create_pool(&settings.database).await?;

    // Run database migrations
    store::run_migrations(&pool).await?;

    // Initialize services
    info!("Initializing services...");
    let datastore = Datastore::postgres(pool.clone());
    let services = ServiceFactory::new(datastore, &settings)?;

    // Assemble the initial notification feed, then keep it live
    let mut feed = services.update_service.load_feed().await;
    info!(
        items = feed.len(),
        unread = feed.unread_count(),
        "Notification feed loaded"
    );

    let change_feed = PgChangeFeed::connect(&pool).await?;
    let mut live = Box::pin(change_feed.into_stream());

    let mut reconcile_timer = interval(Duration::from_secs(settings.feed.reconcile_interval_secs));

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
            _ = reconcile_timer.tick() => {
                if let Err(e) = services.star_service.reconcile().await {
                    error!(error = %e, "Star count reconciliation failed");
                }
            }
            item = live.next() => {
                match item {
                    Some(item) => {
                        let source = item.source;
                        // push() moves the badge and hands back the toast in
                        // one call, so the two cannot drift apart.
                        if let Some(toast) = feed.push(item) {
                            let preview = truncate_text(&toast.message, 100);
                            info!(
                                source = ?source,
                                message = %preview,
                                unread = feed.unread_count(),
                                "New update"
                            );
                        }
                    }
                    None => {
                        warn!("Change feed stream ended");
                        break;
                    }
                }
            }
        }
    }

    info!("festhub stopped");
    Ok(())
}
