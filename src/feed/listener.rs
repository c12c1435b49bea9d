//! Change feed subscription over Postgres LISTEN/NOTIFY
//!
//! Insert triggers on the update tables (installed by the migrations)
//! publish each new row as JSON on a per-table channel. Within one channel
//! rows arrive in commit order; nothing is guaranteed across channels.

use futures::Stream;
use sqlx::postgres::{PgListener, PgNotification};
use tracing::{error, info, warn};

use crate::feed::aggregator::FeedItem;
use crate::models::{EventUpdate, FestivalUpdate};
use crate::store::DatabasePool;
use crate::utils::errors::Result;

/// Channel carrying festival_updates inserts
pub const FESTIVAL_CHANNEL: &str = "festival_updates";
/// Channel carrying event_updates inserts
pub const EVENT_CHANNEL: &str = "event_updates";

/// Live subscription to the update tables
pub struct PgChangeFeed {
    listener: PgListener,
}

impl PgChangeFeed {
    /// Subscribe to both update channels on the given pool
    pub async fn connect(pool: &DatabasePool) -> Result<Self> {
        let mut listener = PgListener::connect_with(pool).await?;
        listener.listen_all([FESTIVAL_CHANNEL, EVENT_CHANNEL]).await?;
        info!(
            channels = ?[FESTIVAL_CHANNEL, EVENT_CHANNEL],
            "Change feed subscribed"
        );
        Ok(Self { listener })
    }

    /// Turn the subscription into a stream of feed items
    ///
    /// Malformed payloads are dropped with a warning; a lost connection
    /// ends the stream.
    pub fn into_stream(mut self) -> impl Stream<Item = FeedItem> {
        async_stream::stream! {
            loop {
                match self.listener.recv().await {
                    Ok(notification) => match decode(&notification) {
                        Ok(Some(item)) => yield item,
                        Ok(None) => {
                            warn!(channel = notification.channel(), "Ignoring unexpected channel");
                        }
                        Err(e) => {
                            warn!(
                                channel = notification.channel(),
                                error = %e,
                                "Dropping malformed change feed payload"
                            );
                        }
                    },
                    Err(e) => {
                        error!(error = %e, "Change feed connection lost");
                        break;
                    }
                }
            }
        }
    }
}

fn decode(notification: &PgNotification) -> serde_json::Result<Option<FeedItem>> {
    match notification.channel() {
        FESTIVAL_CHANNEL => {
            let update: FestivalUpdate = serde_json::from_str(notification.payload())?;
            Ok(Some(update.into()))
        }
        EVENT_CHANNEL => {
            let update: EventUpdate = serde_json::from_str(notification.payload())?;
            Ok(Some(update.into()))
        }
        _ => Ok(None),
    }
}
