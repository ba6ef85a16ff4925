use std::sync::atomic::{AtomicU64, Ordering};

use crate::ops::BroadcastOutcome;

#[derive(Debug, Default)]
pub struct Metrics {
    broadcasts: AtomicU64,
    deliveries: AtomicU64,
    dropped_connections: AtomicU64,
    subscriptions: AtomicU64,
}

impl Metrics {
    pub fn record_broadcast(&self, outcome: BroadcastOutcome) {
        self.broadcasts.fetch_add(1, Ordering::Relaxed);
        self.deliveries
            .fetch_add(outcome.delivered as u64, Ordering::Relaxed);
        self.dropped_connections
            .fetch_add(outcome.dropped as u64, Ordering::Relaxed);
    }

    pub fn record_subscription(&self) {
        self.subscriptions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped_connection(&self) {
        self.dropped_connections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self, live_connections: usize, pages: usize) -> String {
        let broadcasts = self.broadcasts.load(Ordering::Relaxed);
        let deliveries = self.deliveries.load(Ordering::Relaxed);
        let dropped = self.dropped_connections.load(Ordering::Relaxed);
        let subscriptions = self.subscriptions.load(Ordering::Relaxed);

        format!(
            "# TYPE chatcast_broadcasts_total counter\n\
chatcast_broadcasts_total {}\n\
# TYPE chatcast_deliveries_total counter\n\
chatcast_deliveries_total {}\n\
# TYPE chatcast_dropped_connections_total counter\n\
chatcast_dropped_connections_total {}\n\
# TYPE chatcast_subscriptions_total counter\n\
chatcast_subscriptions_total {}\n\
# TYPE chatcast_live_connections gauge\n\
chatcast_live_connections {}\n\
# TYPE chatcast_pages gauge\n\
chatcast_pages {}\n",
            broadcasts, deliveries, dropped, subscriptions, live_connections, pages
        )
    }
}
