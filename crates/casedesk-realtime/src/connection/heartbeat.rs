//! Heartbeat sweep for connection liveness.

use std::sync::Arc;

use chrono::Utc;
use tokio::time;
use tracing::{debug, warn};

use crate::message::types::ControlMessage;

use super::pool::ConnectionPool;

/// Run the heartbeat sweep until the pool is dropped by the owner.
///
/// Each tick pings every live connection; a connection whose previous ping
/// is still unanswered has missed a full interval and is terminated. This
/// bounds resource usage from half-open sockets — it is not a delivery
/// guarantee.
pub async fn run_heartbeat(pool: Arc<ConnectionPool>, interval: std::time::Duration) {
    let mut ticker = time::interval(interval);
    // the first tick completes immediately; skip it so connections get a
    // full interval before their first ping
    ticker.tick().await;

    loop {
        ticker.tick().await;
        sweep(&pool);
    }
}

/// One heartbeat pass over the pool.
pub(crate) fn sweep(pool: &ConnectionPool) {
    for conn in pool.all() {
        if !conn.is_alive() {
            pool.remove(&conn.id);
            continue;
        }

        if conn.begin_ping() {
            warn!(conn_id = %conn.id, "Terminating unresponsive connection");
            conn.mark_dead();
            pool.remove(&conn.id);
            continue;
        }

        let ping = ControlMessage::Ping {
            timestamp: Utc::now().timestamp_millis(),
        };
        if !conn.send(ping.to_frame()) {
            debug!(conn_id = %conn.id, "Ping send failed, dropping connection");
            conn.mark_dead();
            pool.remove(&conn.id);
        }
    }
}
