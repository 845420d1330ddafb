//! Tracks whether the backing store is reachable.
//!
//! The readiness gate reads the published state on every request, so the
//! store is pinged by a background heartbeat instead of per request.

use crate::services::store::LaureateStore;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionState {
    Connecting = 0,
    Connected = 1,
    Disconnected = 2,
}

impl ConnectionState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => ConnectionState::Connected,
            2 => ConnectionState::Disconnected,
            _ => ConnectionState::Connecting,
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Connecting => write!(f, "connecting"),
            ConnectionState::Connected => write!(f, "connected"),
            ConnectionState::Disconnected => write!(f, "disconnected"),
        }
    }
}

/// Shared handle to the last observed connection state. Clones observe the
/// same state.
#[derive(Clone)]
pub struct ConnectionMonitor {
    state: Arc<AtomicU8>,
    ping_timeout: Duration,
}

impl ConnectionMonitor {
    pub fn new(ping_timeout: Duration) -> Self {
        Self {
            state: Arc::new(AtomicU8::new(ConnectionState::Connecting as u8)),
            ping_timeout,
        }
    }

    pub fn state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    fn publish(&self, next: ConnectionState) {
        let previous = ConnectionState::from_u8(self.state.swap(next as u8, Ordering::AcqRel));
        if previous != next {
            match next {
                ConnectionState::Connected => {
                    tracing::info!(from = %previous, "Database connection established")
                }
                _ => tracing::warn!(from = %previous, to = %next, "Database connection lost"),
            }
        }
    }

    /// Ping the store once and publish the outcome.
    pub async fn refresh(&self, store: &dyn LaureateStore) -> ConnectionState {
        let next = match tokio::time::timeout(self.ping_timeout, store.health_check()).await {
            Ok(Ok(())) => ConnectionState::Connected,
            Ok(Err(e)) => {
                tracing::debug!(error = %e, "Database ping failed");
                ConnectionState::Disconnected
            }
            Err(_) => {
                tracing::debug!(
                    timeout_ms = self.ping_timeout.as_millis() as u64,
                    "Database ping timed out"
                );
                ConnectionState::Disconnected
            }
        };
        self.publish(next);
        next
    }

    /// Refresh immediately, then every `interval`, until the task is aborted.
    pub fn spawn(&self, store: Arc<dyn LaureateStore>, interval: Duration) -> JoinHandle<()> {
        let monitor = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                monitor.refresh(store.as_ref()).await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::InMemoryLaureateStore;

    #[tokio::test]
    async fn starts_connecting_and_follows_the_store() {
        let store = InMemoryLaureateStore::new();
        let monitor = ConnectionMonitor::new(Duration::from_millis(100));
        assert_eq!(monitor.state(), ConnectionState::Connecting);
        assert!(!monitor.is_connected());

        assert_eq!(monitor.refresh(&store).await, ConnectionState::Connected);
        assert!(monitor.is_connected());

        store.set_available(false);
        assert_eq!(monitor.refresh(&store).await, ConnectionState::Disconnected);
        assert!(!monitor.clone().is_connected());
    }

    #[tokio::test]
    async fn spawned_heartbeat_publishes_state() {
        let store: Arc<InMemoryLaureateStore> = Arc::new(InMemoryLaureateStore::new());
        let monitor = ConnectionMonitor::new(Duration::from_millis(100));
        let handle = monitor.spawn(store.clone(), Duration::from_millis(10));

        for _ in 0..50 {
            if monitor.is_connected() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(monitor.is_connected());

        store.set_available(false);
        for _ in 0..50 {
            if monitor.state() == ConnectionState::Disconnected {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(monitor.state(), ConnectionState::Disconnected);

        handle.abort();
    }
}
