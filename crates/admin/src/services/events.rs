//! The simulated real-time event feed.
//!
//! The original dashboard faked a live feed with timers; here a background
//! task emits a simulated store event every few seconds into a broadcast
//! channel and a bounded ring buffer. `GET /api/admin/events` reads the
//! buffer, the SSE endpoint streams the channel. The task runs for the
//! life of the server; shutdown is cooperative (the process exits).

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tokio::sync::{RwLock, broadcast};
use uuid::Uuid;

/// How often the simulator emits an event.
const EMIT_INTERVAL: Duration = Duration::from_secs(5);

/// How many past events the buffer keeps for `recent()`.
const BUFFER_CAPACITY: usize = 100;

/// Broadcast channel depth; slow SSE consumers may skip events.
const CHANNEL_CAPACITY: usize = 64;

/// Kinds of simulated store events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    OrderPlaced,
    LowStock,
    NewReview,
    NewCustomer,
}

impl EventKind {
    /// SSE event name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OrderPlaced => "order_placed",
            Self::LowStock => "low_stock",
            Self::NewReview => "new_review",
            Self::NewCustomer => "new_customer",
        }
    }
}

/// One dashboard notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreEvent {
    pub id: Uuid,
    pub kind: EventKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Shared event feed: ring buffer plus broadcast channel.
#[derive(Clone)]
pub struct EventFeed {
    buffer: Arc<RwLock<VecDeque<StoreEvent>>>,
    tx: broadcast::Sender<StoreEvent>,
}

impl EventFeed {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            buffer: Arc::new(RwLock::new(VecDeque::with_capacity(BUFFER_CAPACITY))),
            tx,
        }
    }

    /// Publish an event to the buffer and any live subscribers.
    pub async fn publish(&self, kind: EventKind, message: impl Into<String>) {
        let event = StoreEvent {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            created_at: Utc::now(),
        };

        {
            let mut buffer = self.buffer.write().await;
            if buffer.len() == BUFFER_CAPACITY {
                buffer.pop_front();
            }
            buffer.push_back(event.clone());
        }

        // Send fails only when nobody is subscribed, which is fine.
        let _ = self.tx.send(event);
    }

    /// The buffered events, newest first.
    pub async fn recent(&self) -> Vec<StoreEvent> {
        let buffer = self.buffer.read().await;
        buffer.iter().rev().cloned().collect()
    }

    /// Subscribe for live events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }

    /// Spawn the background simulator emitting a random event every few
    /// seconds. Not started in tests; they publish directly.
    pub fn start_simulator(&self) {
        let feed = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(EMIT_INTERVAL);
            loop {
                interval.tick().await;
                let (kind, message) = simulated_event();
                feed.publish(kind, message).await;
            }
        });
        tracing::info!("event feed simulator started");
    }
}

impl Default for EventFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate one plausible-looking store event.
fn simulated_event() -> (EventKind, String) {
    const PRODUCTS: &[&str] = &[
        "Apex Pro Helmet",
        "Tarmac Summer Gloves",
        "Ridgeline Armored Jacket",
        "Slipstream Rain Suit",
        "Canyon Touring Boots",
    ];
    const NAMES: &[&str] = &["Jordan", "Riley", "Casey", "Morgan", "Avery"];

    let mut rng = rand::rng();
    let product = PRODUCTS.choose(&mut rng).copied().unwrap_or("a product");
    let name = NAMES.choose(&mut rng).copied().unwrap_or("someone");

    match rng.random_range(0..4u8) {
        0 => (
            EventKind::OrderPlaced,
            format!("New order: {} x{}", product, rng.random_range(1..=3)),
        ),
        1 => (
            EventKind::LowStock,
            format!("{product} is down to {} units", rng.random_range(1..=5)),
        ),
        2 => (
            EventKind::NewReview,
            format!("{name} left a {}-star review on {product}", rng.random_range(3..=5)),
        ),
        _ => (EventKind::NewCustomer, format!("{name} created an account")),
    }
}
