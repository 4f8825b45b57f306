//! Latest-wins text search state.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use log::debug;
use tokio::sync::RwLock;

use super::PlacesClient;
use crate::models::Place;

/// Holds the results of the most recent text search.
///
/// Each search takes a ticket before it goes out. When the response comes
/// back it is only stored if no later search has started, so a slow older
/// response never overwrites newer results.
#[derive(Debug, Clone)]
pub struct PlaceSearch {
    client: PlacesClient,
    latest_ticket: Arc<AtomicU64>,
    results: Arc<RwLock<Vec<Place>>>,
}

impl PlaceSearch {
    pub fn new(client: PlacesClient) -> Self {
        Self {
            client,
            latest_ticket: Arc::new(AtomicU64::new(0)),
            results: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Runs a text search and stores its results.
    ///
    /// Returns `None` when a newer search started while this one was in
    /// flight; the stored results are then left to the newer search.
    pub async fn search(&self, query: &str, lat: f64, lng: f64) -> Option<Vec<Place>> {
        let ticket = self.next_ticket();
        let places = self.client.search_by_text(query, lat, lng).await;
        self.apply(ticket, places).await
    }

    /// Snapshot of the currently stored results.
    pub async fn results(&self) -> Vec<Place> {
        self.results.read().await.clone()
    }

    fn next_ticket(&self) -> u64 {
        self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn apply(&self, ticket: u64, places: Vec<Place>) -> Option<Vec<Place>> {
        let mut results = self.results.write().await;

        // Checked under the write lock so a newer search cannot slip in between.
        if self.latest_ticket.load(Ordering::SeqCst) != ticket {
            debug!("Dropping results of superseded search #{ticket}");
            return None;
        }

        *results = places.clone();
        Some(places)
    }
}
