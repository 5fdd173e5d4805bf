use async_trait::async_trait;
use dashmap::DashMap;
use promo_core::{Offer, OfferRepository};

pub const DEFAULT_CAPACITY: usize = 50;

/// Offer repository backed by a sharded concurrent map, keyed by product id.
///
/// Nothing is persisted: state lives for the lifetime of the process.
#[derive(Debug)]
pub struct InMemoryOfferStore {
    offers: DashMap<String, Offer>,
}

impl InMemoryOfferStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            offers: DashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}

impl Default for InMemoryOfferStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OfferRepository for InMemoryOfferStore {
    async fn get(&self, product: &str) -> Option<Offer> {
        self.offers.get(product).map(|entry| entry.value().clone())
    }

    async fn put(&self, offer: Offer) {
        if let Some(previous) = self.offers.insert(offer.product.clone(), offer) {
            tracing::trace!("Replaced stored offer for {}", previous.product);
        }
    }

    async fn remove(&self, product: &str) -> Option<Offer> {
        self.offers.remove(product).map(|(_, offer)| offer)
    }

    async fn list(&self) -> Vec<Offer> {
        self.offers.iter().map(|entry| entry.value().clone()).collect()
    }
}
