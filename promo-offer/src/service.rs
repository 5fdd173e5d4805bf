use chrono::NaiveDateTime;
use promo_core::{Clock, Offer, OfferRepository, OfferStatus};
use std::sync::Arc;

use crate::lifecycle;

/// Coordinates store access with lifecycle recomputation.
///
/// Business checks that reject a request (conflict on create, forbidden
/// delete) are exposed as predicates for the HTTP layer; the mutating calls
/// themselves never re-check.
#[derive(Clone)]
pub struct OfferService {
    repo: Arc<dyn OfferRepository>,
    clock: Arc<dyn Clock>,
}

impl OfferService {
    pub fn new(repo: Arc<dyn OfferRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Fetch one offer, bringing its status up to date first. A status
    /// change is written back before returning.
    pub async fn get_offer(&self, product: &str) -> Option<Offer> {
        let mut offer = self.repo.get(product).await?;
        if lifecycle::refresh(&mut offer, self.clock.now()) {
            tracing::info!("Offer {} is now {}", offer.product, offer.status);
            self.repo.put(offer.clone()).await;
        }
        Some(offer)
    }

    /// Stored offers as they are; statuses are not recomputed here.
    pub async fn list_offers(&self) -> Vec<Offer> {
        self.repo.list().await
    }

    /// False only when the product already has an ACTIVE offer.
    pub async fn can_create(&self, offer: &Offer) -> bool {
        match self.repo.get(&offer.product).await {
            Some(existing) => existing.status != OfferStatus::Active,
            None => true,
        }
    }

    pub async fn create_offer(&self, offer: Offer) {
        tracing::debug!("Storing new offer for {}", offer.product);
        self.repo.put(offer).await;
    }

    pub async fn replace_offer(&self, offer: Offer) {
        tracing::debug!("Replacing offer for {}", offer.product);
        self.repo.put(offer).await;
    }

    pub async fn delete_offer(&self, product: &str) {
        if self.repo.remove(product).await.is_some() {
            tracing::debug!("Removed offer for {}", product);
        }
    }
}
