use async_trait::async_trait;
use crate::models::Offer;

/// Repository trait for offer data access.
///
/// Implementations must be safe to share between request handlers without
/// any locking on the caller's side. A missing product is `None`, not an
/// error.
#[async_trait]
pub trait OfferRepository: Send + Sync {
    async fn get(&self, product: &str) -> Option<Offer>;

    /// Insert or replace the offer stored under `offer.product`.
    async fn put(&self, offer: Offer);

    async fn remove(&self, product: &str) -> Option<Offer>;

    /// Snapshot of every stored offer, in no particular order.
    async fn list(&self) -> Vec<Offer>;
}
