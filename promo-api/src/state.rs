use std::sync::Arc;
use promo_core::{Clock, OfferRepository, SystemClock};
use promo_offer::OfferService;
use promo_store::InMemoryOfferStore;

#[derive(Clone)]
pub struct AppState {
    pub offers: OfferService,
}

impl AppState {
    pub fn new(repo: Arc<dyn OfferRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            offers: OfferService::new(repo, clock),
        }
    }

    /// Fresh in-memory store on the system clock.
    pub fn in_memory(capacity: usize) -> Self {
        Self::new(
            Arc::new(InMemoryOfferStore::with_capacity(capacity)),
            Arc::new(SystemClock),
        )
    }
}
