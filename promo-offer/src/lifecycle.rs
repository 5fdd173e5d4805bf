use chrono::NaiveDateTime;
use promo_core::{Offer, OfferStatus};

/// Status an offer should have at `now`, and whether that differs from the
/// stored one.
///
/// Only two transitions happen on their own: an ACTIVE offer past its end
/// expires, and an INACTIVE offer whose window has opened activates.
/// CANCELED and EXPIRED are never left.
pub fn effective_status(offer: &Offer, now: NaiveDateTime) -> (OfferStatus, bool) {
    match offer.status {
        OfferStatus::Active if now > offer.end => (OfferStatus::Expired, true),
        OfferStatus::Inactive if offer.is_within_window(now) => (OfferStatus::Active, true),
        status => (status, false),
    }
}

/// Apply [`effective_status`] in place. Returns true if the status moved.
pub fn refresh(offer: &mut Offer, now: NaiveDateTime) -> bool {
    let (status, changed) = effective_status(offer, now);
    if changed {
        tracing::debug!("Offer {} moved {} -> {}", offer.product, offer.status, status);
        offer.status = status;
    }
    changed
}
