use chrono::NaiveDateTime;
use promo_core::{CurrencyCode, Offer, OfferStatus};
use rust_decimal::Decimal;

use crate::validator::TimeWindow;

/// Input for a new offer. `end` and `price` are the only fields without a
/// default.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferDraft {
    pub product: String,
    pub start: Option<NaiveDateTime>,
    pub end: NaiveDateTime,
    pub status: Option<OfferStatus>,
    pub description: Option<String>,
    pub currency: Option<CurrencyCode>,
    pub price: Decimal,
}

impl OfferDraft {
    /// Build the offer, defaulting currency to GBP, start to `now`,
    /// description to the product id and status to ACTIVE.
    pub fn into_offer(self, now: NaiveDateTime) -> Offer {
        let description = self.description.unwrap_or_else(|| self.product.clone());
        Offer {
            product: self.product,
            start: self.start.unwrap_or(now),
            end: self.end,
            status: self.status.unwrap_or(OfferStatus::Active),
            description,
            currency: self.currency.unwrap_or_default(),
            price: self.price,
        }
    }
}

/// Changes a merchant may make to an existing offer. Price and currency are
/// the offer's terms and cannot be changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferPatch {
    pub product: String,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub status: Option<OfferStatus>,
    pub description: Option<String>,
}

impl OfferPatch {
    pub fn window(&self) -> TimeWindow {
        TimeWindow {
            start: self.start,
            end: self.end,
            status: self.status,
        }
    }

    /// Merge onto `offer`. A patch for another product leaves `offer`
    /// untouched.
    ///
    /// `start` is always rewritten: to the supplied value, or to `now` when
    /// none was given, even if only the end or status changed.
    pub fn apply(self, mut offer: Offer, now: NaiveDateTime) -> Offer {
        if offer.product != self.product {
            tracing::warn!(
                "Ignoring update for {} aimed at offer {}",
                self.product,
                offer.product
            );
            return offer;
        }

        if let Some(description) = self.description {
            offer.description = description;
        }
        offer.start = self.start.unwrap_or(now);
        if let Some(end) = self.end {
            offer.end = end;
        }
        if let Some(status) = self.status {
            offer.status = status;
        }
        offer
    }
}
