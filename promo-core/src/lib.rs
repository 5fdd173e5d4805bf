pub mod clock;
pub mod models;
pub mod repository;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use models::{CurrencyCode, Offer, OfferStatus};
pub use repository::OfferRepository;
pub use validation::{FieldError, ValidationErrors};

/// Expected, recoverable outcomes of an offer operation.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("There is an already active offer on product {0}")]
    Conflict(String),
    #[error("Validation failed: {0}")]
    ValidationFailed(ValidationErrors),
    #[error("Cannot delete an active offer: {0}")]
    Forbidden(String),
}
