pub mod draft;
pub mod lifecycle;
pub mod service;
pub mod validator;

pub use draft::{OfferDraft, OfferPatch};
pub use lifecycle::effective_status;
pub use service::OfferService;
pub use validator::{OfferValidator, TimeWindow, WindowRule};
