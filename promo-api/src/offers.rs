use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDateTime;
use promo_core::models::timestamp;
use promo_core::{CoreError, CurrencyCode, Offer, OfferStatus, ValidationErrors};
use promo_offer::{OfferDraft, OfferPatch, OfferValidator};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{error::AppError, state::AppState};

pub const MAX_PRODUCT_LEN: usize = 50;
pub const MAX_DESCRIPTION_LEN: usize = 255;

// ============================================================================
// Request Types
// ============================================================================

/// Body of `POST /offer`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateOfferRequest {
    pub product: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub start: Option<NaiveDateTime>,
    #[serde(default, with = "timestamp::option")]
    pub end: Option<NaiveDateTime>,
    pub status: Option<OfferStatus>,
    pub description: Option<String>,
    pub currency: Option<String>,
    pub price: Option<Decimal>,
}

/// Body of `PATCH /offer`. Price and currency are not accepted.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateOfferRequest {
    pub product: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub start: Option<NaiveDateTime>,
    #[serde(default, with = "timestamp::option")]
    pub end: Option<NaiveDateTime>,
    pub status: Option<OfferStatus>,
    pub description: Option<String>,
}

fn check_product(product: Option<&str>, errors: &mut ValidationErrors) {
    match product {
        None => errors.reject("product", "must not be null", &product),
        Some("") => errors.reject("product", "must not be empty", &product),
        Some(p) if p.chars().count() > MAX_PRODUCT_LEN => errors.reject(
            "product",
            format!("size must be between 0 and {}", MAX_PRODUCT_LEN),
            &p,
        ),
        Some(_) => {}
    }
}

fn check_description(description: Option<&str>, errors: &mut ValidationErrors) {
    if let Some(d) = description {
        if d.chars().count() > MAX_DESCRIPTION_LEN {
            errors.reject(
                "description",
                format!("size must be between 0 and {}", MAX_DESCRIPTION_LEN),
                &d,
            );
        }
    }
}

impl CreateOfferRequest {
    /// Field constraints plus the date/status rules, all reported together.
    pub fn validate(self, now: NaiveDateTime) -> Result<OfferDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        check_product(self.product.as_deref(), &mut errors);

        if self.end.is_none() {
            errors.reject("end", "must not be null", &self.end);
        }

        match self.price {
            None => errors.reject("price", "must not be null", &self.price),
            Some(price) if price.is_sign_negative() && !price.is_zero() => {
                errors.reject("price", "must be greater than or equal to 0", &price)
            }
            Some(_) => {}
        }

        check_description(self.description.as_deref(), &mut errors);

        let currency = match self.currency.as_deref().map(str::parse::<CurrencyCode>) {
            Some(Ok(code)) => Some(code),
            Some(Err(e)) => {
                errors.reject("currency", e.to_string(), &self.currency);
                None
            }
            None => None,
        };

        let window = promo_offer::TimeWindow {
            start: self.start,
            end: self.end,
            status: self.status,
        };
        errors.extend(OfferValidator::validate(&window, false, now));

        match (self.product, self.end, self.price) {
            (Some(product), Some(end), Some(price)) if errors.is_empty() => Ok(OfferDraft {
                product,
                start: self.start,
                end,
                status: self.status,
                description: self.description,
                currency,
                price,
            }),
            _ => Err(errors),
        }
    }
}

impl UpdateOfferRequest {
    pub fn validate(self, now: NaiveDateTime) -> Result<OfferPatch, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_product(self.product.as_deref(), &mut errors);
        check_description(self.description.as_deref(), &mut errors);

        let patch = OfferPatch {
            product: self.product.unwrap_or_default(),
            start: self.start,
            end: self.end,
            status: self.status,
            description: self.description,
        };
        errors.extend(OfferValidator::validate(&patch.window(), true, now));

        errors.into_result().map(|()| patch)
    }
}

fn product_in_path(product: &str) -> Result<(), AppError> {
    let mut errors = ValidationErrors::new();
    check_product(Some(product), &mut errors);
    errors.into_result().map_err(AppError::ValidationError)
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/offer", get(list_offers).post(create_offer).patch(update_offer))
        .route("/offer/{product}", get(get_offer).delete(delete_offer))
}

/// GET /offer
pub async fn list_offers(State(state): State<AppState>) -> Json<Vec<Offer>> {
    tracing::info!("Processing an offer list request");
    Json(state.offers.list_offers().await)
}

/// GET /offer/{product}
pub async fn get_offer(
    State(state): State<AppState>,
    Path(product): Path<String>,
) -> Result<Json<Offer>, AppError> {
    tracing::info!("Request to get offer {}", product);
    product_in_path(&product)?;

    match state.offers.get_offer(&product).await {
        Some(offer) => Ok(Json(offer)),
        None => Err(CoreError::NotFound(product).into()),
    }
}

/// POST /offer
pub async fn create_offer(
    State(state): State<AppState>,
    payload: Result<Json<CreateOfferRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(req) = payload.map_err(|e| AppError::malformed_body(e.body_text()))?;
    tracing::info!("Request to create offer {:?}", req.product);

    let now = state.offers.now();
    let draft = req.validate(now).map_err(|errors| {
        tracing::error!("Validation errors: {}", errors);
        CoreError::ValidationFailed(errors)
    })?;
    let offer = draft.into_offer(now);

    if !state.offers.can_create(&offer).await {
        tracing::error!("Already existing offer for {}", offer.product);
        return Err(CoreError::Conflict(offer.product).into());
    }

    state.offers.create_offer(offer).await;
    Ok(StatusCode::OK)
}

/// PATCH /offer
/// The product must exist before the rest of the body is validated.
pub async fn update_offer(
    State(state): State<AppState>,
    payload: Result<Json<UpdateOfferRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(req) = payload.map_err(|e| AppError::malformed_body(e.body_text()))?;
    tracing::info!("Request to update offer {:?}", req.product);

    let mut product_errors = ValidationErrors::new();
    check_product(req.product.as_deref(), &mut product_errors);
    product_errors.into_result().map_err(CoreError::ValidationFailed)?;

    let product = req.product.clone().unwrap_or_default();
    let Some(existing) = state.offers.get_offer(&product).await else {
        tracing::error!("Offer not found: {}", product);
        return Err(CoreError::NotFound(product).into());
    };

    let now = state.offers.now();
    let patch = req.validate(now).map_err(|errors| {
        tracing::error!("Validation errors: {}", errors);
        CoreError::ValidationFailed(errors)
    })?;

    // A supplied start is only checked against the request's own end above.
    let start_moved = patch.start.is_some();
    let merged = patch.apply(existing, now);
    if start_moved {
        OfferValidator::validate_merged(&merged)
            .into_result()
            .map_err(|errors| {
                tracing::error!("Validation errors: {}", errors);
                CoreError::ValidationFailed(errors)
            })?;
    }

    state.offers.replace_offer(merged).await;
    Ok(StatusCode::OK)
}

/// DELETE /offer/{product}
/// Deleting an unknown product succeeds.
pub async fn delete_offer(
    State(state): State<AppState>,
    Path(product): Path<String>,
) -> Result<StatusCode, AppError> {
    tracing::info!("Request to remove offer {}", product);
    product_in_path(&product)?;

    let current = state.offers.get_offer(&product).await;
    if current.is_some_and(|offer| offer.status == OfferStatus::Active) {
        return Err(CoreError::Forbidden(product).into());
    }

    state.offers.delete_offer(&product).await;
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn create(product: &str) -> CreateOfferRequest {
        CreateOfferRequest {
            product: Some(product.to_string()),
            end: Some(now() + Duration::hours(2)),
            price: Some(Decimal::new(1000, 2)),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_request_builds_draft() {
        let draft = create("sku1").validate(now()).unwrap();
        assert_eq!(draft.product, "sku1");
        assert_eq!(draft.currency, None);
    }

    #[test]
    fn test_create_request_missing_required_fields() {
        let errors = CreateOfferRequest::default().validate(now()).unwrap_err();
        assert!(errors.has_field("product"));
        assert!(errors.has_field("end"));
        assert!(errors.has_field("price"));
    }

    #[test]
    fn test_create_request_field_limits() {
        let mut req = create(&"x".repeat(51));
        req.description = Some("d".repeat(256));
        req.price = Some(Decimal::new(-1, 2));
        req.currency = Some("ZZZ".to_string());

        let errors = req.validate(now()).unwrap_err();
        for field in ["product", "description", "price", "currency"] {
            assert!(errors.has_field(field), "{field} should be rejected");
        }
    }

    #[test]
    fn test_create_request_zero_price_and_known_currency() {
        let mut req = create("sku1");
        req.price = Some(Decimal::ZERO);
        req.currency = Some("RON".to_string());
        let draft = req.validate(now()).unwrap();
        assert_eq!(draft.currency.unwrap().as_str(), "RON");
    }

    #[test]
    fn test_create_request_merges_window_rules() {
        let mut req = create("sku1");
        req.end = Some(now() - Duration::hours(1));
        let errors = req.validate(now()).unwrap_err();
        assert_eq!(errors.fields.len(), 1);
        assert_eq!(errors.fields[0].field, "end");
    }

    #[test]
    fn test_update_request_status_rule() {
        let req = UpdateOfferRequest {
            product: Some("sku1".to_string()),
            status: Some(OfferStatus::Active),
            ..Default::default()
        };
        assert!(req.validate(now()).unwrap_err().has_field("status"));

        let req = UpdateOfferRequest {
            product: Some("sku1".to_string()),
            status: Some(OfferStatus::Canceled),
            ..Default::default()
        };
        assert_eq!(req.validate(now()).unwrap().status, Some(OfferStatus::Canceled));
    }

    #[test]
    fn test_update_request_description_limit() {
        let req = UpdateOfferRequest {
            product: Some("sku1".to_string()),
            description: Some("d".repeat(256)),
            ..Default::default()
        };
        let errors = req.validate(now()).unwrap_err();
        assert_eq!(errors.fields.len(), 1);
        assert_eq!(errors.fields[0].field, "description");

        let req = UpdateOfferRequest {
            product: Some("sku1".to_string()),
            description: Some("d".repeat(255)),
            ..Default::default()
        };
        assert!(req.validate(now()).is_ok());
    }

    #[test]
    fn test_request_timestamps_use_wire_format() {
        let req: UpdateOfferRequest = serde_json::from_str(
            r#"{"product":"sku1","end":"2026-10-17 08:30:00","status":"CANCELED"}"#,
        )
        .unwrap();
        assert_eq!(req.end, Some(timestamp::parse("2026-10-17 08:30:00").unwrap()));
        assert_eq!(req.start, None);

        assert!(serde_json::from_str::<UpdateOfferRequest>(r#"{"end":"17/10/2026"}"#).is_err());
    }
}
