use chrono::NaiveDateTime;
use promo_core::models::timestamp;
use promo_core::{Offer, OfferStatus, ValidationErrors};

/// Start/end/status fields of a create or update request.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimeWindow {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub status: Option<OfferStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WindowRule {
    #[error("End time cannot be in the past")]
    EndInPast,
    #[error("Start time cannot be later than end time")]
    StartAfterEnd,
    #[error("status conflicts for start/end time")]
    StatusWindowConflict,
    #[error("CANCELED is the only modification to status allowed")]
    InvalidStatusTransition,
}

impl WindowRule {
    /// Request field the rule is reported against.
    pub fn field(&self) -> &'static str {
        match self {
            WindowRule::EndInPast => "end",
            WindowRule::StartAfterEnd => "start",
            WindowRule::StatusWindowConflict | WindowRule::InvalidStatusTransition => "status",
        }
    }
}

/// Checks the relationship between an offer's dates and its status:
/// it cannot end in the past, cannot start after it ends, cannot be ACTIVE
/// outside its window, and an update may only set the status to CANCELED.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfferValidator;

impl OfferValidator {
    /// Every rule broken by `window`, in rule order.
    pub fn violations(window: &TimeWindow, is_update: bool, now: NaiveDateTime) -> Vec<WindowRule> {
        let mut broken = Vec::new();

        if let Some(end) = window.end {
            if end < now {
                broken.push(WindowRule::EndInPast);
            }
        }

        if let (Some(start), Some(end)) = (window.start, window.end) {
            if end < start {
                broken.push(WindowRule::StartAfterEnd);
            }
            if window.status == Some(OfferStatus::Active) && (now < start || now > end) {
                broken.push(WindowRule::StatusWindowConflict);
            }
        }

        if let Some(status) = window.status {
            if is_update && status != OfferStatus::Canceled {
                broken.push(WindowRule::InvalidStatusTransition);
            }
        }

        broken
    }

    /// Same as [`violations`](Self::violations), reported as field errors
    /// carrying the rejected value.
    pub fn validate(window: &TimeWindow, is_update: bool, now: NaiveDateTime) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for rule in Self::violations(window, is_update, now) {
            let reason = rule.to_string();
            match rule {
                WindowRule::EndInPast => {
                    errors.reject(rule.field(), reason, &window.end.map(|t| timestamp::format(&t)))
                }
                WindowRule::StartAfterEnd => {
                    errors.reject(rule.field(), reason, &window.start.map(|t| timestamp::format(&t)))
                }
                WindowRule::StatusWindowConflict | WindowRule::InvalidStatusTransition => {
                    errors.reject(rule.field(), reason, &window.status)
                }
            }
        }
        errors
    }

    /// Window ordering of an offer after an update was merged onto it. A
    /// patch carrying a start but no end passes [`validate`](Self::validate)
    /// yet can still land after the stored end.
    pub fn validate_merged(offer: &Offer) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if offer.end < offer.start {
            let rule = WindowRule::StartAfterEnd;
            errors.reject(rule.field(), rule.to_string(), &timestamp::format(&offer.start));
        }
        errors
    }
}
