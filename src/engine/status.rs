//! Status transition engine: the sole writer of a delivery's status.
//!
//! The machine is deliberately permissive. Any status in the enumeration may
//! follow any other; only record existence and payload shape are validated,
//! and transition legality is left to callers. The engine never runs the
//! escalation chain itself, keeping the state machine decoupled from
//! escalation policy.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::delivery::{Delivery, DeliveryError, DeliveryErrorKind, DeliveryStatus, Ratings};
use crate::state::AppState;

pub fn create_delivery(
    state: &AppState,
    customer_id: Uuid,
    restaurant_id: Uuid,
    courier_id: Option<Uuid>,
) -> Delivery {
    let now = Utc::now();
    let delivery = Delivery {
        id: Uuid::new_v4(),
        status: DeliveryStatus::Pending,
        error: None,
        customer_id,
        restaurant_id,
        courier_id,
        ratings: Ratings::default(),
        created_at: now,
        updated_at: now,
    };

    state.deliveries.insert(delivery.id, delivery.clone());
    state.metrics.deliveries_tracked.inc();

    info!(delivery_id = %delivery.id, "delivery created");
    delivery
}

pub fn get_delivery(state: &AppState, id: Uuid) -> Result<Delivery, AppError> {
    state
        .deliveries
        .get(&id)
        .map(|entry| entry.value().clone())
        .ok_or_else(|| AppError::NotFound(format!("delivery {id} not found")))
}

pub fn get_status(state: &AppState, id: Uuid) -> Result<DeliveryStatus, AppError> {
    get_delivery(state, id).map(|delivery| delivery.status)
}

pub fn get_rating(state: &AppState, id: Uuid) -> Result<Ratings, AppError> {
    get_delivery(state, id).map(|delivery| delivery.ratings)
}

/// Commits `new_status` and its error payload atomically, returning the
/// committed snapshot. The record invariant is enforced here: an error is
/// present iff the new status is `Errored`.
pub fn set_status(
    state: &AppState,
    id: Uuid,
    new_status: DeliveryStatus,
    error: Option<DeliveryError>,
) -> Result<Delivery, AppError> {
    validate_error_payload(new_status, error)?;

    let mut delivery = state
        .deliveries
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("delivery {id} not found")))?;

    delivery.status = new_status;
    delivery.error = error;
    delivery.updated_at = Utc::now();

    state
        .metrics
        .status_updates_total
        .with_label_values(&[status_label(new_status)])
        .inc();

    info!(delivery_id = %id, status = ?new_status, "status committed");
    Ok(delivery.clone())
}

pub fn set_rating(
    state: &AppState,
    id: Uuid,
    restaurant: Option<u8>,
    courier: Option<u8>,
) -> Result<Delivery, AppError> {
    for rating in [restaurant, courier].into_iter().flatten() {
        if !(1..=5).contains(&rating) {
            return Err(AppError::BadRequest(format!(
                "rating must be between 1 and 5, got {rating}"
            )));
        }
    }

    let mut delivery = state
        .deliveries
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("delivery {id} not found")))?;

    if let Some(rating) = restaurant {
        delivery.ratings.restaurant = Some(rating);
    }
    if let Some(rating) = courier {
        delivery.ratings.courier = Some(rating);
    }
    delivery.updated_at = Utc::now();

    Ok(delivery.clone())
}

fn validate_error_payload(
    new_status: DeliveryStatus,
    error: Option<DeliveryError>,
) -> Result<(), AppError> {
    match (new_status, error) {
        (DeliveryStatus::Errored, None) => Err(AppError::BadRequest(
            "an errored delivery requires an error payload".to_string(),
        )),
        (DeliveryStatus::Errored, Some(error)) => {
            if error.kind == DeliveryErrorKind::DeliveryDelayed && error.value.is_none() {
                return Err(AppError::BadRequest(
                    "a delayed delivery requires the delay in minutes".to_string(),
                ));
            }
            Ok(())
        }
        (_, Some(_)) => Err(AppError::BadRequest(
            "an error payload is only valid on an errored delivery".to_string(),
        )),
        (_, None) => Ok(()),
    }
}

fn status_label(status: DeliveryStatus) -> &'static str {
    match status {
        DeliveryStatus::Pending => "pending",
        DeliveryStatus::Accepted => "accepted",
        DeliveryStatus::InTransit => "in_transit",
        DeliveryStatus::Delivered => "delivered",
        DeliveryStatus::Errored => "errored",
    }
}
