use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::status as engine;
use crate::error::AppError;
use crate::models::delivery::{Delivery, DeliveryError, DeliveryStatus, Ratings};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/deliveries", post(create_delivery))
        .route("/deliveries/:id", get(get_delivery))
        .route("/deliveries/:id/status", get(get_status).patch(update_status))
        .route("/deliveries/:id/rating", get(get_rating).patch(update_rating))
}

#[derive(Deserialize)]
pub struct CreateDeliveryRequest {
    pub customer_id: Uuid,
    pub restaurant_id: Uuid,
    pub courier_id: Option<Uuid>,
}

#[derive(Serialize)]
struct StatusResponse {
    status: DeliveryStatus,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: DeliveryStatus,
    pub error: Option<DeliveryError>,
}

#[derive(Deserialize)]
pub struct UpdateRatingRequest {
    pub restaurant: Option<u8>,
    pub courier: Option<u8>,
}

async fn create_delivery(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateDeliveryRequest>,
) -> Json<Delivery> {
    let delivery = engine::create_delivery(
        &state,
        payload.customer_id,
        payload.restaurant_id,
        payload.courier_id,
    );
    Json(delivery)
}

async fn get_delivery(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Delivery>, AppError> {
    Ok(Json(engine::get_delivery(&state, id)?))
}

async fn get_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusResponse>, AppError> {
    let status = engine::get_status(&state, id)?;
    Ok(Json(StatusResponse { status }))
}

/// Commits the status through the engine, then runs the escalation chain on
/// the committed snapshot when the update put the delivery into an error
/// state. The chain runs inside this request, notifications before helpline.
async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<Delivery>, AppError> {
    let delivery = engine::set_status(&state, id, payload.status, payload.error)?;

    if let Some(error) = &delivery.error {
        state
            .metrics
            .escalations_total
            .with_label_values(&[error.kind.as_str()])
            .inc();
        state.chain.run(&delivery).await;
    }

    Ok(Json(delivery))
}

async fn get_rating(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Ratings>, AppError> {
    Ok(Json(engine::get_rating(&state, id)?))
}

async fn update_rating(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRatingRequest>,
) -> Result<Json<Delivery>, AppError> {
    let delivery = engine::set_rating(&state, id, payload.restaurant, payload.courier)?;
    Ok(Json(delivery))
}
