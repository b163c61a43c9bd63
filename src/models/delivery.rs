use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    Pending,
    Accepted,
    InTransit,
    Delivered,
    Errored,
}

/// Kinds a delivery-affecting error can take. External names are
/// SCREAMING_SNAKE_CASE on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryErrorKind {
    CancelledByClient,
    CancelledByRestaurant,
    DeliveryUnsuccessful,
    DeliveryDelayed,
    Other,
}

impl DeliveryErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryErrorKind::CancelledByClient => "CANCELLED_BY_CLIENT",
            DeliveryErrorKind::CancelledByRestaurant => "CANCELLED_BY_RESTAURANT",
            DeliveryErrorKind::DeliveryUnsuccessful => "DELIVERY_UNSUCCESSFUL",
            DeliveryErrorKind::DeliveryDelayed => "DELIVERY_DELAYED",
            DeliveryErrorKind::Other => "OTHER",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DeliveryError {
    #[serde(rename = "type")]
    pub kind: DeliveryErrorKind,
    /// Numeric payload, meaningful only for `DeliveryDelayed` (delay minutes).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct Ratings {
    pub restaurant: Option<u8>,
    pub courier: Option<u8>,
}

/// One order's delivery lifecycle. `status` is written only by the status
/// engine; `error` is set only as part of a transition into `Errored`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delivery {
    pub id: Uuid,
    pub status: DeliveryStatus,
    pub error: Option<DeliveryError>,
    pub customer_id: Uuid,
    pub restaurant_id: Uuid,
    pub courier_id: Option<Uuid>,
    pub ratings: Ratings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
