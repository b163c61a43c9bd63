use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

use crate::clients::notify::Notifier;
use crate::escalation::EscalationHandler;
use crate::models::delivery::{Delivery, DeliveryErrorKind};

/// First handler in the chain: tells the affected parties what happened.
pub struct NotificationDispatcher {
    notifier: Arc<dyn Notifier>,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    async fn send(&self, delivery: &Delivery, user_id: Uuid, message: &str) {
        // Best effort: a dropped notification never stops the pipeline.
        if let Err(err) = self.notifier.send_notification(user_id, message).await {
            warn!(
                delivery_id = %delivery.id,
                user_id = %user_id,
                error = %err,
                "notification send failed"
            );
        }
    }
}

#[async_trait]
impl EscalationHandler for NotificationDispatcher {
    async fn handle(&self, delivery: &Delivery) {
        let Some(error) = &delivery.error else {
            return;
        };

        match error.kind {
            DeliveryErrorKind::CancelledByClient => {
                if let Some(courier_id) = delivery.courier_id {
                    self.send(delivery, courier_id, "assignment cancelled").await;
                }
                let message = format!("order {} cancelled by client", delivery.id);
                self.send(delivery, delivery.restaurant_id, &message).await;
            }
            DeliveryErrorKind::CancelledByRestaurant => {
                self.send(delivery, delivery.customer_id, "order cancelled by restaurant")
                    .await;
            }
            DeliveryErrorKind::DeliveryUnsuccessful => {
                self.send(delivery, delivery.customer_id, "delivery unsuccessful")
                    .await;
            }
            DeliveryErrorKind::DeliveryDelayed => {
                let minutes = error.value.unwrap_or(0);
                let message = format!("delayed by {minutes} minutes");
                self.send(delivery, delivery.customer_id, &message).await;
            }
            DeliveryErrorKind::Other => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use uuid::Uuid;

    use super::NotificationDispatcher;
    use crate::clients::notify::MockNotifier;
    use crate::escalation::EscalationHandler;
    use crate::models::delivery::{
        Delivery, DeliveryError, DeliveryErrorKind, DeliveryStatus, Ratings,
    };

    fn delivery(kind: DeliveryErrorKind, value: Option<u32>) -> Delivery {
        Delivery {
            id: Uuid::from_u128(1),
            status: DeliveryStatus::Errored,
            error: Some(DeliveryError { kind, value }),
            customer_id: Uuid::from_u128(10),
            restaurant_id: Uuid::from_u128(20),
            courier_id: Some(Uuid::from_u128(30)),
            ratings: Ratings::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn cancelled_by_client_notifies_courier_and_restaurant() {
        let record = delivery(DeliveryErrorKind::CancelledByClient, None);
        let courier_id = record.courier_id.unwrap();
        let restaurant_id = record.restaurant_id;
        let restaurant_message = format!("order {} cancelled by client", record.id);

        let mut notifier = MockNotifier::new();
        notifier
            .expect_send_notification()
            .withf(move |user_id, message| {
                *user_id == courier_id && message == "assignment cancelled"
            })
            .once()
            .returning(|_, _| Ok(()));
        notifier
            .expect_send_notification()
            .withf(move |user_id, message| {
                *user_id == restaurant_id && message == restaurant_message
            })
            .once()
            .returning(|_, _| Ok(()));

        NotificationDispatcher::new(Arc::new(notifier))
            .handle(&record)
            .await;
    }

    #[tokio::test]
    async fn cancelled_by_client_without_courier_skips_courier() {
        let mut record = delivery(DeliveryErrorKind::CancelledByClient, None);
        record.courier_id = None;
        let restaurant_id = record.restaurant_id;

        let mut notifier = MockNotifier::new();
        notifier
            .expect_send_notification()
            .withf(move |user_id, _| *user_id == restaurant_id)
            .once()
            .returning(|_, _| Ok(()));

        NotificationDispatcher::new(Arc::new(notifier))
            .handle(&record)
            .await;
    }

    #[tokio::test]
    async fn cancelled_by_restaurant_notifies_customer() {
        let record = delivery(DeliveryErrorKind::CancelledByRestaurant, None);
        let customer_id = record.customer_id;

        let mut notifier = MockNotifier::new();
        notifier
            .expect_send_notification()
            .withf(move |user_id, message| {
                *user_id == customer_id && message == "order cancelled by restaurant"
            })
            .once()
            .returning(|_, _| Ok(()));

        NotificationDispatcher::new(Arc::new(notifier))
            .handle(&record)
            .await;
    }

    #[tokio::test]
    async fn unsuccessful_delivery_notifies_customer() {
        let record = delivery(DeliveryErrorKind::DeliveryUnsuccessful, None);
        let customer_id = record.customer_id;

        let mut notifier = MockNotifier::new();
        notifier
            .expect_send_notification()
            .withf(move |user_id, message| {
                *user_id == customer_id && message == "delivery unsuccessful"
            })
            .once()
            .returning(|_, _| Ok(()));

        NotificationDispatcher::new(Arc::new(notifier))
            .handle(&record)
            .await;
    }

    #[tokio::test]
    async fn delayed_delivery_reports_minutes_to_customer() {
        let record = delivery(DeliveryErrorKind::DeliveryDelayed, Some(15));
        let customer_id = record.customer_id;

        let mut notifier = MockNotifier::new();
        notifier
            .expect_send_notification()
            .withf(move |user_id, message| {
                *user_id == customer_id && message == "delayed by 15 minutes"
            })
            .once()
            .returning(|_, _| Ok(()));

        NotificationDispatcher::new(Arc::new(notifier))
            .handle(&record)
            .await;
    }

    #[tokio::test]
    async fn other_errors_notify_nobody() {
        let record = delivery(DeliveryErrorKind::Other, None);
        let notifier = MockNotifier::new();

        NotificationDispatcher::new(Arc::new(notifier))
            .handle(&record)
            .await;
    }

    #[tokio::test]
    async fn failed_send_does_not_panic_or_propagate() {
        let record = delivery(DeliveryErrorKind::DeliveryUnsuccessful, None);
        let mut notifier = MockNotifier::new();
        notifier
            .expect_send_notification()
            .once()
            .returning(|_, _| Err(crate::error::AppError::Internal("gateway down".to_string())));

        NotificationDispatcher::new(Arc::new(notifier))
            .handle(&record)
            .await;
    }
}
