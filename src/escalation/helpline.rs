use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::clients::helpline::Helpline;
use crate::escalation::EscalationHandler;
use crate::models::delivery::{Delivery, DeliveryErrorKind};

/// Terminal handler: opens a human-support request for severe error kinds.
pub struct HelplineDispatcher {
    helpline: Arc<dyn Helpline>,
}

impl HelplineDispatcher {
    pub fn new(helpline: Arc<dyn Helpline>) -> Self {
        Self { helpline }
    }

    /// Message for the helpline ticket, or `None` when the kind does not
    /// warrant human attention.
    fn escalation_message(kind: DeliveryErrorKind) -> Option<&'static str> {
        match kind {
            DeliveryErrorKind::CancelledByRestaurant => Some("order cancelled by restaurant"),
            DeliveryErrorKind::DeliveryUnsuccessful => Some("courier failed to deliver"),
            DeliveryErrorKind::Other => Some("non-standard delivery error reported"),
            DeliveryErrorKind::CancelledByClient | DeliveryErrorKind::DeliveryDelayed => None,
        }
    }
}

#[async_trait]
impl EscalationHandler for HelplineDispatcher {
    async fn handle(&self, delivery: &Delivery) {
        let Some(error) = &delivery.error else {
            return;
        };

        let Some(message) = Self::escalation_message(error.kind) else {
            return;
        };

        if let Err(err) = self.helpline.send_request(delivery, message).await {
            warn!(
                delivery_id = %delivery.id,
                error = %err,
                "helpline escalation failed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use uuid::Uuid;

    use super::HelplineDispatcher;
    use crate::clients::helpline::MockHelpline;
    use crate::escalation::EscalationHandler;
    use crate::models::delivery::{
        Delivery, DeliveryError, DeliveryErrorKind, DeliveryStatus, Ratings,
    };

    fn delivery(kind: DeliveryErrorKind) -> Delivery {
        Delivery {
            id: Uuid::from_u128(2),
            status: DeliveryStatus::Errored,
            error: Some(DeliveryError { kind, value: None }),
            customer_id: Uuid::from_u128(10),
            restaurant_id: Uuid::from_u128(20),
            courier_id: None,
            ratings: Ratings::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    async fn expect_escalation(kind: DeliveryErrorKind, expected: &'static str) {
        let record = delivery(kind);
        let record_id = record.id;

        let mut helpline = MockHelpline::new();
        helpline
            .expect_send_request()
            .withf(move |delivery, message| delivery.id == record_id && message == expected)
            .once()
            .returning(|_, _| Ok(()));

        HelplineDispatcher::new(Arc::new(helpline))
            .handle(&record)
            .await;
    }

    async fn expect_no_escalation(kind: DeliveryErrorKind) {
        let record = delivery(kind);
        let helpline = MockHelpline::new();

        HelplineDispatcher::new(Arc::new(helpline))
            .handle(&record)
            .await;
    }

    #[tokio::test]
    async fn cancelled_by_restaurant_escalates() {
        expect_escalation(
            DeliveryErrorKind::CancelledByRestaurant,
            "order cancelled by restaurant",
        )
        .await;
    }

    #[tokio::test]
    async fn unsuccessful_delivery_escalates() {
        expect_escalation(
            DeliveryErrorKind::DeliveryUnsuccessful,
            "courier failed to deliver",
        )
        .await;
    }

    #[tokio::test]
    async fn other_errors_escalate() {
        expect_escalation(
            DeliveryErrorKind::Other,
            "non-standard delivery error reported",
        )
        .await;
    }

    #[tokio::test]
    async fn client_cancellation_stays_out_of_the_helpline() {
        expect_no_escalation(DeliveryErrorKind::CancelledByClient).await;
    }

    #[tokio::test]
    async fn delays_stay_out_of_the_helpline() {
        expect_no_escalation(DeliveryErrorKind::DeliveryDelayed).await;
    }

    #[tokio::test]
    async fn failed_escalation_does_not_propagate() {
        let record = delivery(DeliveryErrorKind::Other);
        let mut helpline = MockHelpline::new();
        helpline
            .expect_send_request()
            .once()
            .returning(|_, _| Err(crate::error::AppError::Internal("ticket system down".to_string())));

        HelplineDispatcher::new(Arc::new(helpline))
            .handle(&record)
            .await;
    }
}
