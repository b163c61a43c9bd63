use async_trait::async_trait;
use mockall::automock;

use crate::error::AppError;
use crate::models::delivery::Delivery;

/// Human-staffed support channel. Receives the full delivery record; ticket
/// creation is the collaborator's job.
#[automock]
#[async_trait]
pub trait Helpline: Send + Sync {
    async fn send_request(&self, delivery: &Delivery, message: &str) -> Result<(), AppError>;
}

/// Default transport: writes the support request to the log.
pub struct LogHelpline;

#[async_trait]
impl Helpline for LogHelpline {
    async fn send_request(&self, delivery: &Delivery, message: &str) -> Result<(), AppError> {
        tracing::info!(delivery_id = %delivery.id, message, "helpline request opened");
        Ok(())
    }
}
