use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::error::AppError;

/// User notification collaborator. Sends are best-effort; callers treat a
/// failed send as non-fatal.
#[automock]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_notification(&self, user_id: Uuid, message: &str) -> Result<(), AppError>;
}

/// Default transport: writes the notification to the log. Stands in until a
/// real push/SMS gateway is wired up.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_notification(&self, user_id: Uuid, message: &str) -> Result<(), AppError> {
        tracing::info!(user_id = %user_id, message, "notification sent");
        Ok(())
    }
}
