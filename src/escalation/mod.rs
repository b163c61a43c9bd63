pub mod helpline;
pub mod notify;

use async_trait::async_trait;

use crate::models::delivery::Delivery;

/// One unit in the escalation pipeline. Handlers read the record, perform
/// their side effects, and never write back to it.
#[async_trait]
pub trait EscalationHandler: Send + Sync {
    async fn handle(&self, delivery: &Delivery);
}

/// Fixed-order escalation pipeline, built once at startup. Every handler
/// runs exactly once per escalation; there is no branching and no early
/// termination.
pub struct EscalationChain {
    handlers: Vec<Box<dyn EscalationHandler>>,
}

impl EscalationChain {
    pub fn new(handlers: Vec<Box<dyn EscalationHandler>>) -> Self {
        Self { handlers }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub async fn run(&self, delivery: &Delivery) {
        for handler in &self.handlers {
            handler.handle(delivery).await;
        }
    }
}
