use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use crate::clients::account::AccountClient;
use crate::clients::helpline::Helpline;
use crate::clients::notify::Notifier;
use crate::escalation::EscalationChain;
use crate::escalation::helpline::HelplineDispatcher;
use crate::escalation::notify::NotificationDispatcher;
use crate::models::delivery::Delivery;
use crate::observability::metrics::Metrics;

pub struct AppState {
    pub deliveries: DashMap<Uuid, Delivery>,
    pub chain: EscalationChain,
    pub accounts: AccountClient,
    pub metrics: Metrics,
}

impl AppState {
    /// Wires the escalation chain in its fixed order: notifications first,
    /// helpline last. Collaborators are injected by the composing boundary.
    pub fn new(
        notifier: Arc<dyn Notifier>,
        helpline: Arc<dyn Helpline>,
        accounts: AccountClient,
    ) -> Self {
        let chain = EscalationChain::new(vec![
            Box::new(NotificationDispatcher::new(notifier)),
            Box::new(HelplineDispatcher::new(helpline)),
        ]);

        Self {
            deliveries: DashMap::new(),
            chain,
            accounts,
            metrics: Metrics::new(),
        }
    }
}
