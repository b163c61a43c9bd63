use std::time::Duration;

use serde::Deserialize;
use uuid::Uuid;

/// Returned whenever the account service cannot answer. Callers treat it as
/// a valid-but-meaningless account type, not an error signal.
pub const UNKNOWN_ACCOUNT_TYPE: &str = "in-existent";

#[derive(Debug, Deserialize)]
struct AccountTypeResponse {
    account_type: String,
}

/// Account-type lookup against the user service. Never fails: any transport
/// or decode problem collapses into the sentinel.
#[derive(Clone)]
pub struct AccountClient {
    base_url: String,
    http: reqwest::Client,
}

impl AccountClient {
    pub fn new(base_url: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_default();

        Self { base_url, http }
    }

    pub async fn account_type(&self, user_id: Uuid) -> String {
        let url = format!("{}/users/{}/account-type", self.base_url, user_id);

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(user_id = %user_id, error = %err, "account lookup failed");
                return UNKNOWN_ACCOUNT_TYPE.to_string();
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                user_id = %user_id,
                status = %response.status(),
                "account lookup rejected"
            );
            return UNKNOWN_ACCOUNT_TYPE.to_string();
        }

        match response.json::<AccountTypeResponse>().await {
            Ok(body) => body.account_type,
            Err(err) => {
                tracing::warn!(user_id = %user_id, error = %err, "account lookup body invalid");
                UNKNOWN_ACCOUNT_TYPE.to_string()
            }
        }
    }
}
