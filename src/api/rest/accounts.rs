use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::routing::get;
use serde::Serialize;
use uuid::Uuid;

use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/accounts/:id/type", get(get_account_type))
}

#[derive(Serialize)]
struct AccountTypeView {
    user_id: Uuid,
    account_type: String,
}

/// Pass-through to the account service. The lookup never fails; an
/// unreachable service shows up as the `in-existent` sentinel.
async fn get_account_type(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Json<AccountTypeView> {
    let account_type = state.accounts.account_type(id).await;
    Json(AccountTypeView {
        user_id: id,
        account_type,
    })
}
