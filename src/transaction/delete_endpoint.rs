//! Defines the endpoint for deleting a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use axum_htmx::HxRedirect;

use crate::{
    AppState, Error,
    app_state::lock_store,
    transaction::{TransactionId, TransactionStore, edit_endpoint::RedirectQuery},
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The store holding the transaction to delete.
    pub store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// A route handler for deleting a transaction.
///
/// The client asks the user for confirmation before sending the request. On
/// success, redirects to `redirect_url` so the page is rendered without the
/// deleted transaction.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Query(query): Query<RedirectQuery>,
) -> Response {
    let result = lock_store(&state.store).and_then(|mut store| store.delete(transaction_id));

    match result {
        Ok(0) => {
            tracing::warn!("Could not delete transaction {transaction_id}: it does not exist");
            Error::DeleteMissingTransaction.into_alert_response()
        }
        Ok(_) => {
            tracing::info!("Deleted transaction {transaction_id}");
            (HxRedirect(query.redirect_url()), StatusCode::SEE_OTHER).into_response()
        }
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}
