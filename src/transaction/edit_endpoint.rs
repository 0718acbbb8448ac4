//! Defines the endpoint for saving the inline edit of a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{Form, Query};
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{
    AppState, Error,
    app_state::lock_store,
    endpoints,
    transaction::{TransactionId, TransactionStore, form::TransactionForm},
};

/// The state needed to edit a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    /// The store holding the transaction to edit.
    pub store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Where to send the client after a change has been saved.
#[derive(Debug, Default, Deserialize)]
pub struct RedirectQuery {
    pub redirect_url: Option<String>,
}

impl RedirectQuery {
    /// The requested redirect URL if it is a path on this site, otherwise the transactions view.
    pub fn redirect_url(self) -> String {
        match self.redirect_url {
            Some(url) if url.starts_with('/') && !url.starts_with("//") => url,
            _ => endpoints::TRANSACTIONS_VIEW.to_owned(),
        }
    }
}

/// A route handler for replacing the fields of a transaction.
///
/// On success, redirects to `redirect_url`.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Query(query): Query<RedirectQuery>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let builder = match form.into_builder() {
        Ok(builder) => builder,
        Err(error) => {
            tracing::warn!("Rejected edit of transaction {transaction_id}: {error}");
            return error.into_alert_response();
        }
    };

    let result = lock_store(&state.store).and_then(|mut store| store.update(transaction_id, builder));

    match result {
        Ok(0) => {
            tracing::warn!("Could not update transaction {transaction_id}: it does not exist");
            return Error::UpdateMissingTransaction.into_alert_response();
        }
        Ok(_) => tracing::info!("Updated transaction {transaction_id}"),
        Err(error) => {
            tracing::error!("Could not update transaction {transaction_id}: {error}");
            return error.into_alert_response();
        }
    }

    (HxRedirect(query.redirect_url()), StatusCode::SEE_OTHER).into_response()
}
