//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    AppState,
    app_state::lock_store,
    month::YearMonth,
    transaction::{TransactionStore, form::TransactionForm, transactions_page::TransactionsQuery},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The store that the new transaction is added to.
    pub store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// A route handler for creating a new transaction.
///
/// On success, redirects to the transactions view for the month of the new transaction.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let builder = match form.into_builder() {
        Ok(builder) => builder,
        Err(error) => {
            tracing::warn!("Rejected new transaction: {error}");
            return error.into_alert_response();
        }
    };

    let transaction = {
        let mut store = match lock_store(&state.store) {
            Ok(store) => store,
            Err(error) => return error.into_alert_response(),
        };

        match store.create(builder) {
            Ok(transaction) => transaction,
            Err(error) => {
                tracing::error!("could not create transaction: {error}");
                return error.into_alert_response();
            }
        }
    };

    tracing::info!("Created transaction {}", transaction.id);

    let redirect_url = TransactionsQuery {
        month: Some(YearMonth::of(transaction.date)),
        edit: None,
    }
    .to_url();

    (HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response()
}
