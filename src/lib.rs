//! MoneyBuddy is a small web app for tracking personal income and expenses.
//!
//! This library provides a web server that directly serves HTML pages. All
//! transactions are held in memory by a [TransactionStore] and mirrored to a
//! single key in durable [Storage] after every change.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod dashboard;
mod endpoints;
mod html;
mod internal_server_error;
mod month;
mod navigation;
mod not_found;
mod routing;
mod storage;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use month::YearMonth;
pub use routing::build_router;
pub use storage::{SQLiteStorage, Storage};
pub use timezone::get_local_offset;
pub use transaction::{
    CategoryName, Transaction, TransactionBuilder, TransactionId, TransactionStore,
    TransactionType,
};

use crate::{alert::Alert, internal_server_error::InternalServerError};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The amount for a transaction was not a finite, non-negative number.
    #[error("{0} is not a valid amount, amounts must be a number of zero or more")]
    InvalidAmount(f64),

    /// An empty string was used as a category name.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// A string could not be parsed as a year and month in the format `YYYY-MM`.
    #[error("\"{0}\" is not a valid month, expected the format YYYY-MM")]
    InvalidMonth(String),

    /// The transactions held in storage could not be read back.
    ///
    /// The store recovers from this error by starting with no transactions,
    /// so it should only ever be logged.
    #[error("the stored transactions are malformed: {0}")]
    MalformedTransactions(String),

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the store")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the store")]
    DeleteMissingTransaction,

    /// The durable storage could not be read from or written to.
    #[error("could not access storage: {0}")]
    StorageError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// Could not acquire the lock for the transaction store.
    #[error("could not acquire the transaction store lock")]
    StoreLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JSONSerializationError(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidTimezoneError(timezone) => {
                InternalServerError::invalid_timezone(&timezone).into_response()
            }
            Error::StoreLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidAmount(amount) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid amount",
                    &format!("{amount} is not a valid amount. Enter a number that is zero or more."),
                ),
            ),
            Error::EmptyCategoryName => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid category",
                    "Category cannot be empty. Pick a category from the list or type your own.",
                ),
            ),
            Error::InvalidMonth(month) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid month",
                    &format!("\"{month}\" is not a month, expected the format YYYY-MM."),
                ),
            ),
            Error::UpdateMissingTransaction => (
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not update transaction",
                    "The transaction could not be found.",
                ),
            ),
            Error::DeleteMissingTransaction => (
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not delete transaction",
                    "The transaction could not be found. \
                    Try refreshing the page to see if the transaction has already been deleted.",
                ),
            ),
            Error::StorageError(_) | Error::SqlError(_) | Error::JSONSerializationError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error(
                    "Could not save changes",
                    "Your changes could not be written to storage and have not been applied. \
                    Try again or check the server logs.",
                ),
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error(
                    "Invalid Timezone Settings",
                    &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                        ensure the timezone has been set to valid, canonical timezone string"
                    ),
                ),
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::error(
                        "Something went wrong",
                        "An unexpected error occurred, check the server logs for more details.",
                    ),
                )
            }
        };

        (status_code, alert).into_response()
    }
}
