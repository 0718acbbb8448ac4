//! Alerts for displaying error messages to users.
//!
//! Alerts are rendered as HTML fragments that htmx swaps into the
//! `#alert-container` element defined in the base page layout.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

/// An error message with details on how the user can fix it.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    /// A short summary of what went wrong.
    pub message: String,
    /// Extra details, may be empty.
    pub details: String,
}

impl Alert {
    /// Create a new alert.
    pub fn error(message: &str, details: &str) -> Self {
        Self {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Render the alert as HTML.
    pub fn into_html(self) -> Markup {
        html!(
            div
                role="alert"
                class="flex items-start p-4 mb-4 text-sm text-red-800 border border-red-300
                    rounded-lg bg-red-50 dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
            {
                div class="flex-1"
                {
                    p class="font-medium" { (self.message) }

                    @if !self.details.is_empty() {
                        span class="block mt-1" { (self.details) }
                    }
                }

                button
                    type="button"
                    class="ms-3 font-bold"
                    aria-label="Close"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "×"
                }
            }
        )
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(self.into_html().into_string()),
        )
            .into_response()
    }
}
