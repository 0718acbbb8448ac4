//! Defines the templates and route handlers for the page to display for an internal server error.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use maud::Markup;

use crate::html::error_view;

/// The details shown on the 500 page.
pub struct InternalServerError {
    pub description: String,
    pub fix: String,
}

impl Default for InternalServerError {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.".to_owned(),
            fix: "Try again later or check the server logs".to_owned(),
        }
    }
}

impl InternalServerError {
    /// The error page for a server started with a timezone that does not exist.
    pub fn invalid_timezone(timezone: &str) -> Self {
        Self {
            description: "Invalid Timezone Settings".to_owned(),
            fix: format!(
                "Could not get local timezone \"{timezone}\". Check your server settings and \
                ensure the timezone has been set to valid, canonical timezone string"
            ),
        }
    }

    pub fn into_html(self) -> Markup {
        error_view("Internal Server Error", "500", &self.description, &self.fix)
    }
}

impl IntoResponse for InternalServerError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Html(self.into_html().into_string())).into_response()
    }
}

pub async fn get_internal_server_error_page() -> Response {
    InternalServerError::default().into_response()
}
