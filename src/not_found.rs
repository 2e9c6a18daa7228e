//! The response for routes that do not exist.

use axum::{
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};

use crate::{Error, html::error_view};

/// The fallback route handler.
///
/// API clients get the JSON error body, browsers get the 404 page.
pub async fn get_404_not_found(uri: Uri) -> Response {
    if uri.path() == "/api" || uri.path().starts_with("/api/") {
        Error::NotFound.into_response()
    } else {
        get_404_not_found_response()
    }
}

pub fn get_404_not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(
            error_view(
                "Not Found",
                "404",
                "Sorry, we can't find that page.",
                "Check the address or head back to the dashboard.",
            )
            .into_string(),
        ),
    )
        .into_response()
}
