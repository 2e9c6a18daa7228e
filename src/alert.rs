//! Alert messages shown at the bottom of the page after htmx requests.
//!
//! Forms send their errors to `#alert-container` via `hx-target-error`.
//! Success alerts swap themselves into the container out-of-band, so they
//! still show up when the main target of the request is something else,
//! e.g. a table row that is being deleted.

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

/// A success or error message with optional details.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    SuccessSimple { message: String },
    Error { message: String, details: String },
}

impl Alert {
    fn into_html(self) -> Markup {
        let (is_success, message, details) = match self {
            Alert::SuccessSimple { message } => (true, message, String::new()),
            Alert::Error { message, details } => (false, message, details),
        };

        let style = if is_success {
            "p-4 mb-4 text-sm text-green-800 rounded-lg bg-green-50 \
            dark:bg-gray-800 dark:text-green-400"
        } else {
            "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
            dark:bg-gray-800 dark:text-red-400"
        };

        let alert = html! {
            div class=(style) role="alert"
            {
                div class="flex items-start justify-between gap-4"
                {
                    div
                    {
                        span class="font-medium" { (message) }

                        @if !details.is_empty() {
                            p class="mt-1" { (details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Close"
                        class="font-bold"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "×"
                    }
                }
            }
        };

        if is_success {
            html! {
                div id="alert-container" hx-swap-oob="innerHTML" { (alert) }
            }
        } else {
            alert
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        Html(self.into_html().into_string()).into_response()
    }
}
