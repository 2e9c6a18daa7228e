//! Defines the app level error type and its conversion into JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::alert::Alert;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user provided an email and password combination that does not match
    /// a registered user.
    #[error("incorrect email or password")]
    InvalidCredentials,

    /// The auth cookie is missing from the cookie jar in the request.
    #[error("you are not logged in")]
    CookieMissing,

    /// The auth cookie was present but its token could not be read.
    #[error("the session token is invalid")]
    InvalidToken,

    /// The token in the auth cookie has expired.
    #[error("your session has expired, please log in again")]
    ExpiredSession,

    /// The expiry date time of the auth cookie could not be formatted or
    /// calculated.
    #[error("could not set the expiry of the auth cookie: {0}")]
    InvalidDateFormat(String),

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// The password and its confirmation do not match.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The email address is not a plausible email address.
    #[error("\"{0}\" is not a valid email address")]
    InvalidEmail(String),

    /// A user with the email address is already registered.
    #[error("the email address is already registered")]
    DuplicateEmail,

    /// A record amount was negative, infinite or not a number.
    #[error("{0} is not a valid amount, amounts must be finite and not negative")]
    InvalidAmount(f64),

    /// A record was given an empty name.
    #[error("record name cannot be empty")]
    EmptyRecordName,

    /// A month number outside of 1 to 12.
    #[error("{0} is not a valid month, months must be between 1 and 12")]
    InvalidMonth(u8),

    /// A date that does not exist in the calendar or is outside of the
    /// supported range of years.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// A date filter was missing parameters or had a start after its end.
    #[error("invalid date filter: {0}")]
    InvalidDateFilter(String),

    /// A UTC offset in hours that cannot be represented.
    #[error("{0} hours is not a valid UTC offset")]
    InvalidUtcOffset(i8),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a record that does not exist or belongs to another user.
    #[error("tried to update a record that is not in the database")]
    UpdateMissingRecord,

    /// Tried to delete a record that does not exist or belongs to another user.
    #[error("tried to delete a record that is not in the database")]
    DeleteMissingRecord,

    /// An error occurred while serializing or deserializing JSON.
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    && desc.ends_with("user.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<time::error::ComponentRange> for Error {
    fn from(value: time::error::ComponentRange) -> Self {
        Error::InvalidDate(value.to_string())
    }
}

impl Error {
    /// The HTTP status code that best describes the error to a client.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidCredentials
            | Error::CookieMissing
            | Error::InvalidToken
            | Error::ExpiredSession => StatusCode::UNAUTHORIZED,
            Error::NotFound | Error::UpdateMissingRecord | Error::DeleteMissingRecord => {
                StatusCode::NOT_FOUND
            }
            Error::DuplicateEmail => StatusCode::CONFLICT,
            Error::TooWeak(_)
            | Error::PasswordMismatch
            | Error::InvalidEmail(_)
            | Error::InvalidAmount(_)
            | Error::EmptyRecordName
            | Error::InvalidMonth(_)
            | Error::InvalidDate(_)
            | Error::InvalidDateFilter(_) => StatusCode::BAD_REQUEST,
            Error::InvalidDateFormat(_)
            | Error::HashingError(_)
            | Error::InvalidUtcOffset(_)
            | Error::JSONSerializationError(_)
            | Error::DatabaseLockError
            | Error::SqlError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert, for
    /// handlers called by htmx forms and buttons.
    pub fn into_alert_response(self) -> Response {
        let status = self.status_code();

        let (message, details) = match self {
            Error::UpdateMissingRecord => (
                "Could not update record".to_owned(),
                "The record could not be found.".to_owned(),
            ),
            Error::DeleteMissingRecord => (
                "Could not delete record".to_owned(),
                "The record could not be found. \
                Try refreshing the page to see if the record has already been deleted."
                    .to_owned(),
            ),
            Error::NotFound => (
                "Record not found".to_owned(),
                "The record could not be found.".to_owned(),
            ),
            error if status == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    "Something went wrong".to_owned(),
                    "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                )
            }
            error => ("Could not save record".to_owned(), capitalize(&error.to_string())),
        };

        (status, Alert::Error { message, details }).into_response()
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            // Internal details are only meant for the server logs.
            tracing::error!("An unexpected error occurred: {}", self);
            "An unexpected error occurred, check the server logs for more details.".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
