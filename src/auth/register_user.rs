//! The registration page for creating an account.
use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    AppState, Error,
    auth::set_auth_cookie,
    clock::Clock,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base, email_input,
        loading_spinner, log_in_register, password_input,
    },
    password::{PasswordHash, ValidatedPassword},
    user::{create_user, normalize_email},
};

/// The minimum number of characters the password should have to be considered valid on the client side (server-side validation is done on top of this validation).
const PASSWORD_INPUT_MIN_LENGTH: u8 = 14;

pub const DUPLICATE_EMAIL_ERROR_MSG: &str =
    "An account with this email already exists, log in instead.";
const INTERNAL_ERROR_MSG: &str = "An internal error occurred. Please try again later.";

fn confirm_password_input(min_length: u8, error_message: Option<&str>) -> Markup {
    html! {
        div
        {
            label
                for="confirm-password"
                class=(FORM_LABEL_STYLE)
            {
                "Confirm Password"
            }

            input
                type="password"
                name="confirm_password"
                id="confirm-password"
                placeholder="••••••••"
                class=(FORM_TEXT_INPUT_STYLE)
                required
                minlength=(min_length)
                autofocus[error_message.is_some()]
            ;

            @if let Some(error_message) = error_message
            {
                p class="text-red-500 text-base" { (error_message) }
            }
        }

    }
}

/// Error messages to show next to the registration form fields.
#[derive(Default)]
struct FormErrors<'a> {
    email: Option<&'a str>,
    password: Option<&'a str>,
    confirm_password: Option<&'a str>,
}

fn registration_form(email: &str, password: &str, errors: FormErrors<'_>) -> Markup {
    html! {
        form
            hx-post=(endpoints::USERS)
            hx-indicator="#indicator"
            hx-disabled-elt="#email, #password, #confirm-password, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            (email_input(email, errors.email))
            (password_input(password, PASSWORD_INPUT_MIN_LENGTH, errors.password))
            (confirm_password_input(PASSWORD_INPUT_MIN_LENGTH, errors.confirm_password))

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Create Account"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Already have an account? "

                a
                    href=(endpoints::LOG_IN_VIEW) tabindex="0"
                    class="font-semibold leading-6 text-blue-600 hover:text-blue-500 dark:text-blue-500 dark:hover:text-blue-400"
                {
                  "Log in here"
                }
            }
        }
    }
}

/// Display the registration page.
pub async fn get_register_page() -> Response {
    let registration_form = registration_form("", "", FormErrors::default());
    let content = log_in_register("Create Account", &registration_form);
    base("Register", &[], &content).into_response()
}

/// The state needed for creating a new user.
#[derive(Debug, Clone)]
pub struct RegistrationState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    /// Timestamps the new account and its first session.
    pub clock: Arc<dyn Clock>,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RegistrationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            clock: state.clock.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<RegistrationState> for Key {
    fn from_ref(state: &RegistrationState) -> Self {
        state.cookie_key.clone()
    }
}

#[derive(Serialize, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Handler for registering a new user via the POST method.
///
/// On success the user is logged in and redirected to the dashboard.
/// Otherwise the form is returned with an error message next to the field
/// that needs fixing.
pub async fn register_user(
    State(state): State<RegistrationState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<RegisterForm>,
) -> Response {
    let render_error = |errors: FormErrors<'_>| {
        registration_form(&user_data.email, &user_data.password, errors).into_response()
    };

    let email = match normalize_email(&user_data.email) {
        Ok(email) => email,
        Err(error) => {
            return render_error(FormErrors {
                email: Some(&error.to_string()),
                ..Default::default()
            });
        }
    };

    let validated_password = match ValidatedPassword::confirm(
        &user_data.password,
        &user_data.confirm_password,
        &[&email],
    ) {
        Ok(password) => password,
        Err(Error::PasswordMismatch) => {
            return render_error(FormErrors {
                confirm_password: Some("Passwords do not match"),
                ..Default::default()
            });
        }
        Err(error) => {
            return render_error(FormErrors {
                password: Some(&error.to_string()),
                ..Default::default()
            });
        }
    };

    let password_hash = match PasswordHash::new(validated_password, PasswordHash::DEFAULT_COST) {
        Ok(hash) => hash,
        Err(error) => {
            tracing::error!("an error occurred while hashing a password: {error}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                render_error(FormErrors {
                    password: Some(INTERNAL_ERROR_MSG),
                    ..Default::default()
                }),
            )
                .into_response();
        }
    };

    let now = state.clock.now_utc();
    let user = match state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
        .and_then(|connection| create_user(&email, password_hash, now, &connection))
    {
        Ok(user) => user,
        Err(Error::DuplicateEmail) => {
            return render_error(FormErrors {
                email: Some(DUPLICATE_EMAIL_ERROR_MSG),
                ..Default::default()
            });
        }
        Err(error) => {
            tracing::error!("An unhandled error occurred while inserting a new user: {error}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                render_error(FormErrors {
                    email: Some(INTERNAL_ERROR_MSG),
                    ..Default::default()
                }),
            )
                .into_response();
        }
    };

    tracing::info!("Registered user {}", user.id);

    match set_auth_cookie(jar, user.id, state.cookie_duration, now) {
        Ok(jar) => (
            StatusCode::SEE_OTHER,
            HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
            jar,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An error occurred while setting the auth cookie: {error}");
            (
                StatusCode::SEE_OTHER,
                HxRedirect(endpoints::LOG_IN_VIEW.to_owned()),
                (),
            )
                .into_response()
        }
    }
}
