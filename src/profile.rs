//! The logged-in user's profile.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Serialize;
use time::{OffsetDateTime, UtcOffset};

use crate::{
    AppState, Error, endpoints,
    html::{FORM_CONTAINER_STYLE, base, format_currency},
    internal_server_error::InternalServerError,
    navigation::NavBar,
    timezone::format_local_date,
    user::{User, UserID, get_user_by_id},
};

/// The public view of a user. Leaves out the password hash.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub id: UserID,
    pub email: String,
    pub savings: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for Profile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            savings: user.savings,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// The state needed to look up the user's profile.
#[derive(Debug, Clone)]
pub struct ProfileState {
    pub db_connection: Arc<Mutex<Connection>>,
    /// The offset used to show the local dates of the profile.
    pub utc_offset: UtcOffset,
}

impl FromRef<AppState> for ProfileState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            utc_offset: state.utc_offset,
        }
    }
}

fn load_profile(state: &ProfileState, user_id: UserID) -> Result<Profile, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_user_by_id(user_id, &connection).map(Profile::from)
}

/// A route handler that returns the logged-in user's profile as JSON.
pub async fn get_profile_endpoint(
    State(state): State<ProfileState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<Profile>, Error> {
    load_profile(&state, user_id).map(Json)
}

fn profile_view(profile: &Profile, offset: UtcOffset) -> Markup {
    let nav_bar = NavBar::new(endpoints::PROFILE_VIEW).into_html();
    let rows = [
        ("ID", profile.id.to_string()),
        ("Email", profile.email.clone()),
        ("Savings", format_currency(profile.savings)),
        ("Member since", format_local_date(profile.created_at, offset)),
        ("Last updated", format_local_date(profile.updated_at, offset)),
    ];

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-6" { "Profile" }

            dl class="w-full divide-y divide-gray-200 dark:divide-gray-700"
            {
                @for (term, description) in rows {
                    div class="flex justify-between py-3"
                    {
                        dt class="text-gray-500 dark:text-gray-400" { (term) }
                        dd class="font-semibold" { (description) }
                    }
                }
            }
        }
    };

    base("Profile", &[], &content)
}

/// Display the logged-in user's profile.
pub async fn get_profile_page(
    State(state): State<ProfileState>,
    Extension(user_id): Extension<UserID>,
) -> Response {
    match load_profile(&state, user_id) {
        Ok(profile) => profile_view(&profile, state.utc_offset).into_response(),
        Err(error) => {
            tracing::error!("could not load the profile of user {user_id}: {error}");
            InternalServerError::default().into_response()
        }
    }
}
