//! Defines the endpoint the new record page posts its form to.

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    Error, endpoints,
    record::{
        RecordKind,
        core::create_record,
        endpoints::RecordState,
        form::{RecordFormData, instant_for_local_date},
    },
    user::UserID,
};

/// A route handler for creating a record from a form, redirects to the
/// listing of that kind on success.
///
/// Records without a date are placed at the current instant.
pub async fn create_record_form_endpoint(
    State(state): State<RecordState>,
    Extension(user_id): Extension<UserID>,
    Path(kind): Path<RecordKind>,
    Form(form): Form<RecordFormData>,
) -> Response {
    let now = state.clock.now_utc();
    let occurred_at = form
        .date
        .map_or(now, |date| instant_for_local_date(date, now, state.utc_offset));

    let new_record = match form.validate(Some(occurred_at)) {
        Ok(new_record) => new_record,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = create_record(user_id, kind, new_record, &connection) {
        tracing::error!("could not create record: {error}");
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::records_view(kind).to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
