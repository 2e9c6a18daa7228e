//! Defines the endpoint the edit record page sends its form to.

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    Error,
    database_id::RecordId,
    endpoints,
    record::{
        RecordKind,
        core::{get_record, update_record},
        endpoints::RecordState,
        form::{RecordFormData, instant_for_local_date},
    },
    timezone::local_date,
    user::UserID,
};

/// A route handler for updating a record from a form, redirects to the
/// listing of that kind on success.
///
/// The stored instant is kept when the local date is unchanged or left
/// empty, so editing the name of a record does not move it to midnight.
pub async fn update_record_form_endpoint(
    State(state): State<RecordState>,
    Extension(user_id): Extension<UserID>,
    Path((kind, record_id)): Path<(RecordKind, RecordId)>,
    Form(form): Form<RecordFormData>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let stored = match get_record(user_id, kind, record_id, &connection) {
        Ok(record) => record.occurred_at,
        Err(Error::NotFound) => return Error::UpdateMissingRecord.into_alert_response(),
        Err(error) => {
            tracing::error!("could not get record {record_id}: {error}");
            return error.into_alert_response();
        }
    };

    let occurred_at = match (form.date, stored) {
        (None, _) => None,
        (Some(date), Some(instant)) if local_date(instant, state.utc_offset) == date => None,
        (Some(date), _) => Some(instant_for_local_date(
            date,
            state.clock.now_utc(),
            state.utc_offset,
        )),
    };

    let update = match form.validate(occurred_at) {
        Ok(update) => update,
        Err(error) => return error.into_alert_response(),
    };

    if let Err(error) = update_record(user_id, kind, record_id, update, &connection) {
        tracing::error!("could not update record {record_id}: {error}");
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::records_view(kind).to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
