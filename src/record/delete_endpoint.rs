use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    alert::Alert,
    database_id::RecordId,
    record::{RecordKind, core::delete_record, endpoints::RecordState},
    user::UserID,
};

/// A route handler for deleting a record from the records page, responds
/// with an alert.
pub async fn delete_record_form_endpoint(
    State(state): State<RecordState>,
    Extension(user_id): Extension<UserID>,
    Path((kind, record_id)): Path<(RecordKind, RecordId)>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_record(user_id, kind, record_id, &connection) {
        // The status code has to be 200 OK or HTMX will not delete the table row.
        Ok(()) => Alert::SuccessSimple {
            message: format!("Deleted the {}", kind.noun()),
        }
        .into_response(),
        Err(error) => {
            tracing::error!("Could not delete record {record_id}: {error}");
            error.into_alert_response()
        }
    }
}
