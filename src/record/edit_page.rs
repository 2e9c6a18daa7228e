//! Defines the route handler for the page for editing a record.

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::UtcOffset;

use crate::{
    Error,
    database_id::RecordId,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, LINK_STYLE, base, loading_spinner},
    internal_server_error::InternalServerError,
    navigation::NavBar,
    not_found::get_404_not_found_response,
    record::{
        Record, RecordKind,
        core::get_record,
        endpoints::RecordState,
        form::{RecordFormDefaults, record_form_fields},
    },
    timezone::local_date,
    user::UserID,
};

fn edit_record_view(record: &Record, offset: UtcOffset) -> Markup {
    let nav_bar = NavBar::new(endpoints::records_view(record.kind)).into_html();
    let spinner = loading_spinner();
    let fields = record_form_fields(&RecordFormDefaults {
        kind: record.kind,
        name: Some(&record.name),
        amount: Some(record.amount),
        category: record.category.as_deref(),
        date: record.occurred_at.map(|instant| local_date(instant, offset)),
        date_required: record.occurred_at.is_some(),
    });

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-put=(endpoints::format_record_view(record.kind, record.id))
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Edit " (record.kind.noun()) }

                (fields)

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span id="indicator" class="inline htmx-indicator" { (spinner) }
                    " Save changes"
                }

                a href=(endpoints::records_view(record.kind)) class=(LINK_STYLE) { "Cancel" }
            }
        }
    };

    base(&format!("Edit {}", record.kind.noun()), &[], &content)
}

/// Renders the page for editing one of the user's records.
pub async fn get_edit_record_page(
    State(state): State<RecordState>,
    Extension(user_id): Extension<UserID>,
    Path((kind, record_id)): Path<(RecordKind, RecordId)>,
) -> Response {
    let record = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
        .and_then(|connection| get_record(user_id, kind, record_id, &connection));

    match record {
        Ok(record) => edit_record_view(&record, state.utc_offset).into_response(),
        Err(Error::NotFound) => get_404_not_found_response(),
        Err(error) => {
            tracing::error!("Failed to retrieve record {record_id}: {error}");
            InternalServerError::default().into_response()
        }
    }
}
