//! The page listing every record of one kind with links to manage them.

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    dashboard::total_amount,
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
    },
    internal_server_error::InternalServerError,
    navigation::NavBar,
    record::{Record, RecordKind, endpoints::RecordState, get_records},
    timezone::format_local_date,
    user::UserID,
};

fn record_row(record: &Record, state: &RecordState) -> Markup {
    let edit_url = endpoints::format_edit_record_view(record.kind, record.id);
    let delete_url = endpoints::format_record_view(record.kind, record.id);
    let confirm_message = format!(
        "Are you sure you want to delete the {} \"{}\"? This cannot be undone.",
        record.kind.noun(),
        record.name
    );

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class={(TABLE_CELL_STYLE) " whitespace-nowrap"}
            {
                (record.occurred_at.map_or_else(
                    || "-".to_owned(),
                    |instant| format_local_date(instant, state.utc_offset),
                ))
            }
            td class=(TABLE_CELL_STYLE) { (record.name) }
            td class=(TABLE_CELL_STYLE) { (record.category.as_deref().unwrap_or("-")) }
            td class={(TABLE_CELL_STYLE) " text-right whitespace-nowrap"}
            {
                (format_currency(record.amount))
            }
            td class={(TABLE_CELL_STYLE) " whitespace-nowrap"}
            {
                div class="flex gap-4"
                {
                    a href=(edit_url) class=(LINK_STYLE) { "Edit" }

                    button
                        hx-delete=(delete_url)
                        hx-confirm=(confirm_message)
                        hx-target="closest tr"
                        hx-swap="delete"
                        hx-target-error="#alert-container"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete"
                    }
                }
            }
        }
    }
}

fn records_page_view(kind: RecordKind, records: &[Record], state: &RecordState) -> Markup {
    let nav_bar = NavBar::new(endpoints::records_view(kind)).into_html();
    let new_record_url = endpoints::format_new_record_view(kind);
    let total = total_amount(records);

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl"
            {
                div class="flex flex-wrap items-baseline justify-between gap-4 mb-4"
                {
                    h1 class="text-2xl font-bold"
                    {
                        (kind.title())
                        " "
                        span id="record-count" class="text-base font-normal text-gray-500 dark:text-gray-400"
                        {
                            "(" (records.len()) " records)"
                        }
                    }

                    p id="records-total" class="text-xl font-semibold" { (format_currency(total)) }

                    a href=(new_record_url) class=(LINK_STYLE) { "New " (kind.noun()) }
                }

                div class="overflow-x-auto rounded-lg shadow"
                {
                    table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                            }
                        }

                        tbody
                        {
                            @for record in records {
                                (record_row(record, state))
                            }

                            @if records.is_empty() {
                                tr class=(TABLE_ROW_STYLE)
                                {
                                    td colspan="5" class={(TABLE_CELL_STYLE) " text-center"}
                                    {
                                        "Nothing recorded yet. "
                                        a href=(new_record_url) class=(LINK_STYLE)
                                        {
                                            "Add your first " (kind.noun())
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base(kind.title(), &[], &content)
}

/// Display all of the user's records of one kind, newest first with undated
/// records last.
pub async fn get_records_page(
    State(state): State<RecordState>,
    Extension(user_id): Extension<UserID>,
    Path(kind): Path<RecordKind>,
) -> Response {
    let records = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
        .and_then(|connection| get_records(user_id, kind, &connection));

    match records {
        Ok(records) => records_page_view(kind, &records, &state).into_response(),
        Err(error) => {
            tracing::error!("could not get records for the records page: {error}");
            InternalServerError::default().into_response()
        }
    }
}
