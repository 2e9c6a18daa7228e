//! Defines the route handler for the page for creating a new record.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, LINK_STYLE, base, loading_spinner},
    navigation::NavBar,
    record::{
        RecordKind,
        endpoints::RecordState,
        form::{RecordFormDefaults, record_form_fields},
    },
    timezone::local_today,
};

fn create_record_view(kind: RecordKind, today: Date) -> Markup {
    let nav_bar = NavBar::new(endpoints::records_view(kind)).into_html();
    let spinner = loading_spinner();
    let fields = record_form_fields(&RecordFormDefaults {
        kind,
        name: None,
        amount: None,
        category: None,
        date: Some(today),
        date_required: true,
    });

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(endpoints::records_view(kind))
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "New " (kind.noun()) }

                (fields)

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span id="indicator" class="inline htmx-indicator" { (spinner) }
                    " Save"
                }

                a href=(endpoints::records_view(kind)) class=(LINK_STYLE) { "Cancel" }
            }
        }
    };

    base(&format!("New {}", kind.noun()), &[], &content)
}

/// Renders the page for creating a record of one kind, dated today.
pub async fn get_new_record_page(
    State(state): State<RecordState>,
    Path(kind): Path<RecordKind>,
) -> Response {
    let today = local_today(state.clock.as_ref(), state.utc_offset);

    create_record_view(kind, today).into_response()
}

#[cfg(test)]
mod tests {
    use axum::extract::{FromRef, Path, State};
    use scraper::Selector;

    use crate::{
        endpoints,
        record::{RecordKind, endpoints::RecordState},
        test_utils::{
            assert_content_type, assert_form_input, assert_form_submit_button_with_text,
            assert_hx_endpoint, assert_status_ok, assert_valid_html, get_test_state,
            must_get_form, parse_html_document,
        },
    };

    use super::get_new_record_page;

    #[tokio::test]
    async fn new_record_page_returns_form() {
        let state = RecordState::from_ref(&get_test_state());

        let response = get_new_record_page(State(state), Path(RecordKind::Expense)).await;

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");
        let document = parse_html_document(response).await;
        assert_valid_html(&document);

        let form = must_get_form(&document);
        assert_hx_endpoint(&form, endpoints::EXPENSES_VIEW, "hx-post");
        assert_hx_endpoint(&form, "#alert-container", "hx-target-error");
        assert_form_input(&form, "name", "text");
        assert_form_input(&form, "amount", "number");
        assert_form_input(&form, "date", "date");
        assert_form_submit_button_with_text(&form, "Save");
    }

    #[tokio::test]
    async fn date_defaults_to_local_today() {
        // The test clock reads 12:00 UTC on the 5th, which is the 5th in UTC-5.
        let state = RecordState::from_ref(&get_test_state());

        let response = get_new_record_page(State(state), Path(RecordKind::Income)).await;

        let document = parse_html_document(response).await;
        let date = document
            .select(&Selector::parse("input[name=date]").unwrap())
            .next()
            .expect("No date input");
        assert_eq!(date.value().attr("value"), Some("2024-03-05"));
    }
}
