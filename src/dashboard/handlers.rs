//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - Route handlers for the dashboard page and its JSON summary
//! - HTML view functions for rendering the dashboard UI
//! - The state used by the handlers

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::UtcOffset;

use crate::{
    AppState, Error,
    clock::Clock,
    dashboard::{
        cards::{balance_cards_view, cycle_banner},
        charts::{DashboardChart, category_chart, charts_script, charts_view},
        summary::{DashboardSummary, build_summary},
        tables::{category_totals_table, recent_records_table},
    },
    endpoints,
    html::{HeadElement, base},
    internal_server_error::InternalServerError,
    navigation::NavBar,
    record::{RecordKind, get_records},
    timezone::local_today,
    user::UserID,
};

/// The state needed for displaying the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading records.
    pub db_connection: Arc<Mutex<Connection>>,
    /// Provides today's date for picking the active accounting cycle.
    pub clock: Arc<dyn Clock>,
    /// The offset used to find the local date of records.
    pub utc_offset: UtcOffset,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            clock: state.clock.clone(),
            utc_offset: state.utc_offset,
        }
    }
}

/// Load the user's records and summarize them as of today.
fn load_summary(state: &DashboardState, user_id: UserID) -> Result<DashboardSummary, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let incomes = get_records(user_id, RecordKind::Income, &connection)
        .inspect_err(|error| tracing::error!("could not get incomes: {error}"))?;
    let expenses = get_records(user_id, RecordKind::Expense, &connection)
        .inspect_err(|error| tracing::error!("could not get expenses: {error}"))?;
    let credit_card = get_records(user_id, RecordKind::CreditCard, &connection)
        .inspect_err(|error| tracing::error!("could not get credit card charges: {error}"))?;

    let today = local_today(state.clock.as_ref(), state.utc_offset);

    Ok(build_summary(
        &incomes,
        &expenses,
        &credit_card,
        today,
        state.utc_offset,
    ))
}

/// A route handler that returns the dashboard summary as JSON.
pub async fn get_dashboard_summary(
    State(state): State<DashboardState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<DashboardSummary>, Error> {
    load_summary(&state, user_id).map(Json)
}

/// Display a page with an overview of the user's money.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Extension(user_id): Extension<UserID>,
) -> Response {
    let summary = match load_summary(&state, user_id) {
        Ok(summary) => summary,
        Err(error) => {
            tracing::error!("could not build the dashboard summary: {error}");
            return InternalServerError::default().into_response();
        }
    };

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    if summary.is_empty() {
        dashboard_no_data_view(nav_bar, &summary).into_response()
    } else {
        dashboard_view(nav_bar, &summary, state.utc_offset).into_response()
    }
}

/// Creates the category charts from the summary.
///
/// The chart options are serialized to JSON for ECharts consumption.
fn build_dashboard_charts(summary: &DashboardSummary) -> [DashboardChart; 2] {
    [
        DashboardChart {
            id: "incomes-chart",
            options: category_chart("Incomes", "By category", &summary.incomes_by_category)
                .to_string(),
        },
        DashboardChart {
            id: "expenses-chart",
            options: category_chart("Expenses", "By category", &summary.expenses_by_category)
                .to_string(),
        },
    ]
}

/// Renders the dashboard page when the user has not recorded anything yet.
fn dashboard_no_data_view(nav_bar: NavBar, summary: &DashboardSummary) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            (cycle_banner(&summary.cycle))

            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Balances and charts will show up here once you record some
                incomes, expenses or credit card charges."
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// Renders the main dashboard page with the cycle banner, balance cards,
/// charts, and tables.
fn dashboard_view(nav_bar: NavBar, summary: &DashboardSummary, offset: UtcOffset) -> Markup {
    let nav_bar = nav_bar.into_html();
    let charts = build_dashboard_charts(summary);

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (cycle_banner(&summary.cycle))

            (balance_cards_view(summary))

            (charts_view(&charts))

            section id="tables" class="w-full mx-auto mb-8"
            {
                div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
                {
                    (category_totals_table(
                        "Incomes by category",
                        &summary.incomes_by_category,
                        summary.total_incomes,
                    ))
                    (category_totals_table(
                        "Expenses by category",
                        &summary.expenses_by_category,
                        summary.total_expenses,
                    ))
                    (recent_records_table(
                        "Latest incomes",
                        &summary.recent_incomes,
                        endpoints::INCOMES_VIEW,
                        offset,
                    ))
                    (recent_records_table(
                        "Latest expenses",
                        &summary.recent_expenses,
                        endpoints::EXPENSES_VIEW,
                        offset,
                    ))
                    (recent_records_table(
                        "Latest credit card charges",
                        &summary.recent_credit_card,
                        endpoints::CREDIT_CARD_VIEW,
                        offset,
                    ))
                }
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        charts_script(&charts),
    ];

    base("Dashboard", &scripts, &content)
}
