//! Table views for dashboard data display.
//!
//! Provides HTML tables for the category breakdowns and the latest records.

use maud::{Markup, html};
use time::UtcOffset;

use crate::{
    dashboard::aggregation::CategoryTotal,
    html::{LINK_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
    record::Record,
    timezone::format_local_date,
};

const TABLE_STYLE: &str = "w-full text-sm text-left text-gray-500 dark:text-gray-400";
const TABLE_AMOUNT_CELL_STYLE: &str = "px-6 py-4 text-right whitespace-nowrap";
const TABLE_TOTAL_ROW_STYLE: &str =
    "font-semibold text-gray-900 bg-gray-50 dark:bg-gray-700 dark:text-white";

/// Renders the totals per category with a final row for the sum.
///
/// Categories with nothing recorded are left out.
pub(super) fn category_totals_table(title: &str, totals: &[CategoryTotal], sum: f64) -> Markup {
    html! {
        div {
            h3 class="text-xl font-semibold mb-4" { (title) }

            div class="overflow-x-auto rounded-lg shadow" {
                table class=(TABLE_STYLE) {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_AMOUNT_CELL_STYLE) { "Amount" }
                        }
                    }
                    tbody {
                        @for total in totals.iter().filter(|total| total.total != 0.0) {
                            tr class=(TABLE_ROW_STYLE) {
                                th scope="row" class=(TABLE_CELL_STYLE) { (total.category) }
                                td class=(TABLE_AMOUNT_CELL_STYLE) { (format_currency(total.total)) }
                            }
                        }

                        tr class=(TABLE_TOTAL_ROW_STYLE) {
                            th scope="row" class=(TABLE_CELL_STYLE) { "Total" }
                            td class=(TABLE_AMOUNT_CELL_STYLE) { (format_currency(sum)) }
                        }
                    }
                }
            }
        }
    }
}

/// Renders the given records with their local date, name, category and amount,
/// plus a link to the page listing all of them.
pub(super) fn recent_records_table(
    title: &str,
    records: &[Record],
    view_all_url: &str,
    offset: UtcOffset,
) -> Markup {
    html! {
        div {
            div class="flex items-baseline justify-between mb-4" {
                h3 class="text-xl font-semibold" { (title) }
                a href=(view_all_url) class=(LINK_STYLE) { "View all" }
            }

            div class="overflow-x-auto rounded-lg shadow" {
                table class=(TABLE_STYLE) {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_AMOUNT_CELL_STYLE) { "Amount" }
                        }
                    }
                    tbody {
                        @if records.is_empty() {
                            tr class=(TABLE_ROW_STYLE) {
                                td colspan="4" class={(TABLE_CELL_STYLE) " text-center"} {
                                    "Nothing recorded yet."
                                }
                            }
                        }

                        @for record in records {
                            tr class=(TABLE_ROW_STYLE) {
                                td class={(TABLE_CELL_STYLE) " whitespace-nowrap"} {
                                    (format_record_date(record, offset))
                                }
                                td class=(TABLE_CELL_STYLE) { (record.name) }
                                td class=(TABLE_CELL_STYLE) {
                                    (record.category.as_deref().unwrap_or("-"))
                                }
                                td class=(TABLE_AMOUNT_CELL_STYLE) {
                                    (format_currency(record.amount))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn format_record_date(record: &Record, offset: UtcOffset) -> String {
    record
        .occurred_at
        .map_or_else(|| "-".to_owned(), |instant| format_local_date(instant, offset))
}
