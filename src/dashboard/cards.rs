//! The cycle banner and the balance cards at the top of the dashboard.

use maud::{Markup, html};

use crate::{cycle::Cycle, dashboard::summary::DashboardSummary, html::format_currency};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md flex flex-col justify-between";
const AMOUNT_POSITIVE_STYLE: &str = "text-green-600 dark:text-green-400";
const AMOUNT_NEGATIVE_STYLE: &str = "text-red-600 dark:text-red-400";

fn amount_color_class(amount: f64) -> &'static str {
    if amount >= 0.0 {
        AMOUNT_POSITIVE_STYLE
    } else {
        AMOUNT_NEGATIVE_STYLE
    }
}

/// The text shown in the cycle banner, e.g.
/// "Payment period active - Cycle 2/2024 (6 days remaining)".
pub(super) fn cycle_banner_text(cycle: &Cycle) -> String {
    if cycle.is_payment_period {
        let days = if cycle.days_remaining == 1 {
            "day"
        } else {
            "days"
        };

        format!(
            "Payment period active - Cycle {}/{} ({} {days} remaining)",
            cycle.month(),
            cycle.year(),
            cycle.days_remaining
        )
    } else {
        format!("Accumulation period - Cycle {}/{}", cycle.month(), cycle.year())
    }
}

pub(super) fn cycle_banner(cycle: &Cycle) -> Markup {
    let style = if cycle.is_payment_period {
        "w-full mb-6 p-4 rounded-lg text-sm font-medium \
        text-yellow-800 bg-yellow-50 dark:bg-gray-800 dark:text-yellow-300"
    } else {
        "w-full mb-6 p-4 rounded-lg text-sm font-medium \
        text-blue-800 bg-blue-50 dark:bg-gray-800 dark:text-blue-400"
    };

    html! {
        div id="cycle-banner" class=(style) role="status" {
            (cycle_banner_text(cycle))
        }
    }
}

fn card(id: &str, title: &str, subtitle: &str, amount: f64, amount_style: &str) -> Markup {
    html! {
        div id=(id) class=(CARD_STYLE) {
            h4 class="text-sm font-medium text-gray-600 dark:text-gray-400" { (title) }
            p class={"text-2xl font-bold " (amount_style)} {
                (format_currency(amount))
            }
            p class="text-xs text-gray-500 dark:text-gray-400" { (subtitle) }
        }
    }
}

/// Renders the savings, credit card and net balance cards.
///
/// The credit card card reads as debt to pay while the payment period is
/// active and as spending so far otherwise.
pub(super) fn balance_cards_view(summary: &DashboardSummary) -> Markup {
    let credit_card_title = if summary.cycle.is_payment_period {
        "Card debt"
    } else {
        "Card spending"
    };

    html! {
        section class="w-full mx-auto mb-8" {
            div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-4" {
                (card(
                    "savings-card",
                    "Savings",
                    "Incomes - Expenses",
                    summary.savings,
                    amount_color_class(summary.savings),
                ))
                (card(
                    "credit-card-card",
                    credit_card_title,
                    "Current cycle",
                    summary.credit_card_cycle_total,
                    AMOUNT_NEGATIVE_STYLE,
                ))
                (card(
                    "net-balance-card",
                    "Net balance",
                    "Savings - Card",
                    summary.net_balance,
                    amount_color_class(summary.net_balance),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::cycle::current_cycle;

    use super::cycle_banner_text;

    #[test]
    fn banner_during_payment_period() {
        assert_eq!(
            cycle_banner_text(&current_cycle(date!(2024 - 03 - 05))),
            "Payment period active - Cycle 2/2024 (6 days remaining)"
        );
        assert_eq!(
            cycle_banner_text(&current_cycle(date!(2024 - 01 - 10))),
            "Payment period active - Cycle 12/2023 (1 day remaining)"
        );
    }

    #[test]
    fn banner_during_accumulation_period() {
        assert_eq!(
            cycle_banner_text(&current_cycle(date!(2024 - 03 - 11))),
            "Accumulation period - Cycle 3/2024"
        );
    }
}
