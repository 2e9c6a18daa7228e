//! The numbers behind the dashboard.

use std::cmp::Reverse;

use serde::Serialize;
use time::{Date, UtcOffset};

use crate::{
    cycle::{Cycle, belongs_to_cycle, current_cycle},
    dashboard::aggregation::{CategoryTotal, aggregate_by_category, total_amount},
    record::{Record, RecordKind},
    timezone::local_date,
};

/// How many of the latest records of each kind the dashboard lists.
pub const RECENT_RECORD_COUNT: usize = 5;

/// An overview of the user's money for the current accounting cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub cycle: Cycle,
    pub total_incomes: f64,
    pub total_expenses: f64,
    /// Total incomes minus total expenses.
    pub savings: f64,
    /// Credit card charges that belong to the current cycle.
    pub credit_card_cycle_total: f64,
    /// Savings minus the credit card charges of the current cycle.
    pub net_balance: f64,
    pub incomes_by_category: Vec<CategoryTotal>,
    pub expenses_by_category: Vec<CategoryTotal>,
    pub recent_incomes: Vec<Record>,
    pub recent_expenses: Vec<Record>,
    pub recent_credit_card: Vec<Record>,
}

impl DashboardSummary {
    /// Whether there is anything to show at all.
    pub fn is_empty(&self) -> bool {
        self.recent_incomes.is_empty()
            && self.recent_expenses.is_empty()
            && self.recent_credit_card.is_empty()
    }
}

/// Summarize the user's records as of `today`.
///
/// Incomes and expenses are totalled over all time. Credit card charges only
/// count towards the cycle that is active on `today`, using their local date
/// under `offset`. Charges without a date never belong to a cycle.
pub fn build_summary(
    incomes: &[Record],
    expenses: &[Record],
    credit_card: &[Record],
    today: Date,
    offset: UtcOffset,
) -> DashboardSummary {
    let cycle = current_cycle(today);

    let total_incomes = total_amount(incomes);
    let total_expenses = total_amount(expenses);
    let savings = total_incomes - total_expenses;

    let credit_card_cycle_total = credit_card
        .iter()
        .filter(|record| {
            record.occurred_at.is_some_and(|occurred_at| {
                belongs_to_cycle(local_date(occurred_at, offset), cycle.accounting_cycle)
            })
        })
        .map(|record| record.amount)
        .sum::<f64>();

    DashboardSummary {
        cycle,
        total_incomes,
        total_expenses,
        savings,
        credit_card_cycle_total,
        net_balance: savings - credit_card_cycle_total,
        incomes_by_category: aggregate_by_category(incomes, RecordKind::Income.categories()),
        expenses_by_category: aggregate_by_category(expenses, RecordKind::Expense.categories()),
        recent_incomes: most_recent(incomes),
        recent_expenses: most_recent(expenses),
        recent_credit_card: most_recent(credit_card),
    }
}

/// The latest [RECENT_RECORD_COUNT] records, newest first. Undated records
/// come last.
fn most_recent(records: &[Record]) -> Vec<Record> {
    let mut records = records.to_vec();
    records.sort_by_key(|record| {
        (
            record.occurred_at.is_none(),
            Reverse(record.occurred_at),
            Reverse(record.id),
        )
    });
    records.truncate(RECENT_RECORD_COUNT);

    records
}

#[cfg(test)]
mod build_summary_tests {
    use time::{
        OffsetDateTime, UtcOffset,
        macros::{date, datetime, offset},
    };

    use crate::{
        cycle::AccountingCycle,
        dashboard::aggregation::{CategoryTotal, OTHER_CATEGORY},
        record::{Record, RecordKind},
    };

    use super::{RECENT_RECORD_COUNT, build_summary};

    const OFFSET: UtcOffset = offset!(-5);

    fn record(
        id: i64,
        kind: RecordKind,
        amount: f64,
        category: Option<&str>,
        occurred_at: Option<OffsetDateTime>,
    ) -> Record {
        Record {
            id,
            kind,
            name: format!("record {id}"),
            amount,
            category: category.map(str::to_owned),
            occurred_at,
        }
    }

    #[test]
    fn computes_balances() {
        let incomes = [
            record(1, RecordKind::Income, 1000.0, Some("Development"), None),
            record(2, RecordKind::Income, 50.0, Some("Taxi"), None),
        ];
        let expenses = [
            record(3, RecordKind::Expense, 200.0, Some("Food"), None),
            record(4, RecordKind::Expense, 25.5, None, None),
        ];
        let credit_card = [record(
            5,
            RecordKind::CreditCard,
            100.0,
            Some("Fuel"),
            Some(datetime!(2024-03-02 12:00 UTC)),
        )];

        let summary = build_summary(
            &incomes,
            &expenses,
            &credit_card,
            date!(2024 - 03 - 05),
            OFFSET,
        );

        assert_eq!(summary.total_incomes, 1050.0);
        assert_eq!(summary.total_expenses, 225.5);
        assert_eq!(summary.savings, 824.5);
        assert_eq!(summary.credit_card_cycle_total, 100.0);
        assert_eq!(summary.net_balance, 724.5);
    }

    #[test]
    fn payment_period_counts_charges_of_previous_month_cycle() {
        // On March 5th the active cycle is February's: Feb 11 to Mar 10.
        let credit_card = [
            record(1, RecordKind::CreditCard, 10.0, None, Some(datetime!(2024-02-11 12:00 UTC))),
            record(2, RecordKind::CreditCard, 20.0, None, Some(datetime!(2024-03-10 12:00 UTC))),
            record(3, RecordKind::CreditCard, 40.0, None, Some(datetime!(2024-03-11 12:00 UTC))),
            record(4, RecordKind::CreditCard, 80.0, None, Some(datetime!(2024-02-10 12:00 UTC))),
            record(5, RecordKind::CreditCard, 160.0, None, None),
        ];

        let summary = build_summary(&[], &[], &credit_card, date!(2024 - 03 - 05), OFFSET);

        assert_eq!(summary.cycle.accounting_cycle, AccountingCycle::new(2024, 2).unwrap());
        assert!(summary.cycle.is_payment_period);
        assert_eq!(summary.cycle.days_remaining, 6);
        assert_eq!(summary.credit_card_cycle_total, 30.0);
    }

    #[test]
    fn accumulation_period_counts_charges_of_current_month_cycle() {
        let credit_card = [
            record(1, RecordKind::CreditCard, 10.0, None, Some(datetime!(2024-03-10 12:00 UTC))),
            record(2, RecordKind::CreditCard, 20.0, None, Some(datetime!(2024-03-11 12:00 UTC))),
            record(3, RecordKind::CreditCard, 40.0, None, Some(datetime!(2024-03-20 12:00 UTC))),
        ];

        let summary = build_summary(&[], &[], &credit_card, date!(2024 - 03 - 20), OFFSET);

        assert_eq!(summary.cycle.accounting_cycle, AccountingCycle::new(2024, 3).unwrap());
        assert!(!summary.cycle.is_payment_period);
        assert_eq!(summary.cycle.days_remaining, 0);
        assert_eq!(summary.credit_card_cycle_total, 60.0);
    }

    #[test]
    fn charges_use_local_date() {
        // 03:00 UTC on March 11th is still March 10th in UTC-5.
        let credit_card = [record(
            1,
            RecordKind::CreditCard,
            10.0,
            None,
            Some(datetime!(2024-03-11 03:00 UTC)),
        )];

        let summary = build_summary(&[], &[], &credit_card, date!(2024 - 03 - 05), OFFSET);

        assert_eq!(summary.credit_card_cycle_total, 10.0);
    }

    #[test]
    fn groups_categories_with_other_last() {
        let incomes = [
            record(1, RecordKind::Income, 10.0, Some("Taxi"), None),
            record(2, RecordKind::Income, 5.0, Some("Lottery"), None),
        ];

        let summary = build_summary(&incomes, &[], &[], date!(2024 - 03 - 05), OFFSET);

        assert_eq!(
            summary.incomes_by_category.last(),
            Some(&CategoryTotal {
                category: OTHER_CATEGORY.to_owned(),
                total: 5.0
            })
        );
        assert!(
            summary
                .incomes_by_category
                .contains(&CategoryTotal {
                    category: "Taxi".to_owned(),
                    total: 10.0
                })
        );
    }

    #[test]
    fn lists_most_recent_records_first() {
        let expenses = (1..=7)
            .map(|day| {
                let occurred_at = datetime!(2024-03-01 12:00 UTC) + time::Duration::days(day);
                record(day, RecordKind::Expense, 1.0, None, Some(occurred_at))
            })
            .chain([record(8, RecordKind::Expense, 1.0, None, None)])
            .collect::<Vec<_>>();

        let summary = build_summary(&[], &expenses, &[], date!(2024 - 03 - 05), OFFSET);

        let ids = summary
            .recent_expenses
            .iter()
            .map(|record| record.id)
            .collect::<Vec<_>>();
        assert_eq!(ids.len(), RECENT_RECORD_COUNT);
        assert_eq!(ids, vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn empty_summary() {
        let summary = build_summary(&[], &[], &[], date!(2024 - 03 - 05), OFFSET);

        assert!(summary.is_empty());
        assert_eq!(summary.savings, 0.0);
        assert_eq!(summary.net_balance, 0.0);
    }
}
