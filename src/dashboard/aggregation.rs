//! Record aggregation for the dashboard and the totals endpoints.
//!
//! Provides functions to sum record amounts overall and per category.

use std::collections::HashMap;

use serde::Serialize;

use crate::record::Record;

/// The category that collects records with a missing or unknown category.
pub const OTHER_CATEGORY: &str = "Other";

/// The summed amount of the records in one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Sums record amounts per category.
///
/// Returns one entry per category in `categories`, in the same order, followed
/// by [OTHER_CATEGORY] if `categories` does not already contain it. Records
/// with no category or a category not in `categories` count towards
/// [OTHER_CATEGORY]. Categories without records have a total of zero.
///
/// The totals always add up to [total_amount] of the same records.
pub fn aggregate_by_category(records: &[Record], categories: &[&str]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::with_capacity(categories.len() + 1);
    let mut index_of: HashMap<&str, usize> = HashMap::with_capacity(categories.len() + 1);

    for &category in categories.iter().chain(std::iter::once(&OTHER_CATEGORY)) {
        if index_of.contains_key(category) {
            continue;
        }

        index_of.insert(category, totals.len());
        totals.push(CategoryTotal {
            category: category.to_owned(),
            total: 0.0,
        });
    }

    let other_index = index_of[OTHER_CATEGORY];

    for record in records {
        let index = record
            .category
            .as_deref()
            .and_then(|category| index_of.get(category).copied())
            .unwrap_or(other_index);

        totals[index].total += record.amount;
    }

    totals
}

/// Sums the amounts of all `records`, zero if there are none.
pub fn total_amount(records: &[Record]) -> f64 {
    records.iter().map(|record| record.amount).sum()
}

#[cfg(test)]
mod tests {
    use crate::record::{Record, RecordKind};

    use super::{CategoryTotal, OTHER_CATEGORY, aggregate_by_category, total_amount};

    fn record(amount: f64, category: Option<&str>) -> Record {
        Record {
            id: 0,
            kind: RecordKind::Expense,
            name: "test".to_owned(),
            amount,
            category: category.map(str::to_owned),
            occurred_at: None,
        }
    }

    fn total_for(totals: &[CategoryTotal], category: &str) -> f64 {
        totals
            .iter()
            .find(|total| total.category == category)
            .map(|total| total.total)
            .unwrap_or_else(|| panic!("no total for {category}"))
    }

    #[test]
    fn sums_known_categories() {
        let records = [
            record(10.0, Some("Food")),
            record(5.5, Some("Food")),
            record(20.0, Some("Fuel")),
        ];

        let totals = aggregate_by_category(&records, &["Food", "Fuel"]);

        assert_eq!(
            totals,
            [
                CategoryTotal {
                    category: "Food".to_owned(),
                    total: 15.5
                },
                CategoryTotal {
                    category: "Fuel".to_owned(),
                    total: 20.0
                },
                CategoryTotal {
                    category: OTHER_CATEGORY.to_owned(),
                    total: 0.0
                },
            ]
        );
    }

    #[test]
    fn folds_missing_and_unknown_categories_into_other() {
        let records = [
            record(1.0, None),
            record(2.0, Some("Holidays")),
            record(4.0, Some("Food")),
        ];

        let totals = aggregate_by_category(&records, &["Food"]);

        assert_eq!(total_for(&totals, OTHER_CATEGORY), 3.0);
        assert_eq!(total_for(&totals, "Food"), 4.0);
    }

    #[test]
    fn category_matching_is_exact() {
        let records = [record(3.0, Some("food"))];

        let totals = aggregate_by_category(&records, &["Food"]);

        assert_eq!(total_for(&totals, "Food"), 0.0);
        assert_eq!(total_for(&totals, OTHER_CATEGORY), 3.0);
    }

    #[test]
    fn does_not_duplicate_other_when_listed() {
        let records = [record(1.0, Some(OTHER_CATEGORY)), record(2.0, Some("Unknown"))];

        let totals = aggregate_by_category(&records, &["Bank", OTHER_CATEGORY, "Food"]);

        let labels: Vec<&str> = totals.iter().map(|total| total.category.as_str()).collect();
        assert_eq!(labels, ["Bank", OTHER_CATEGORY, "Food"]);
        assert_eq!(total_for(&totals, OTHER_CATEGORY), 3.0);
    }

    #[test]
    fn totals_add_up_to_total_amount() {
        let records = [
            record(12.5, Some("Bank")),
            record(7.25, Some("Food")),
            record(100.0, None),
            record(0.75, Some("Taxes")),
        ];

        let totals = aggregate_by_category(&records, &["Bank", "Food", "Fuel"]);
        let sum: f64 = totals.iter().map(|total| total.total).sum();

        assert_eq!(sum, total_amount(&records));
        assert_eq!(total_amount(&records), 120.5);
    }

    #[test]
    fn empty_input_gives_zero_totals() {
        let totals = aggregate_by_category(&[], &["Food", "Fuel"]);

        assert_eq!(totals.len(), 3);
        assert!(totals.iter().all(|total| total.total == 0.0));
        assert_eq!(total_amount(&[]), 0.0);
    }
}
