//! Dashboard module
//!
//! Provides an overview page and a JSON summary of the user's balances, the
//! active accounting cycle, and their records grouped by category.

mod aggregation;
mod cards;
mod charts;
mod handlers;
mod summary;
mod tables;

pub use aggregation::{CategoryTotal, aggregate_by_category, total_amount};
pub use handlers::{get_dashboard_page, get_dashboard_summary};
