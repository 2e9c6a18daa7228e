//! Incomes, expenses and credit card charges.
//!
//! This module contains everything related to records:
//! - The `Record` model, its kinds and categories
//! - Database functions for storing, querying, and managing records
//! - The JSON API handlers for records
//! - The pages and htmx form handlers for listing, creating, editing and
//!   deleting records

mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod endpoints;
mod form;
mod kind;
mod records_page;

pub use self::core::{NewRecord, Record, create_record_table, get_records};
pub use endpoints::{
    create_record_endpoint, delete_record_endpoint, get_record_endpoint, list_records_endpoint,
    record_totals_endpoint, update_record_endpoint,
};
pub use create_endpoint::create_record_form_endpoint;
pub use create_page::get_new_record_page;
pub use delete_endpoint::delete_record_form_endpoint;
pub use edit_endpoint::update_record_form_endpoint;
pub use edit_page::get_edit_record_page;
pub use kind::RecordKind;
pub use records_page::get_records_page;

#[cfg(test)]
pub use self::core::create_record;
