//! The API endpoints URIs.
//!
//! Record endpoints take the record kind as their first parameter, e.g.
//! `/api/{kind}/{record_id}`. Use [format_record_endpoint] and the other
//! `format_*` functions to fill them in.

use crate::{database_id::RecordId, record::RecordKind};

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The landing page for logged in users.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The route for getting the registration page.
pub const REGISTER_VIEW: &str = "/register";
/// The route for getting the log in page.
pub const LOG_IN_VIEW: &str = "/log_in";
/// The route for static files.
pub const STATIC: &str = "/static";
/// The page showing the logged in user's profile.
pub const PROFILE_VIEW: &str = "/profile";
/// The page listing all records of one kind. Forms also post new records here.
pub const RECORDS_VIEW: &str = "/records/{kind}";
/// The page listing all incomes.
pub const INCOMES_VIEW: &str = "/records/incomes";
/// The page listing all expenses.
pub const EXPENSES_VIEW: &str = "/records/expenses";
/// The page listing all credit card charges.
pub const CREDIT_CARD_VIEW: &str = "/records/credit-card";
/// The page for creating a record.
pub const NEW_RECORD_VIEW: &str = "/records/{kind}/new";
/// The route forms use to update or delete a record.
pub const RECORD_VIEW: &str = "/records/{kind}/{record_id}";
/// The page for editing a record.
pub const EDIT_RECORD_VIEW: &str = "/records/{kind}/{record_id}/edit";

/// The route for logging in a user.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/api/log_out";
/// The route to register users.
pub const USERS: &str = "/api/users";
/// The route for the logged in user's profile.
pub const PROFILE_API: &str = "/api/profile";
/// The route for the dashboard summary as JSON.
pub const DASHBOARD_API: &str = "/api/dashboard";
/// The route to list and create records of one kind.
pub const RECORDS_API: &str = "/api/{kind}";
/// The route for the totals of records of one kind.
pub const RECORD_TOTALS_API: &str = "/api/{kind}/totals";
/// The route to access a single record.
pub const RECORD_API: &str = "/api/{kind}/{record_id}";

/// The URI of the record with `id`, e.g. `/api/credit-card/3`.
pub fn format_record_endpoint(kind: RecordKind, id: RecordId) -> String {
    format!("/api/{}/{id}", kind.path_segment())
}

/// The URI listing records of `kind`, e.g. `/api/incomes`.
pub fn format_records_endpoint(kind: RecordKind) -> String {
    format!("/api/{}", kind.path_segment())
}

/// The page listing records of `kind`, e.g. `/records/incomes`.
pub fn records_view(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Income => INCOMES_VIEW,
        RecordKind::Expense => EXPENSES_VIEW,
        RecordKind::CreditCard => CREDIT_CARD_VIEW,
    }
}

/// The page for creating a record of `kind`, e.g. `/records/expenses/new`.
pub fn format_new_record_view(kind: RecordKind) -> String {
    format!("{}/new", records_view(kind))
}

/// The route for updating or deleting the record with `id` from a page.
pub fn format_record_view(kind: RecordKind, id: RecordId) -> String {
    format!("{}/{id}", records_view(kind))
}

/// The page for editing the record with `id`, e.g. `/records/incomes/3/edit`.
pub fn format_edit_record_view(kind: RecordKind, id: RecordId) -> String {
    format!("{}/{id}/edit", records_view(kind))
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::{endpoints, record::RecordKind};

    use super::{
        format_edit_record_view, format_new_record_view, format_record_endpoint,
        format_record_view, format_records_endpoint, records_view,
    };

    #[track_caller]
    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok(), "{uri} is not a valid URI");
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_VIEW);
        assert_endpoint_is_valid_uri(endpoints::REGISTER_VIEW);
        assert_endpoint_is_valid_uri(endpoints::LOG_IN_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STATIC);
        assert_endpoint_is_valid_uri(endpoints::PROFILE_VIEW);
        assert_endpoint_is_valid_uri(endpoints::RECORDS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::NEW_RECORD_VIEW);
        assert_endpoint_is_valid_uri(endpoints::RECORD_VIEW);
        assert_endpoint_is_valid_uri(endpoints::EDIT_RECORD_VIEW);

        assert_endpoint_is_valid_uri(endpoints::LOG_IN_API);
        assert_endpoint_is_valid_uri(endpoints::LOG_OUT);
        assert_endpoint_is_valid_uri(endpoints::USERS);
        assert_endpoint_is_valid_uri(endpoints::PROFILE_API);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_API);
        assert_endpoint_is_valid_uri(endpoints::RECORDS_API);
        assert_endpoint_is_valid_uri(endpoints::RECORD_TOTALS_API);
        assert_endpoint_is_valid_uri(endpoints::RECORD_API);
    }

    #[test]
    fn formats_record_endpoints() {
        for kind in RecordKind::ALL {
            let records = format_records_endpoint(kind);
            let record = format_record_endpoint(kind, 7);

            assert_endpoint_is_valid_uri(&records);
            assert_endpoint_is_valid_uri(&record);
            assert_eq!(record, format!("{records}/7"));
        }

        assert_eq!(format_record_endpoint(RecordKind::CreditCard, 3), "/api/credit-card/3");
    }

    #[test]
    fn formats_record_views() {
        for kind in RecordKind::ALL {
            let records = records_view(kind);

            assert_eq!(records, format!("/records/{}", kind.path_segment()));
            assert_endpoint_is_valid_uri(&format_new_record_view(kind));
            assert_endpoint_is_valid_uri(&format_record_view(kind, 7));
            assert_endpoint_is_valid_uri(&format_edit_record_view(kind, 7));
        }

        assert_eq!(format_new_record_view(RecordKind::Expense), "/records/expenses/new");
        assert_eq!(format_record_view(RecordKind::Income, 3), "/records/incomes/3");
        assert_eq!(
            format_edit_record_view(RecordKind::CreditCard, 3),
            "/records/credit-card/3/edit"
        );
    }
}
