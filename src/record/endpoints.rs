//! The JSON API for incomes, expenses and credit card charges.
//!
//! Every route is mounted under `/api/{kind}` where `kind` is one of
//! `incomes`, `expenses` or `credit-card`.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Json,
    extract::{FromRef, Path, Query, State},
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::{
    AppState, Error,
    clock::Clock,
    dashboard::{CategoryTotal, aggregate_by_category, total_amount},
    database_id::RecordId,
    date_filter::{DateFilterQuery, filter_by_date_range},
    endpoints,
    record::{
        NewRecord, Record, RecordKind,
        core::{create_record, delete_record, get_record, get_records, update_record},
    },
    timezone::local_today,
    user::UserID,
};

/// The state needed to manage records.
#[derive(Debug, Clone)]
pub struct RecordState {
    /// The database connection for managing records.
    pub db_connection: Arc<Mutex<Connection>>,
    /// Provides "now" for default record dates and relative filters.
    pub clock: Arc<dyn Clock>,
    /// The offset used to find the local date of records.
    pub utc_offset: UtcOffset,
}

impl FromRef<AppState> for RecordState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            clock: state.clock.clone(),
            utc_offset: state.utc_offset,
        }
    }
}

/// The JSON body for creating or updating a record.
#[derive(Debug, Deserialize, Serialize)]
pub struct RecordForm {
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub category: Option<String>,
    /// RFC 3339 timestamp. Defaults to now when creating and to the stored
    /// date when updating.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub occurred_at: Option<OffsetDateTime>,
}

impl RecordForm {
    fn validate(&self, default_occurred_at: Option<OffsetDateTime>) -> Result<NewRecord, Error> {
        NewRecord::new(
            &self.name,
            self.amount,
            self.category.as_deref(),
            self.occurred_at.or(default_occurred_at),
        )
    }
}

/// The summed amounts of a listing of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordTotals {
    pub total: f64,
    pub by_category: Vec<CategoryTotal>,
}

/// Load the user's records of `kind`, narrowed down by the date filter in
/// `query` if there is one.
fn load_records(
    state: &RecordState,
    user_id: UserID,
    kind: RecordKind,
    query: DateFilterQuery,
) -> Result<Vec<Record>, Error> {
    let filter = query.into_filter()?;

    let records = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_records(user_id, kind, &connection)?
    };

    match filter {
        Some(filter) => {
            let today = local_today(state.clock.as_ref(), state.utc_offset);
            let range = filter.resolve(today)?;

            Ok(filter_by_date_range(records, range, state.utc_offset))
        }
        None => Ok(records),
    }
}

/// A route handler that lists the user's records of one kind, newest first.
pub async fn list_records_endpoint(
    State(state): State<RecordState>,
    Extension(user_id): Extension<UserID>,
    Path(kind): Path<RecordKind>,
    Query(query): Query<DateFilterQuery>,
) -> Result<Json<Vec<Record>>, Error> {
    load_records(&state, user_id, kind, query).map(Json)
}

/// A route handler that sums the user's records of one kind overall and per
/// category.
pub async fn record_totals_endpoint(
    State(state): State<RecordState>,
    Extension(user_id): Extension<UserID>,
    Path(kind): Path<RecordKind>,
    Query(query): Query<DateFilterQuery>,
) -> Result<Json<RecordTotals>, Error> {
    let records = load_records(&state, user_id, kind, query)?;

    Ok(Json(RecordTotals {
        total: total_amount(&records),
        by_category: aggregate_by_category(&records, kind.categories()),
    }))
}

/// A route handler that creates a record and responds with `201 Created`.
pub async fn create_record_endpoint(
    State(state): State<RecordState>,
    Extension(user_id): Extension<UserID>,
    Path(kind): Path<RecordKind>,
    Json(form): Json<RecordForm>,
) -> Result<Response, Error> {
    let new_record = form.validate(Some(state.clock.now_utc()))?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let record = create_record(user_id, kind, new_record, &connection)
        .inspect_err(|error| tracing::error!("could not create record: {error}"))?;

    Ok((
        StatusCode::CREATED,
        [(LOCATION, endpoints::format_record_endpoint(kind, record.id))],
        Json(record),
    )
        .into_response())
}

/// A route handler that gets one of the user's records.
pub async fn get_record_endpoint(
    State(state): State<RecordState>,
    Extension(user_id): Extension<UserID>,
    Path((kind, record_id)): Path<(RecordKind, RecordId)>,
) -> Result<Json<Record>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_record(user_id, kind, record_id, &connection).map(Json)
}

/// A route handler that replaces the fields of one of the user's records.
pub async fn update_record_endpoint(
    State(state): State<RecordState>,
    Extension(user_id): Extension<UserID>,
    Path((kind, record_id)): Path<(RecordKind, RecordId)>,
    Json(form): Json<RecordForm>,
) -> Result<Json<Record>, Error> {
    let update = form.validate(None)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    update_record(user_id, kind, record_id, update, &connection).map(Json)
}

/// A route handler that deletes one of the user's records and responds with
/// `204 No Content`.
pub async fn delete_record_endpoint(
    State(state): State<RecordState>,
    Extension(user_id): Extension<UserID>,
    Path((kind, record_id)): Path<(RecordKind, RecordId)>,
) -> Result<StatusCode, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    delete_record(user_id, kind, record_id, &connection)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Extension, Json,
        extract::{Path, Query, State},
        http::{StatusCode, header::LOCATION},
    };
    use rusqlite::Connection;
    use time::macros::{datetime, offset};

    use crate::{
        Error,
        clock::FixedClock,
        date_filter::{DateFilterQuery, FilterKind},
        db::initialize,
        password::PasswordHash,
        record::{NewRecord, RecordKind, core::create_record},
        user::{UserID, create_user},
    };

    use super::{
        RecordForm, RecordState, create_record_endpoint, delete_record_endpoint,
        get_record_endpoint, list_records_endpoint, record_totals_endpoint,
        update_record_endpoint,
    };

    fn get_test_state() -> (RecordState, UserID) {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let user = create_user(
            "test@example.com",
            PasswordHash::new_unchecked("hunter2"),
            datetime!(2024-01-01 00:00 UTC),
            &conn,
        )
        .unwrap();

        let state = RecordState {
            db_connection: Arc::new(Mutex::new(conn)),
            clock: Arc::new(FixedClock(datetime!(2024-03-12 15:00 UTC))),
            utc_offset: offset!(-5),
        };

        (state, user.id)
    }

    fn insert(state: &RecordState, user_id: UserID, kind: RecordKind, new_record: NewRecord) -> i64 {
        let connection = state.db_connection.lock().unwrap();
        create_record(user_id, kind, new_record, &connection)
            .unwrap()
            .id
    }

    fn form(name: &str, amount: f64) -> RecordForm {
        RecordForm {
            name: name.to_owned(),
            amount,
            category: Some("Food".to_owned()),
            occurred_at: None,
        }
    }

    #[tokio::test]
    async fn create_defaults_date_to_now() {
        let (state, user_id) = get_test_state();

        let response = create_record_endpoint(
            State(state.clone()),
            Extension(user_id),
            Path(RecordKind::Expense),
            Json(form("Lunch", 12.5)),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let location = response.headers().get(LOCATION).unwrap().to_str().unwrap();
        assert!(location.starts_with("/api/expenses/"), "got location {location}");

        let Json(records) = list_records_endpoint(
            State(state),
            Extension(user_id),
            Path(RecordKind::Expense),
            Query(DateFilterQuery::default()),
        )
        .await
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].occurred_at, Some(datetime!(2024-03-12 15:00 UTC)));
    }

    #[tokio::test]
    async fn create_rejects_negative_amount() {
        let (state, user_id) = get_test_state();

        let result = create_record_endpoint(
            State(state),
            Extension(user_id),
            Path(RecordKind::Income),
            Json(form("Refund", -3.0)),
        )
        .await;

        assert_eq!(result.unwrap_err(), Error::InvalidAmount(-3.0));
    }

    #[tokio::test]
    async fn list_applies_date_filter() {
        let (state, user_id) = get_test_state();
        let kind = RecordKind::CreditCard;
        insert(
            &state,
            user_id,
            kind,
            NewRecord::new("Early", 10.0, None, Some(datetime!(2024-03-05 12:00 UTC))).unwrap(),
        );
        let in_cycle = insert(
            &state,
            user_id,
            kind,
            NewRecord::new("Mid", 20.0, None, Some(datetime!(2024-03-15 12:00 UTC))).unwrap(),
        );

        let query = DateFilterQuery {
            filter: Some(FilterKind::Cycle),
            year: Some(2024),
            month: Some(3),
            ..Default::default()
        };
        let Json(records) =
            list_records_endpoint(State(state), Extension(user_id), Path(kind), Query(query))
                .await
                .unwrap();

        let ids: Vec<i64> = records.iter().map(|record| record.id).collect();
        assert_eq!(ids, [in_cycle]);
    }

    #[tokio::test]
    async fn list_rejects_incomplete_filter() {
        let (state, user_id) = get_test_state();
        let query = DateFilterQuery {
            filter: Some(FilterKind::Year),
            ..Default::default()
        };

        let result = list_records_endpoint(
            State(state),
            Extension(user_id),
            Path(RecordKind::Income),
            Query(query),
        )
        .await;

        assert!(matches!(result, Err(Error::InvalidDateFilter(_))));
    }

    #[tokio::test]
    async fn totals_group_by_category() {
        let (state, user_id) = get_test_state();
        let kind = RecordKind::Income;
        insert(&state, user_id, kind, NewRecord::new("Pocket money", 50.0, Some("Allowance"), None).unwrap());
        insert(&state, user_id, kind, NewRecord::new("Side job", 120.0, Some("Development"), None).unwrap());
        insert(&state, user_id, kind, NewRecord::new("Found", 5.0, None, None).unwrap());

        let Json(totals) = record_totals_endpoint(
            State(state),
            Extension(user_id),
            Path(kind),
            Query(DateFilterQuery::default()),
        )
        .await
        .unwrap();

        assert_eq!(totals.total, 175.0);
        let by_category: Vec<(&str, f64)> = totals
            .by_category
            .iter()
            .map(|total| (total.category.as_str(), total.total))
            .collect();
        assert_eq!(
            by_category,
            [
                ("Allowance", 50.0),
                ("Chores", 0.0),
                ("Development", 120.0),
                ("Taxi", 0.0),
                ("Other", 5.0),
            ]
        );
    }

    #[tokio::test]
    async fn get_update_and_delete_record() {
        let (state, user_id) = get_test_state();
        let kind = RecordKind::Expense;
        let id = insert(&state, user_id, kind, NewRecord::new("Lunch", 10.0, None, None).unwrap());

        let Json(record) = get_record_endpoint(State(state.clone()), Extension(user_id), Path((kind, id)))
            .await
            .unwrap();
        assert_eq!(record.name, "Lunch");

        let Json(updated) = update_record_endpoint(
            State(state.clone()),
            Extension(user_id),
            Path((kind, id)),
            Json(form("Dinner", 30.0)),
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "Dinner");
        assert_eq!(updated.amount, 30.0);

        let status = delete_record_endpoint(State(state.clone()), Extension(user_id), Path((kind, id)))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let result = get_record_endpoint(State(state), Extension(user_id), Path((kind, id))).await;
        assert_eq!(result.unwrap_err(), Error::NotFound);
    }

    #[tokio::test]
    async fn cannot_touch_records_of_another_kind() {
        let (state, user_id) = get_test_state();
        let id = insert(&state, user_id, RecordKind::Income, NewRecord::new("Salary", 10.0, None, None).unwrap());

        let result = delete_record_endpoint(
            State(state),
            Extension(user_id),
            Path((RecordKind::Expense, id)),
        )
        .await;

        assert_eq!(result.unwrap_err(), Error::DeleteMissingRecord);
    }

    #[tokio::test]
    async fn update_missing_record_fails() {
        let (state, user_id) = get_test_state();

        let result = update_record_endpoint(
            State(state),
            Extension(user_id),
            Path((RecordKind::Expense, 404)),
            Json(form("Nothing", 1.0)),
        )
        .await;

        assert_eq!(result.unwrap_err(), Error::UpdateMissingRecord);
    }
}
