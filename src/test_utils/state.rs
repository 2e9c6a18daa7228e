use std::sync::Arc;

use rusqlite::Connection;
use time::{OffsetDateTime, macros::datetime};

use crate::{
    AppState,
    clock::FixedClock,
    password::{PasswordHash, ValidatedPassword},
    record::{NewRecord, Record, RecordKind, create_record},
    timezone::DEFAULT_UTC_OFFSET,
    user::{User, UserID, create_user},
};

/// The fixed "now" of the test clock, 07:00 on the 5th of March in UTC-5.
pub(crate) const NOW: OffsetDateTime = datetime!(2024-03-05 12:00 UTC);

/// The cheapest cost bcrypt accepts, keeps tests fast.
const TEST_HASH_COST: u32 = 4;

pub(crate) fn get_test_state() -> AppState {
    get_test_state_at(NOW)
}

pub(crate) fn get_test_state_at(now: OffsetDateTime) -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");

    AppState::new(
        connection,
        "42",
        DEFAULT_UTC_OFFSET,
        Arc::new(FixedClock(now)),
    )
    .expect("Could not create app state")
}

pub(crate) fn insert_test_user(state: &AppState, email: &str, password: &str) -> User {
    let password_hash =
        PasswordHash::new(ValidatedPassword::new_unchecked(password), TEST_HASH_COST)
            .expect("Could not hash test password");
    let connection = state.db_connection.lock().unwrap();

    create_user(email, password_hash, NOW, &connection).expect("Could not create test user")
}

pub(crate) fn insert_test_record(
    state: &AppState,
    user_id: UserID,
    kind: RecordKind,
    name: &str,
    amount: f64,
    category: Option<&str>,
    occurred_at: OffsetDateTime,
) -> Record {
    let new_record = NewRecord::new(name, amount, category, Some(occurred_at))
        .expect("Could not create test record");
    let connection = state.db_connection.lock().unwrap();

    create_record(user_id, kind, new_record, &connection).expect("Could not insert test record")
}
