//! Defines the record model and its database queries.
//!
//! Every query is scoped by the owning user, so a user can never read or
//! change another user's records.

use rusqlite::{Connection, Row};
use serde::Serialize;
use time::{OffsetDateTime, UtcOffset};

use crate::{Error, database_id::RecordId, record::RecordKind, user::UserID};

// ============================================================================
// MODELS
// ============================================================================

/// An income, expense or credit card charge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// The ID of the record.
    pub id: RecordId,
    /// Whether the record is an income, expense or credit card charge.
    pub kind: RecordKind,
    /// A short description of the record, e.g. "Groceries".
    pub name: String,
    /// The amount of money, never negative.
    pub amount: f64,
    /// The category the record was filed under, if any.
    pub category: Option<String>,
    /// When the money moved, stored in UTC.
    #[serde(with = "time::serde::rfc3339::option")]
    pub occurred_at: Option<OffsetDateTime>,
}

/// The validated fields of a record to be created or updated.
///
/// Use [NewRecord::new] to check the fields.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    name: String,
    amount: f64,
    category: Option<String>,
    occurred_at: Option<OffsetDateTime>,
}

impl NewRecord {
    /// Validate the fields of a record.
    ///
    /// `name` and `category` are trimmed, and an empty category is treated as
    /// no category. `occurred_at` is converted to UTC.
    ///
    /// # Errors
    ///
    /// Returns an:
    /// - [Error::EmptyRecordName] if `name` is empty or only whitespace,
    /// - [Error::InvalidAmount] if `amount` is negative, infinite or NaN.
    pub fn new(
        name: &str,
        amount: f64,
        category: Option<&str>,
        occurred_at: Option<OffsetDateTime>,
    ) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            return Err(Error::EmptyRecordName);
        }

        if !amount.is_finite() || amount < 0.0 {
            return Err(Error::InvalidAmount(amount));
        }

        let category = category
            .map(str::trim)
            .filter(|category| !category.is_empty())
            .map(str::to_owned);

        Ok(Self {
            name: name.to_owned(),
            amount,
            category,
            occurred_at: occurred_at.map(|instant| instant.to_offset(UtcOffset::UTC)),
        })
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

const RECORD_COLUMNS: &str = "id, kind, name, amount, category, occurred_at";

/// Create a new record of `kind` owned by `user_id`.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error,
/// e.g. `user_id` does not belong to a registered user.
pub fn create_record(
    user_id: UserID,
    kind: RecordKind,
    new_record: NewRecord,
    connection: &Connection,
) -> Result<Record, Error> {
    let record = connection
        .prepare(&format!(
            "INSERT INTO record (user_id, kind, name, amount, category, occurred_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING {RECORD_COLUMNS}"
        ))?
        .query_row(
            (
                user_id.as_i64(),
                kind,
                new_record.name,
                new_record.amount,
                new_record.category,
                new_record.occurred_at,
            ),
            map_record_row,
        )?;

    Ok(record)
}

/// Retrieve the record of `kind` with `id` owned by `user_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a record of `kind` owned by the user,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_record(
    user_id: UserID,
    kind: RecordKind,
    id: RecordId,
    connection: &Connection,
) -> Result<Record, Error> {
    let record = connection
        .prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM record
             WHERE id = :id AND user_id = :user_id AND kind = :kind"
        ))?
        .query_one(
            rusqlite::named_params! {
                ":id": id,
                ":user_id": user_id.as_i64(),
                ":kind": kind,
            },
            map_record_row,
        )?;

    Ok(record)
}

/// Get all records of `kind` owned by `user_id`, newest first.
///
/// Records without a date come last.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_records(
    user_id: UserID,
    kind: RecordKind,
    connection: &Connection,
) -> Result<Vec<Record>, Error> {
    connection
        .prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM record
             WHERE user_id = :user_id AND kind = :kind
             ORDER BY occurred_at IS NULL, occurred_at DESC, id DESC"
        ))?
        .query_map(
            rusqlite::named_params! {
                ":user_id": user_id.as_i64(),
                ":kind": kind,
            },
            map_record_row,
        )?
        .map(|maybe_record| maybe_record.map_err(Error::from))
        .collect()
}

/// Replace the fields of the record of `kind` with `id` owned by `user_id`.
///
/// If `update` has no date, the stored date is kept.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingRecord] if `id` does not refer to a record of `kind` owned by the user,
/// - or [Error::SqlError] there is some other SQL error.
pub fn update_record(
    user_id: UserID,
    kind: RecordKind,
    id: RecordId,
    update: NewRecord,
    connection: &Connection,
) -> Result<Record, Error> {
    connection
        .prepare(&format!(
            "UPDATE record
             SET name = :name, amount = :amount, category = :category,
                 occurred_at = COALESCE(:occurred_at, occurred_at)
             WHERE id = :id AND user_id = :user_id AND kind = :kind
             RETURNING {RECORD_COLUMNS}"
        ))?
        .query_row(
            rusqlite::named_params! {
                ":name": update.name,
                ":amount": update.amount,
                ":category": update.category,
                ":occurred_at": update.occurred_at,
                ":id": id,
                ":user_id": user_id.as_i64(),
                ":kind": kind,
            },
            map_record_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::UpdateMissingRecord,
            error => error.into(),
        })
}

/// Delete the record of `kind` with `id` owned by `user_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingRecord] if `id` does not refer to a record of `kind` owned by the user,
/// - or [Error::SqlError] there is some other SQL error.
pub fn delete_record(
    user_id: UserID,
    kind: RecordKind,
    id: RecordId,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM record WHERE id = ?1 AND user_id = ?2 AND kind = ?3",
        (id, user_id.as_i64(), kind),
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingRecord);
    }

    Ok(())
}

/// Create the record table in the database.
///
/// The user table must exist first.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_record_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS record (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                kind TEXT NOT NULL CHECK (kind IN ('income', 'expense', 'credit_card')),
                name TEXT NOT NULL,
                amount REAL NOT NULL CHECK (amount >= 0),
                category TEXT,
                occurred_at TEXT,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    // Listings filter by user and kind and sort by date.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_record_user_kind_date ON record(user_id, kind, occurred_at);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a [Record].
pub fn map_record_row(row: &Row) -> Result<Record, rusqlite::Error> {
    let id = row.get(0)?;
    let kind = row.get(1)?;
    let name = row.get(2)?;
    let amount = row.get(3)?;
    let category = row.get(4)?;
    let occurred_at = row.get(5)?;

    Ok(Record {
        id,
        kind,
        name,
        amount,
        category,
        occurred_at,
    })
}

// ============================================================================
// TESTS
// ============================================================================
