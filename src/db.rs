/*! Sets up the application's SQLite database. */

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{Error, record::create_record_table, user::create_user_table};

/// Create the tables for users and their records.
///
/// Foreign keys are switched on first so that deleting a user removes
/// their records. Safe to call on a database that is already set up.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_record_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
