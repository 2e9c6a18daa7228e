//! The kinds of records and their categories.

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

/// Whether a record is money earned, money spent, or a credit card charge.
///
/// In URLs the kinds are written as `incomes`, `expenses` and `credit-card`.
/// In JSON bodies and the database they are `income`, `expense` and
/// `credit_card`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    #[serde(rename(serialize = "income", deserialize = "incomes"))]
    Income,
    #[serde(rename(serialize = "expense", deserialize = "expenses"))]
    Expense,
    #[serde(rename(serialize = "credit_card", deserialize = "credit-card"))]
    CreditCard,
}

const INCOME_CATEGORIES: [&str; 5] = ["Allowance", "Chores", "Development", "Taxi", "Other"];
const EXPENSE_CATEGORIES: [&str; 7] = ["Bank", "Fuel", "Fees", "AI", "Food", "Leisure", "Other"];

impl RecordKind {
    #[cfg(test)]
    pub const ALL: [RecordKind; 3] = [RecordKind::Income, RecordKind::Expense, RecordKind::CreditCard];

    /// The categories offered for this kind of record, in display order.
    pub fn categories(self) -> &'static [&'static str] {
        match self {
            RecordKind::Income => &INCOME_CATEGORIES,
            RecordKind::Expense | RecordKind::CreditCard => &EXPENSE_CATEGORIES,
        }
    }

    /// The path segment used for this kind in the API, e.g. `/api/incomes`.
    pub fn path_segment(self) -> &'static str {
        match self {
            RecordKind::Income => "incomes",
            RecordKind::Expense => "expenses",
            RecordKind::CreditCard => "credit-card",
        }
    }

    /// The heading for a list of records of this kind, e.g. "Credit card".
    pub fn title(self) -> &'static str {
        match self {
            RecordKind::Income => "Incomes",
            RecordKind::Expense => "Expenses",
            RecordKind::CreditCard => "Credit card",
        }
    }

    /// A single record of this kind in lowercase, e.g. "credit card charge".
    pub fn noun(self) -> &'static str {
        match self {
            RecordKind::Income => "income",
            RecordKind::Expense => "expense",
            RecordKind::CreditCard => "credit card charge",
        }
    }

    fn as_sql_str(self) -> &'static str {
        match self {
            RecordKind::Income => "income",
            RecordKind::Expense => "expense",
            RecordKind::CreditCard => "credit_card",
        }
    }
}

impl ToSql for RecordKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_sql_str()))
    }
}

impl FromSql for RecordKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "income" => Ok(RecordKind::Income),
            "expense" => Ok(RecordKind::Expense),
            "credit_card" => Ok(RecordKind::CreditCard),
            other => Err(FromSqlError::Other(
                format!("unknown record kind \"{other}\"").into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::RecordKind;

    #[test]
    fn every_kind_offers_other_category() {
        for kind in RecordKind::ALL {
            assert!(kind.categories().contains(&"Other"), "{kind:?} has no Other");
        }
    }

    #[test]
    fn deserializes_from_path_segment() {
        for kind in RecordKind::ALL {
            let json = format!("\"{}\"", kind.path_segment());

            let parsed: RecordKind = serde_json::from_str(&json).unwrap();

            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn serializes_as_database_name() {
        assert_eq!(serde_json::to_string(&RecordKind::Income).unwrap(), "\"income\"");
        assert_eq!(serde_json::to_string(&RecordKind::Expense).unwrap(), "\"expense\"");
        assert_eq!(serde_json::to_string(&RecordKind::CreditCard).unwrap(), "\"credit_card\"");
    }

    #[test]
    fn json_name_matches_stored_name() {
        for kind in RecordKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();

            assert_eq!(json, format!("\"{}\"", kind.as_sql_str()));
        }
    }

    #[test]
    fn sql_round_trip() {
        let connection = Connection::open_in_memory().unwrap();

        for kind in RecordKind::ALL {
            let got: RecordKind = connection
                .query_row("SELECT ?1", (kind,), |row| row.get(0))
                .unwrap();

            assert_eq!(got, kind);
        }
    }

    #[test]
    fn unknown_sql_value_is_an_error() {
        let connection = Connection::open_in_memory().unwrap();

        let result = connection.query_row("SELECT 'loan'", [], |row| row.get::<_, RecordKind>(0));

        assert!(result.is_err());
    }
}
