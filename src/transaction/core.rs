//! Defines the core data models and database queries for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::TransactionId};

/// The categories available for expense transactions.
///
/// The category lists are a UI convenience. Storage accepts any text so that
/// old rows remain valid if the lists change.
pub const EXPENSE_CATEGORIES: [&str; 11] = [
    "Alimentación",
    "Domicilios",
    "Café",
    "Servicio de tostión",
    "Servicios (Agua/Luz/Internet)",
    "Inventario / Mercadería",
    "Nómina / Salarios",
    "Alquiler",
    "Marketing",
    "Mantenimiento",
    "Otros",
];

/// The categories available for income transactions.
pub const INCOME_CATEGORIES: [&str; 2] = ["Efectivo", "Transferencias"];

// ============================================================================
// MODELS
// ============================================================================

/// Whether a transaction represents money earned or money spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Money flowing into the business.
    Income,
    /// Money flowing out of the business.
    Expense,
}

impl TransactionKind {
    /// The text stored in the database for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    /// The categories offered in the submission form for this kind.
    pub fn categories(self) -> &'static [&'static str] {
        match self {
            Self::Income => &INCOME_CATEGORIES,
            Self::Expense => &EXPENSE_CATEGORIES,
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "Income" => Ok(Self::Income),
            "Expense" => Ok(Self::Expense),
            other => Err(Error::InvalidKind(other.to_owned())),
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;

        text.parse().map_err(|_| {
            FromSqlError::Other(format!("\"{text}\" is not a valid transaction kind").into())
        })
    }
}

/// An income or expense, i.e. an event where money was either earned or spent.
///
/// Instances are created by the database via [create_transaction], which
/// assigns the ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// When the transaction happened.
    pub date: Date,
    /// The amount of money earned or spent in this transaction. Never negative.
    pub amount: f64,
    /// The category the transaction belongs to, e.g. "Café" or "Efectivo".
    pub category: String,
    /// Whether the transaction is an income or an expense.
    pub kind: TransactionKind,
}

/// The data needed to create a [Transaction].
///
/// The ID is assigned by the database on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// When the transaction happened.
    pub date: Date,
    /// The amount of money earned or spent. Must not be negative.
    pub amount: f64,
    /// The category the transaction belongs to.
    pub category: String,
    /// Whether the transaction is an income or an expense.
    pub kind: TransactionKind,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database.
///
/// Returns the stored transaction with its newly assigned ID.
///
/// # Errors
/// This function will return a:
/// - [Error::NegativeAmount] if the amount is negative,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if new_transaction.amount < 0.0 {
        return Err(Error::NegativeAmount(new_transaction.amount));
    }

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (date, amount, category, kind)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, date, amount, category, kind",
        )?
        .query_one(
            (
                new_transaction.date,
                new_transaction.amount,
                new_transaction.category,
                new_transaction.kind,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve every transaction in the database.
///
/// The rows are returned in no particular order. The reporting layer is
/// responsible for imposing a display order.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare("SELECT id, date, amount, category, kind FROM \"transaction\"")?
        .query_map([], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// The number of rows affected by a delete.
pub type RowsAffected = usize;

/// Delete a transaction from the database by its `id`.
///
/// Deleting an ID that is not in the database is not an error here; it is
/// reported as zero rows affected so callers can decide how to surface it.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn delete_transaction(
    id: TransactionId,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "DELETE FROM \"transaction\" WHERE id = :id",
            &[(":id", &id)],
        )
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                kind TEXT NOT NULL
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let date = row.get(1)?;
    let amount = row.get(2)?;
    let category = row.get(3)?;
    let kind = row.get(4)?;

    Ok(Transaction {
        id,
        date,
        amount,
        category,
        kind,
    })
}

// ============================================================================
// TESTS
// ============================================================================
