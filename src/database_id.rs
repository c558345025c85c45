//! Type aliases for database row IDs.

/// An alias for the integer type used for database IDs.
pub type DatabaseId = i64;

/// The ID of a row in the transaction table.
pub type TransactionId = DatabaseId;
