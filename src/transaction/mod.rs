//! Transaction management for Caja.
//!
//! This module contains everything related to transactions:
//! - The [Transaction] model and [NewTransaction] for creating transactions
//! - Database functions for storing, listing and deleting transactions
//! - Route handlers for the transaction-related web pages and API endpoints

mod core;
mod create_transaction_endpoint;
mod delete_transaction_endpoint;
mod new_transaction_page;
mod transactions_page;

pub use core::{
    NewTransaction, Transaction, TransactionKind, create_transaction, create_transaction_table,
    delete_transaction, get_all_transactions,
};
pub use create_transaction_endpoint::create_transaction_endpoint;
pub use delete_transaction_endpoint::{delete_transaction_endpoint, delete_transactions_endpoint};
pub use new_transaction_page::get_new_transaction_page;
pub use transactions_page::get_transactions_page;
