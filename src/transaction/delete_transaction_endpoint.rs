//! Defines the endpoints for deleting transactions, both one at a time and as
//! a batch of selected rows.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
// Must use axum_extra's Form since that supports multiple values with the same
// key, which is how HTML forms encode a group of checkboxes.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error, alert::AlertTemplate, database_id::TransactionId, endpoints,
    shared_templates::render, transaction::delete_transaction,
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a single transaction.
///
/// On success the response replaces the table row the delete button lives in
/// with nothing, removing it from the page.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_transaction(transaction_id, &connection) {
        Ok(0) => Error::DeleteMissingTransaction.into_alert_response(),
        // The status code has to be 200 OK or HTMX will not delete the table row.
        Ok(_) => Html("").into_response(),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}

/// The form data for deleting a batch of transactions.
#[derive(Debug, Deserialize)]
pub struct DeleteTransactionsForm {
    /// The IDs of the transactions selected for deletion.
    #[serde(default)]
    pub transaction_ids: Vec<TransactionId>,
}

/// A route handler for deleting the selected transactions.
///
/// Deletion is best-effort: each selected transaction is deleted
/// independently, and the rows that could not be deleted are reported together
/// in a single alert. Redirects to the transactions view when every selected
/// transaction was deleted.
pub async fn delete_transactions_endpoint(
    State(state): State<DeleteTransactionState>,
    Form(form): Form<DeleteTransactionsForm>,
) -> Response {
    if form.transaction_ids.is_empty() {
        return render(
            StatusCode::BAD_REQUEST,
            AlertTemplate::error(
                "No transactions selected",
                "Tick the checkbox of at least one transaction to delete.",
            ),
        );
    }

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let mut missing_ids = Vec::new();
    let mut had_sql_error = false;

    for transaction_id in &form.transaction_ids {
        match delete_transaction(*transaction_id, &connection) {
            Ok(0) => missing_ids.push(transaction_id.to_string()),
            Ok(_) => {}
            Err(error) => {
                tracing::error!("Could not delete transaction {transaction_id}: {error}");
                missing_ids.push(transaction_id.to_string());
                had_sql_error = true;
            }
        }
    }

    if missing_ids.is_empty() {
        return (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response();
    }

    let deleted_count = form.transaction_ids.len() - missing_ids.len();
    let status_code = if had_sql_error {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::NOT_FOUND
    };

    render(
        status_code,
        AlertTemplate::error(
            "Could not delete all selected transactions",
            &format!(
                "Deleted {deleted_count} of {} selected transactions. \
                The transactions with IDs {} could not be deleted. \
                Try refreshing the page to see if they have already been deleted.",
                form.transaction_ids.len(),
                missing_ids.join(", "),
            ),
        ),
    )
}
