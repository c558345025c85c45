//! Defines the route handler for the page that displays the transaction
//! history as a table.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    endpoints::format_endpoint,
    html::{
        BUTTON_DELETE_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, format_currency, link,
    },
    navigation::NavBar,
    report::sorted_history,
    transaction::{Transaction, get_all_transactions},
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render an overview of the user's transactions, most recent first.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
) -> Result<Response, Error> {
    let transactions = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_transactions(&connection)
            .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?
    };

    if transactions.is_empty() {
        return Ok(transactions_no_data_view().into_response());
    }

    Ok(transactions_view(&sorted_history(transactions)).into_response())
}

/// Renders the transactions page when no transactions exist.
fn transactions_no_data_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "creating a transaction");

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Your transaction history will show up here. Get started by "
                (new_transaction_link) "."
            }
        }
    );

    base("Transactions", &[], &content)
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let delete_endpoint = format_endpoint(endpoints::DELETE_TRANSACTION, transaction.id);

    html!(
        tr class=(TABLE_ROW_STYLE) data-transaction-row="true"
        {
            td class=(TABLE_CELL_STYLE)
            {
                input
                    type="checkbox"
                    name="transaction_ids"
                    value=(transaction.id)
                    class="rounded-sm border-gray-300 text-blue-600 shadow-xs
                        focus:border-blue-300 focus:ring-3 focus:ring-blue-200/50";
            }

            td class=(TABLE_CELL_STYLE) { (transaction.date) }
            td class=(TABLE_CELL_STYLE) { (transaction.category) }
            td class=(TABLE_CELL_STYLE) { (transaction.kind) }
            td class=(TABLE_CELL_STYLE) { (format_currency(transaction.amount)) }

            td class=(TABLE_CELL_STYLE)
            {
                button
                    type="button"
                    hx-delete=(delete_endpoint)
                    hx-target="closest tr"
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    class="font-medium text-red-600 dark:text-red-500 hover:underline"
                {
                    "Delete"
                }
            }
        }
    )
}

fn transactions_view(transactions: &[Transaction]) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let delete_transactions_endpoint = endpoints::DELETE_TRANSACTIONS;

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            form
                hx-post=(delete_transactions_endpoint)
                hx-target-error="#alert-container"
                hx-confirm="Delete the selected transactions?"
                class="w-full max-w-screen-lg"
            {
                div class="relative overflow-x-auto shadow-md sm:rounded-lg"
                {
                    table class="w-full text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Kind" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "" }
                            }
                        }

                        tbody
                        {
                            @for transaction in transactions {
                                (transaction_row(transaction))
                            }
                        }
                    }
                }

                div class="mt-4 max-w-xs"
                {
                    button type="submit" class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete Selected"
                    }
                }
            }
        }
    );

    base("Transactions", &[], &content)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, response::Response};
    use rusqlite::Connection;
    use scraper::{ElementRef, Html, Selector};
    use time::macros::date;

    use crate::{
        db::initialize,
        transaction::{NewTransaction, TransactionKind, create_transaction},
    };

    use super::{TransactionsViewState, get_transactions_page};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[track_caller]
    fn assert_valid_html(html: &Html) {
        assert!(
            html.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            html.errors
        );
    }

    #[tokio::test]
    async fn transactions_page_displays_rows_most_recent_first() {
        let conn = get_test_connection();

        create_transaction(
            NewTransaction {
                date: date!(2024 - 01 - 05),
                amount: 100000.0,
                category: "Efectivo".to_owned(),
                kind: TransactionKind::Income,
            },
            &conn,
        )
        .unwrap();
        create_transaction(
            NewTransaction {
                date: date!(2024 - 01 - 06),
                amount: 30000.0,
                category: "Café".to_owned(),
                kind: TransactionKind::Expense,
            },
            &conn,
        )
        .unwrap();

        let state = TransactionsViewState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let response = get_transactions_page(State(state)).await.unwrap();

        let html = parse_html(response).await;
        assert_valid_html(&html);

        let rows = get_transaction_rows(&html);
        assert_eq!(rows.len(), 2, "want 2 transaction rows");

        // Most recent date first
        assert_row_date(&rows[0], "2024-01-06");
        assert_row_date(&rows[1], "2024-01-05");
    }

    #[tokio::test]
    async fn transactions_page_has_checkboxes_and_bulk_delete_form() {
        let conn = get_test_connection();
        let transaction = create_transaction(
            NewTransaction {
                date: date!(2024 - 01 - 06),
                amount: 30000.0,
                category: "Café".to_owned(),
                kind: TransactionKind::Expense,
            },
            &conn,
        )
        .unwrap();

        let state = TransactionsViewState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let response = get_transactions_page(State(state)).await.unwrap();
        let html = parse_html(response).await;
        assert_valid_html(&html);

        let form_selector = Selector::parse("form[hx-post='/api/transactions/delete']").unwrap();
        let form = html
            .select(&form_selector)
            .next()
            .expect("missing bulk delete form");

        let checkbox_selector =
            Selector::parse("input[type='checkbox'][name='transaction_ids']").unwrap();
        let checkboxes: Vec<_> = form.select(&checkbox_selector).collect();
        assert_eq!(checkboxes.len(), 1, "want one checkbox per row");
        assert_eq!(
            checkboxes[0].value().attr("value"),
            Some(transaction.id.to_string().as_str())
        );
    }

    #[tokio::test]
    async fn displays_prompt_text_on_no_data() {
        let conn = get_test_connection();
        let state = TransactionsViewState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let response = get_transactions_page(State(state)).await.unwrap();
        let html = parse_html(response).await;
        assert_valid_html(&html);

        let table_selector = Selector::parse("table").unwrap();
        assert!(
            html.select(&table_selector).next().is_none(),
            "no table should be rendered without transactions"
        );

        let link_selector = Selector::parse("a").unwrap();
        assert!(
            html.select(&link_selector)
                .any(|link| link.value().attr("href") == Some("/transactions/new")),
            "the empty state should link to the new transaction page"
        );
    }

    fn get_transaction_rows<'a>(html: &'a Html) -> Vec<ElementRef<'a>> {
        let row_selector = Selector::parse("tbody tr[data-transaction-row='true']").unwrap();
        html.select(&row_selector).collect()
    }

    #[track_caller]
    fn assert_row_date(row: &ElementRef, want_date: &str) {
        let td_selector = Selector::parse("td").unwrap();
        let date_cell = row
            .select(&td_selector)
            .nth(1)
            .expect("row should have a date cell");
        let got_date = date_cell.text().collect::<String>();

        assert_eq!(got_date.trim(), want_date);
    }

    async fn parse_html(response: Response) -> Html {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX)
            .await
            .expect("Could not get response body");
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }
}
