//! Dashboard HTTP handlers and view rendering.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{HeadElement, PAGE_CONTAINER_STYLE, base, link},
    navigation::NavBar,
    report::{
        aggregation::totals,
        cards::kpi_cards_view,
        charts::{
            ReportChart, charts_script, charts_view, expenses_by_category_chart,
            income_expense_chart, monthly_chart, weekly_chart,
        },
    },
    transaction::{Transaction, get_all_transactions},
};

const ECHARTS_CDN: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display a page with an overview of the user's transactions.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let transactions = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_transactions(&connection)
            .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?
    };

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    if transactions.is_empty() {
        return Ok(dashboard_no_data_view(nav_bar).into_response());
    }

    Ok(dashboard_view(nav_bar, &transactions).into_response())
}

/// Creates the array of dashboard charts from transaction data.
fn build_report_charts(transactions: &[Transaction]) -> [ReportChart; 4] {
    [
        ReportChart {
            id: "income-expense-chart",
            options: income_expense_chart(&totals(transactions)).to_string(),
        },
        ReportChart {
            id: "expenses-by-category-chart",
            options: expenses_by_category_chart(transactions).to_string(),
        },
        ReportChart {
            id: "weekly-chart",
            options: weekly_chart(transactions).to_string(),
        },
        ReportChart {
            id: "monthly-chart",
            options: monthly_chart(transactions).to_string(),
        },
    ]
}

/// Renders the dashboard page when no transaction data exists.
fn dashboard_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();
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
                "Charts will show up here once you add some transactions.
                Get started by " (new_transaction_link) "."
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// Renders the main dashboard page with the KPI cards and charts.
fn dashboard_view(nav_bar: NavBar, transactions: &[Transaction]) -> Markup {
    let nav_bar = nav_bar.into_html();
    let charts = build_report_charts(transactions);

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (kpi_cards_view(&totals(transactions)))

            (charts_view(&charts))
        }
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_CDN.to_owned()),
        charts_script(&charts),
    ];

    base("Dashboard", &scripts, &content)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        extract::State,
        http::{Response, StatusCode},
    };
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        db::initialize,
        report::handlers::DashboardState,
        transaction::{NewTransaction, TransactionKind, create_transaction},
    };

    use rusqlite::Connection;
    use std::sync::{Arc, Mutex};

    use super::get_dashboard_page;

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[tokio::test]
    async fn dashboard_page_loads_successfully() {
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

        let state = DashboardState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let response = get_dashboard_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html(response).await;
        assert_valid_html(&html);

        assert_chart_exists(&html, "income-expense-chart");
        assert_chart_exists(&html, "expenses-by-category-chart");
        assert_chart_exists(&html, "weekly-chart");
        assert_chart_exists(&html, "monthly-chart");

        // The KPI cards should show the three totals
        let text = html.html();
        assert!(text.contains("$100,000.00"), "missing income total");
        assert!(text.contains("$30,000.00"), "missing expense total");
        assert!(text.contains("$70,000.00"), "missing balance");
    }

    #[tokio::test]
    async fn displays_prompt_text_on_no_data() {
        let conn = get_test_connection();
        let state = DashboardState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let response = get_dashboard_page(State(state)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html(response).await;
        assert_valid_html(&html);

        let chart_selector = Selector::parse("section#charts").unwrap();
        assert!(
            html.select(&chart_selector).next().is_none(),
            "no charts should be rendered without transactions"
        );
    }

    async fn parse_html(response: Response<Body>) -> Html {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }

    #[track_caller]
    fn assert_valid_html(html: &Html) {
        assert!(
            html.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            html.errors
        );
    }

    #[track_caller]
    fn assert_chart_exists(html: &Html, chart_id: &str) {
        let selector = Selector::parse(&format!("#{}", chart_id)).unwrap();
        assert!(
            html.select(&selector).next().is_some(),
            "Chart with id '{}' not found",
            chart_id
        );
    }
}
