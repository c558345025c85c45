//! Pure aggregation functions over transaction data.
//!
//! Every report shown on the dashboard is computed here, from the KPI totals
//! to the per-chart groupings. All functions take a slice of transactions and
//! have no side effects, which keeps them trivial to test.

use std::collections::BTreeMap;

use time::Date;

use crate::transaction::{Transaction, TransactionKind};

/// The headline figures shown at the top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    /// The sum of all income transactions.
    pub income: f64,
    /// The sum of all expense transactions.
    pub expense: f64,
    /// Income minus expense.
    pub balance: f64,
}

/// Income and expense sums for one bucket of a grouped report.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KindTotals {
    /// The sum of the income transactions in the bucket.
    pub income: f64,
    /// The sum of the expense transactions in the bucket.
    pub expense: f64,
}

impl KindTotals {
    fn add(&mut self, transaction: &Transaction) {
        match transaction.kind {
            TransactionKind::Income => self.income += transaction.amount,
            TransactionKind::Expense => self.expense += transaction.amount,
        }
    }
}

/// Calculate the total income, total expense and balance.
pub fn totals(transactions: &[Transaction]) -> Totals {
    let mut income = 0.0;
    let mut expense = 0.0;

    for transaction in transactions {
        match transaction.kind {
            TransactionKind::Income => income += transaction.amount,
            TransactionKind::Expense => expense += transaction.amount,
        }
    }

    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

/// Sum the transactions of `kind` per category.
///
/// The categories are returned in ascending order of their summed amount, so
/// the largest category comes last. Categories with equal sums are ordered by
/// name so the output is stable.
pub fn by_category(transactions: &[Transaction], kind: TransactionKind) -> Vec<(String, f64)> {
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();

    for transaction in transactions.iter().filter(|t| t.kind == kind) {
        *sums.entry(transaction.category.as_str()).or_insert(0.0) += transaction.amount;
    }

    let mut sorted: Vec<(String, f64)> = sums
        .into_iter()
        .map(|(category, sum)| (category.to_owned(), sum))
        .collect();
    sorted.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

    sorted
}

/// An ISO 8601 week, as the pair (ISO year, ISO week number).
///
/// Weeks start on Monday, and the ISO year can differ from the calendar year
/// for dates near the new year.
pub type IsoWeek = (i32, u8);

/// Sum income and expense per ISO 8601 week, in chronological order.
pub fn by_week(transactions: &[Transaction]) -> BTreeMap<IsoWeek, KindTotals> {
    let mut weeks: BTreeMap<IsoWeek, KindTotals> = BTreeMap::new();

    for transaction in transactions {
        let (iso_year, iso_week, _) = transaction.date.to_iso_week_date();
        weeks
            .entry((iso_year, iso_week))
            .or_default()
            .add(transaction);
    }

    weeks
}

/// Format an ISO week for use as a chart axis label, e.g. "2024-W01".
pub fn week_label((iso_year, iso_week): IsoWeek) -> String {
    format!("{iso_year}-W{iso_week:02}")
}

/// Sum income and expense per calendar month, in chronological order.
///
/// Each month is keyed by its first day.
pub fn by_month(transactions: &[Transaction]) -> BTreeMap<Date, KindTotals> {
    let mut months: BTreeMap<Date, KindTotals> = BTreeMap::new();

    for transaction in transactions {
        let month = transaction.date.replace_day(1).unwrap();
        months.entry(month).or_default().add(transaction);
    }

    months
}

/// Format a month for use as a chart axis label, e.g. "2024-01".
pub fn month_label(month: Date) -> String {
    format!("{:04}-{:02}", month.year(), month.month() as u8)
}

/// Sort transactions for the history table, most recent first.
///
/// Transactions on the same date are ordered by descending ID, so the row
/// created last comes first.
pub fn sorted_history(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
    transactions
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        report::aggregation::{
            Totals, by_category, by_month, by_week, month_label, sorted_history, totals,
            week_label,
        },
        transaction::{Transaction, TransactionKind},
    };

    fn create_test_transaction(
        id: i64,
        date: time::Date,
        amount: f64,
        category: &str,
        kind: TransactionKind,
    ) -> Transaction {
        Transaction {
            id,
            date,
            amount,
            category: category.to_owned(),
            kind,
        }
    }

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            create_test_transaction(
                1,
                date!(2024 - 01 - 05),
                100000.0,
                "Efectivo",
                TransactionKind::Income,
            ),
            create_test_transaction(
                2,
                date!(2024 - 01 - 06),
                30000.0,
                "Café",
                TransactionKind::Expense,
            ),
        ]
    }

    #[test]
    fn totals_sums_income_and_expense() {
        let result = totals(&sample_transactions());

        assert_eq!(
            result,
            Totals {
                income: 100000.0,
                expense: 30000.0,
                balance: 70000.0,
            }
        );
    }

    #[test]
    fn totals_of_no_transactions_are_zero() {
        assert_eq!(totals(&[]), Totals::default());
    }

    #[test]
    fn by_category_sums_only_the_requested_kind() {
        let result = by_category(&sample_transactions(), TransactionKind::Expense);

        assert_eq!(result, vec![("Café".to_owned(), 30000.0)]);
    }

    #[test]
    fn by_category_sorts_ascending_by_sum() {
        let transactions = vec![
            create_test_transaction(
                1,
                date!(2024 - 01 - 05),
                50000.0,
                "Alquiler",
                TransactionKind::Expense,
            ),
            create_test_transaction(
                2,
                date!(2024 - 01 - 06),
                10000.0,
                "Café",
                TransactionKind::Expense,
            ),
            create_test_transaction(
                3,
                date!(2024 - 01 - 07),
                20000.0,
                "Café",
                TransactionKind::Expense,
            ),
            create_test_transaction(
                4,
                date!(2024 - 01 - 07),
                5000.0,
                "Domicilios",
                TransactionKind::Expense,
            ),
        ];

        let result = by_category(&transactions, TransactionKind::Expense);

        assert_eq!(
            result,
            vec![
                ("Domicilios".to_owned(), 5000.0),
                ("Café".to_owned(), 30000.0),
                ("Alquiler".to_owned(), 50000.0),
            ]
        );
    }

    #[test]
    fn by_category_breaks_ties_by_name() {
        let transactions = vec![
            create_test_transaction(
                1,
                date!(2024 - 01 - 05),
                10000.0,
                "Marketing",
                TransactionKind::Expense,
            ),
            create_test_transaction(
                2,
                date!(2024 - 01 - 06),
                10000.0,
                "Café",
                TransactionKind::Expense,
            ),
        ];

        let result = by_category(&transactions, TransactionKind::Expense);

        assert_eq!(
            result,
            vec![
                ("Café".to_owned(), 10000.0),
                ("Marketing".to_owned(), 10000.0),
            ]
        );
    }

    #[test]
    fn by_week_groups_by_iso_week() {
        // Monday and Sunday of the same ISO week, plus the following Monday
        let transactions = vec![
            create_test_transaction(
                1,
                date!(2024 - 01 - 01),
                100.0,
                "Efectivo",
                TransactionKind::Income,
            ),
            create_test_transaction(
                2,
                date!(2024 - 01 - 07),
                40.0,
                "Café",
                TransactionKind::Expense,
            ),
            create_test_transaction(
                3,
                date!(2024 - 01 - 08),
                60.0,
                "Café",
                TransactionKind::Expense,
            ),
        ];

        let result = by_week(&transactions);

        assert_eq!(result.len(), 2);
        let first_week = result[&(2024, 1)];
        assert_eq!(first_week.income, 100.0);
        assert_eq!(first_week.expense, 40.0);
        let second_week = result[&(2024, 2)];
        assert_eq!(second_week.income, 0.0);
        assert_eq!(second_week.expense, 60.0);
    }

    #[test]
    fn by_week_assigns_new_year_dates_to_the_iso_year() {
        // 2021-01-01 was a Friday, which belongs to ISO week 53 of 2020
        let transactions = vec![create_test_transaction(
            1,
            date!(2021 - 01 - 01),
            100.0,
            "Efectivo",
            TransactionKind::Income,
        )];

        let result = by_week(&transactions);

        assert_eq!(result.len(), 1);
        assert!(result.contains_key(&(2020, 53)));
    }

    #[test]
    fn week_label_pads_the_week_number() {
        assert_eq!(week_label((2024, 1)), "2024-W01");
        assert_eq!(week_label((2020, 53)), "2020-W53");
    }

    #[test]
    fn by_month_groups_by_calendar_month() {
        let transactions = vec![
            create_test_transaction(
                1,
                date!(2024 - 01 - 05),
                100.0,
                "Efectivo",
                TransactionKind::Income,
            ),
            create_test_transaction(
                2,
                date!(2024 - 01 - 20),
                30.0,
                "Café",
                TransactionKind::Expense,
            ),
            create_test_transaction(
                3,
                date!(2024 - 02 - 03),
                50.0,
                "Alquiler",
                TransactionKind::Expense,
            ),
        ];

        let result = by_month(&transactions);

        assert_eq!(result.len(), 2);
        let january = result[&date!(2024 - 01 - 01)];
        assert_eq!(january.income, 100.0);
        assert_eq!(january.expense, 30.0);
        let february = result[&date!(2024 - 02 - 01)];
        assert_eq!(february.income, 0.0);
        assert_eq!(february.expense, 50.0);
    }

    #[test]
    fn month_label_formats_year_and_month() {
        assert_eq!(month_label(date!(2024 - 01 - 01)), "2024-01");
        assert_eq!(month_label(date!(2024 - 12 - 01)), "2024-12");
    }

    #[test]
    fn sorted_history_is_most_recent_first() {
        let transactions = vec![
            create_test_transaction(
                1,
                date!(2024 - 01 - 05),
                100.0,
                "Efectivo",
                TransactionKind::Income,
            ),
            create_test_transaction(
                2,
                date!(2024 - 01 - 07),
                30.0,
                "Café",
                TransactionKind::Expense,
            ),
            create_test_transaction(
                3,
                date!(2024 - 01 - 06),
                20.0,
                "Café",
                TransactionKind::Expense,
            ),
        ];

        let result = sorted_history(transactions);

        let ids: Vec<_> = result.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn sorted_history_breaks_date_ties_by_descending_id() {
        let date = date!(2024 - 01 - 06);
        let transactions = vec![
            create_test_transaction(1, date, 10.0, "Café", TransactionKind::Expense),
            create_test_transaction(3, date, 30.0, "Café", TransactionKind::Expense),
            create_test_transaction(2, date, 20.0, "Café", TransactionKind::Expense),
        ];

        let result = sorted_history(transactions);

        let ids: Vec<_> = result.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
