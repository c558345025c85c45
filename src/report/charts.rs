//! Chart generation and rendering for the dashboard.
//!
//! This module creates the ECharts visualizations for the recorded
//! transactions:
//! - **Income vs Expense**: a donut chart comparing the two totals
//! - **Expenses by Category**: a horizontal bar chart, smallest category first
//! - **Weekly Flow**: grouped income/expense bars per ISO week
//! - **Monthly Flow**: stacked income/expense areas per calendar month
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered into an HTML container with JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AreaStyle, AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, EmphasisFocus,
        JsFunction, Tooltip, Trigger,
    },
    series::{Bar, Line, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    html::HeadElement,
    report::aggregation::{Totals, by_category, by_month, by_week, month_label, week_label},
    transaction::{Transaction, TransactionKind},
};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct ReportChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for the dashboard charts.
pub(super) fn charts_view(charts: &[ReportChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for the dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[ReportChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// A donut chart comparing total income against total expense.
pub(super) fn income_expense_chart(totals: &Totals) -> Chart {
    Chart::new()
        .title(Title::new().text("Income vs Expense"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().top("bottom"))
        .series(
            Pie::new()
                .name("Totals")
                .radius(vec!["45%", "70%"])
                .avoid_label_overlap(false)
                .data(vec![
                    (totals.income, "Income"),
                    (totals.expense, "Expense"),
                ]),
        )
}

/// A horizontal bar chart of expense sums per category, smallest first.
pub(super) fn expenses_by_category_chart(transactions: &[Transaction]) -> Chart {
    let sums = by_category(transactions, TransactionKind::Expense);

    let labels: Vec<String> = sums.iter().map(|(category, _)| category.clone()).collect();
    let values: Vec<f64> = sums.iter().map(|(_, sum)| *sum).collect();

    Chart::new()
        .title(Title::new().text("Expenses by Category"))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .y_axis(Axis::new().type_(AxisType::Category).data(labels))
        .series(Bar::new().name("Expense").data(values))
}

/// A grouped bar chart of income and expense per ISO week.
pub(super) fn weekly_chart(transactions: &[Transaction]) -> Chart {
    let weeks = by_week(transactions);

    let labels: Vec<String> = weeks.keys().copied().map(week_label).collect();
    let income: Vec<f64> = weeks.values().map(|totals| totals.income).collect();
    let expense: Vec<f64> = weeks.values().map(|totals| totals.expense).collect();

    Chart::new()
        .title(Title::new().text("Weekly Flow").subtext("ISO 8601 weeks"))
        .tooltip(currency_tooltip())
        .legend(Legend::new().left(250).top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            Bar::new()
                .name("Income")
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(income),
        )
        .series(
            Bar::new()
                .name("Expense")
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(expense),
        )
}

/// A stacked area chart of income and expense per calendar month.
pub(super) fn monthly_chart(transactions: &[Transaction]) -> Chart {
    let months = by_month(transactions);

    let labels: Vec<String> = months.keys().copied().map(month_label).collect();
    let income: Vec<f64> = months.values().map(|totals| totals.income).collect();
    let expense: Vec<f64> = months.values().map(|totals| totals.expense).collect();

    Chart::new()
        .title(Title::new().text("Monthly Flow"))
        .tooltip(currency_tooltip())
        .legend(Legend::new().left(250).top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            Line::new()
                .name("Income")
                .stack("Total")
                .area_style(AreaStyle::new())
                .data(income),
        )
        .series(
            Line::new()
                .name("Expense")
                .stack("Total")
                .area_style(AreaStyle::new())
                .data(expense),
        )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
