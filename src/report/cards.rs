//! The KPI cards shown at the top of the dashboard.

use maud::{Markup, html};

use crate::{html::format_currency, report::aggregation::Totals};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md";

const CARD_LABEL_STYLE: &str = "text-sm text-gray-600 dark:text-gray-400 mb-1";

/// Renders the row of KPI cards for the given totals.
pub(super) fn kpi_cards_view(totals: &Totals) -> Markup {
    let balance_style = if totals.balance < 0.0 {
        "text-3xl font-bold text-red-600 dark:text-red-400"
    } else {
        "text-3xl font-bold text-green-600 dark:text-green-400"
    };

    html! {
        section class="w-full mx-auto mb-4" {
            div class="grid grid-cols-1 sm:grid-cols-3 gap-4" {
                div class=(CARD_STYLE) {
                    div class=(CARD_LABEL_STYLE) { "Total Income" }
                    div class="text-3xl font-bold" { (format_currency(totals.income)) }
                }

                div class=(CARD_STYLE) {
                    div class=(CARD_LABEL_STYLE) { "Total Expense" }
                    div class="text-3xl font-bold" { (format_currency(totals.expense)) }
                }

                div class=(CARD_STYLE) {
                    div class=(CARD_LABEL_STYLE) { "Balance" }
                    div class=(balance_style) { (format_currency(totals.balance)) }
                }
            }
        }
    }
}
