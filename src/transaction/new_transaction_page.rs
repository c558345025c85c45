//! Defines the route handler for the page for creating a new transaction.

use maud::{Markup, PreEscaped, html};
use time::{Date, OffsetDateTime};

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_RADIO_INPUT_STYLE, FORM_TEXT_INPUT_STYLE,
        HeadElement, PAGE_CONTAINER_STYLE, base,
    },
    navigation::NavBar,
    transaction::TransactionKind,
};

/// Renders the page for creating a transaction.
pub async fn get_new_transaction_page() -> Markup {
    let max_date = OffsetDateTime::now_utc().date();

    new_transaction_view(max_date)
}

/// Toggles which category select is visible and submitted based on the
/// selected transaction kind. The inactive select is disabled so that only one
/// "category" field is sent with the form.
fn kind_toggle_script() -> HeadElement {
    HeadElement::ScriptSource(PreEscaped(
        r#"
        function setTransactionKind(kind) {
            const income = document.getElementById('category-Income');
            const expense = document.getElementById('category-Expense');
            const showIncome = kind === 'Income';
            income.hidden = !showIncome;
            income.disabled = !showIncome;
            expense.hidden = showIncome;
            expense.disabled = showIncome;
        }

        document.addEventListener('DOMContentLoaded', () => {
            document.querySelectorAll('input[name="kind"]').forEach((radio) => {
                radio.addEventListener('change', () => setTransactionKind(radio.value));
            });
        });
        "#
        .to_owned(),
    ))
}

fn kind_radio(kind: TransactionKind, is_checked: bool) -> Markup {
    html! {
        label class="flex items-center space-x-2 cursor-pointer"
        {
            input
                type="radio"
                name="kind"
                value=(kind)
                checked[is_checked]
                class=(FORM_RADIO_INPUT_STYLE);

            span { (kind) }
        }
    }
}

fn category_select(kind: TransactionKind, is_active: bool) -> Markup {
    html! {
        select
            name="category"
            id=(format!("category-{kind}"))
            hidden[!is_active]
            disabled[!is_active]
            required
            class=(FORM_TEXT_INPUT_STYLE)
        {
            @for category in kind.categories() {
                option value=(category) { (category) }
            }
        }
    }
}

fn new_transaction_view(max_date: Date) -> Markup {
    let create_transaction_route = endpoints::TRANSACTIONS_API;
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            form
                hx-post=(create_transaction_route)
                hx-target-error="#alert-container"
                class="w-full max-w-md space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "New Transaction" }

                div
                {
                    label
                        for="date"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Date"
                    }

                    input
                        name="date"
                        id="date"
                        type="date"
                        max=(max_date)
                        required
                        value=(max_date)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label
                        for="amount"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Amount"
                    }

                    input
                        name="amount"
                        id="amount"
                        type="number"
                        min="0"
                        step="0.01"
                        placeholder="0.00"
                        required
                        autofocus
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    span class=(FORM_LABEL_STYLE) { "Kind" }

                    div class="flex space-x-6"
                    {
                        (kind_radio(TransactionKind::Expense, true))
                        (kind_radio(TransactionKind::Income, false))
                    }
                }

                div
                {
                    label
                        for="category-Expense"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Category"
                    }

                    (category_select(TransactionKind::Expense, true))
                    (category_select(TransactionKind::Income, false))
                }

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    "Create Transaction"
                }
            }
        }
    };

    base("New Transaction", &[kind_toggle_script()], &content)
}
