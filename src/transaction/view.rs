//! HTML rendering for the transactions page.

use maud::{Markup, html};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE, LINK_STYLE,
        PAGE_CONTAINER_STYLE, base, dollar_input_styles, format_currency, link,
    },
    month::YearMonth,
    navigation::NavBar,
    transaction::{
        DayGroup, Totals, Transaction, TransactionId, TransactionType,
        form::{TransactionFormDefaults, transaction_form_fields},
        transactions_page::TransactionsQuery,
    },
};

/// The max number of graphemes to display in the transaction rows before
/// truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

const DAY_LABEL_FORMAT: &[BorrowedFormatItem] = format_description!(
    "[weekday], [month repr:long] [day padding:none], [year]"
);

pub(crate) struct TransactionsViewModel {
    pub(crate) month: YearMonth,
    pub(crate) totals: Totals,
    pub(crate) groups: Vec<DayGroup>,
    /// The transaction shown as an inline form, if any.
    pub(crate) editing: Option<TransactionId>,
    /// The URL of this page without the edit state, used to return after saving or deleting.
    pub(crate) page_url: String,
}

pub(crate) fn transactions_view(model: TransactionsViewModel) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let redirect_param = build_redirect_param(&model.page_url);

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-2xl space-y-6"
            {
                div class="flex flex-wrap items-center justify-between gap-4"
                {
                    h1 class="text-2xl font-bold" { "Transactions" }

                    (month_picker(model.month))
                }

                (month_totals_view(&model.totals))

                @if model.groups.is_empty() {
                    div class=(CARD_STYLE) data-empty-state="true"
                    {
                        p class="text-gray-600 dark:text-gray-300"
                        {
                            "No transactions in " (model.month.long_label()) ". "
                            (link(endpoints::NEW_TRANSACTION_VIEW, "Add a transaction"))
                        }
                    }
                }

                @for group in &model.groups {
                    (day_group_view(group, model.editing, &model.page_url, redirect_param.as_deref()))
                }
            }
        }
    };

    base("Transactions", &[dollar_input_styles()], &content)
}

fn month_picker(month: YearMonth) -> Markup {
    let previous_url = TransactionsQuery {
        month: Some(month.previous()),
        edit: None,
    }
    .to_url();
    let next_url = TransactionsQuery {
        month: Some(month.next()),
        edit: None,
    }
    .to_url();

    html! {
        div class="flex items-center gap-2"
        {
            a href=(previous_url) class=(BUTTON_SECONDARY_STYLE) aria-label="Previous month" { "‹" }

            form method="get" action=(endpoints::TRANSACTIONS_VIEW)
            {
                label for="month" class="sr-only" { "Month" }

                input
                    type="month"
                    id="month"
                    name="month"
                    value=(month)
                    onchange="this.form.submit()"
                    class="p-2 rounded text-sm text-gray-900 dark:text-white bg-gray-50
                        dark:bg-gray-700 border border-gray-300 dark:border-gray-600";
            }

            a href=(next_url) class=(BUTTON_SECONDARY_STYLE) aria-label="Next month" { "›" }
        }
    }
}

fn month_totals_view(totals: &Totals) -> Markup {
    html! {
        div class="grid grid-cols-2 gap-4"
        {
            div class=(CARD_STYLE)
            {
                p class="text-sm text-gray-500 dark:text-gray-400" { "Income" }
                p class="text-lg font-semibold text-green-700 dark:text-green-300"
                { (format_currency(totals.income)) }
            }

            div class=(CARD_STYLE)
            {
                p class="text-sm text-gray-500 dark:text-gray-400" { "Expenses" }
                p class="text-lg font-semibold text-red-700 dark:text-red-300"
                { (format_currency(totals.expenses)) }
            }
        }
    }
}

fn day_group_view(
    group: &DayGroup,
    editing: Option<TransactionId>,
    page_url: &str,
    redirect_param: Option<&str>,
) -> Markup {
    html! {
        section class="space-y-2" data-day-group="true"
        {
            h3 class="text-sm font-semibold uppercase text-gray-600 dark:text-gray-300"
            {
                time datetime=(group.date) { (format_day_label(group.date)) }
            }

            ul class=(CARD_STYLE) role="list"
            {
                @for transaction in &group.transactions {
                    @if editing == Some(transaction.id) {
                        li { (edit_form_view(transaction, page_url, redirect_param)) }
                    } @else {
                        (transaction_row_view(transaction, redirect_param))
                    }
                }
            }
        }
    }
}

fn transaction_row_view(transaction: &Transaction, redirect_param: Option<&str>) -> Markup {
    let (description, tooltip) = format_description(&transaction.description);
    let (sign, amount_class) = match transaction.type_ {
        TransactionType::Expense => ("-", "text-red-700 dark:text-red-300"),
        TransactionType::Income => ("+", "text-green-700 dark:text-green-300"),
    };
    let edit_url = TransactionsQuery {
        month: Some(YearMonth::of(transaction.date)),
        edit: Some(transaction.id),
    }
    .to_url();
    let delete_url = with_query(
        &format_endpoint(endpoints::TRANSACTION, transaction.id),
        redirect_param,
    );
    let confirm_message = format!(
        "Are you sure you want to delete the transaction '{}'? This cannot be undone.",
        transaction.description
    );

    html! {
        li
            class="flex items-center gap-3 py-3 border-b last:border-b-0 border-gray-200 dark:border-gray-700"
            data-transaction-row="true"
        {
            span
                class={ "flex h-10 w-10 shrink-0 items-center justify-center rounded-full text-white font-semibold " (transaction.category.color_class()) }
                aria-hidden="true"
            {
                (transaction.category.initial())
            }

            div class="min-w-0 flex-1"
            {
                p class="truncate font-medium" title=[tooltip] data-description="true"
                { (description) }
                p class="text-sm text-gray-500 dark:text-gray-400" { (transaction.category) }
            }

            div class="flex flex-col items-end gap-1"
            {
                span class={ "tabular-nums whitespace-nowrap " (amount_class) } data-amount="true"
                { (sign) (format_currency(transaction.amount)) }

                div class="flex gap-3 text-sm"
                {
                    a href=(edit_url) class=(LINK_STYLE) { "Edit" }

                    button
                        type="button"
                        hx-delete=(delete_url)
                        hx-confirm=(confirm_message)
                        hx-target-error="#alert-container"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete"
                    }
                }
            }
        }
    }
}

fn edit_form_view(transaction: &Transaction, page_url: &str, redirect_param: Option<&str>) -> Markup {
    let update_url = with_query(
        &format_endpoint(endpoints::TRANSACTION, transaction.id),
        redirect_param,
    );
    let fields = transaction_form_fields(&TransactionFormDefaults::from_transaction(transaction));

    html! {
        form
            hx-put=(update_url)
            hx-target-error="#alert-container"
            class="py-3 space-y-4"
            data-edit-form="true"
        {
            (fields)

            div class="flex gap-3"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save" }
                a href=(page_url) class=(BUTTON_SECONDARY_STYLE) { "Cancel" }
            }
        }
    }
}

fn with_query(url: &str, query: Option<&str>) -> String {
    match query {
        Some(query) => format!("{url}?{query}"),
        None => url.to_owned(),
    }
}

fn build_redirect_param(redirect_url: &str) -> Option<String> {
    serde_urlencoded::to_string([("redirect_url", &redirect_url)])
        .inspect_err(|error| {
            tracing::error!(
                "Could not set redirect URL {redirect_url} due to encoding error: {error}"
            );
        })
        .ok()
}

fn format_day_label(date: Date) -> String {
    date.format(DAY_LABEL_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

fn format_description(description: &str) -> (String, Option<&str>) {
    let description_length = description.graphemes(true).count();

    if description_length <= MAX_DESCRIPTION_GRAPHEMES {
        (description.to_owned(), None)
    } else {
        let truncated: String = description
            .graphemes(true)
            .take(MAX_DESCRIPTION_GRAPHEMES - 3)
            .collect();
        (truncated + "...", Some(description))
    }
}
