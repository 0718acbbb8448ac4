//! Card components for the dashboard's monthly summary.
//!
//! Provides:
//! - Summary cards for total expenses, total income and net income
//! - A line with the totals across every month
//! - A breakdown of expenses by category with each category's share

use maud::{Markup, html};

use crate::{
    html::{CARD_STYLE, format_currency},
    transaction::{CategoryTotal, Totals},
};

/// Formats a share of a total as a whole percentage, avoiding "NaN%" for empty totals.
fn format_share(amount: f64, total: f64) -> String {
    if total <= 0.0 {
        return "0%".to_owned();
    }

    format!("{:.0}%", amount / total * 100.0)
}

/// Renders the cards with the month's total expenses, income and net income.
pub(super) fn totals_cards_view(totals: &Totals) -> Markup {
    let net = totals.net();
    let net_class = if net < 0.0 {
        "text-red-700 dark:text-red-300"
    } else {
        "text-green-700 dark:text-green-300"
    };

    html! {
        section class="w-full grid grid-cols-1 sm:grid-cols-3 gap-4 mb-4" data-totals="true"
        {
            (summary_card("Total Expense", &format_currency(totals.expenses), "text-red-700 dark:text-red-300"))
            (summary_card("Total Income", &format_currency(totals.income), "text-green-700 dark:text-green-300"))
            (summary_card("Net", &format_currency(net), net_class))
        }
    }
}

/// Renders a one-line summary of every transaction ever recorded.
pub(super) fn all_time_totals_view(totals: &Totals) -> Markup {
    html! {
        p class="w-full mb-4 text-sm text-gray-600 dark:text-gray-400" data-all-time-totals="true"
        {
            "All time: "
            span data-all-time-expense="true" { (format_currency(totals.expenses)) }
            " spent, "
            span data-all-time-income="true" { (format_currency(totals.income)) }
            " earned."
        }
    }
}

fn summary_card(title: &str, amount: &str, amount_class: &str) -> Markup {
    html! {
        div class=(CARD_STYLE)
        {
            h3 class="text-sm font-medium text-gray-500 dark:text-gray-400" { (title) }
            p class={ "mt-1 text-2xl font-bold tabular-nums " (amount_class) } { (amount) }
        }
    }
}

/// Renders the list of categories with the amount spent in each.
pub(super) fn category_breakdown_view(category_totals: &[CategoryTotal], total_expenses: f64) -> Markup {
    html! {
        section class="w-full mb-8"
        {
            h3 class="text-xl font-semibold mb-4" { "Spending by Category" }

            @if category_totals.is_empty() {
                p class="text-gray-600 dark:text-gray-400" { "No expenses this month." }
            } @else {
                ul class=(CARD_STYLE) role="list" data-category-breakdown="true"
                {
                    @for total in category_totals {
                        li class="flex items-center gap-3 py-2"
                        {
                            span
                                class={ "flex h-8 w-8 shrink-0 items-center justify-center rounded-full text-white text-sm font-semibold " (total.category.color_class()) }
                                aria-hidden="true"
                            {
                                (total.category.initial())
                            }

                            span class="flex-1 truncate" data-category="true" { (total.category) }

                            span class="text-sm text-gray-500 dark:text-gray-400"
                            { (format_share(total.amount, total_expenses)) }

                            span class="tabular-nums font-medium" data-category-amount="true"
                            { (format_currency(total.amount)) }
                        }
                    }
                }
            }
        }
    }
}
