//! Dashboard HTTP handler and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the monthly dashboard
//! - HTML view functions for rendering the dashboard UI
//! - The state and query types used by the handler

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    app_state::lock_store,
    dashboard::{
        cards::{all_time_totals_view, category_breakdown_view, totals_cards_view},
        charts::{
            DashboardChart, category_chart, charts_script, charts_view, expenses_over_time_chart,
        },
    },
    endpoints,
    html::{BUTTON_SECONDARY_STYLE, HeadElement, PAGE_CONTAINER_STYLE, base, link},
    month::YearMonth,
    navigation::NavBar,
    timezone::local_today,
    transaction::{
        CategoryTotal, Totals, Transaction, TransactionStore, filter_by_month, monthly_expenses,
        sum_by_category, totals_by_type,
    },
};

/// How many months the expenses over time chart covers, including the selected month.
const TREND_MONTHS: usize = 6;

const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The store holding the transactions to summarise.
    pub store: Arc<Mutex<TransactionStore>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters for the dashboard page.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// The month to summarise, defaults to the current month.
    pub month: Option<YearMonth>,
}

/// Holds all the data needed to render the dashboard for one month.
struct DashboardData {
    month: YearMonth,
    totals: Totals,
    all_time_totals: Totals,
    category_totals: Vec<CategoryTotal>,
    charts: Vec<DashboardChart>,
}

/// Display a page with an overview of a month's transactions.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, Error> {
    let month = match query.month {
        Some(month) => month,
        None => YearMonth::of(local_today(&state.local_timezone)?),
    };

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    let data = {
        let store = lock_store(&state.store)?;
        let transactions = store.transactions();

        if transactions.is_empty() {
            return Ok(dashboard_no_data_view(nav_bar).into_response());
        }

        build_dashboard_data(transactions, month)
    };

    Ok(dashboard_view(nav_bar, &data).into_response())
}

fn build_dashboard_data(
    transactions: &[Transaction],
    month: YearMonth,
) -> DashboardData {
    let month_transactions = filter_by_month(transactions, month);
    let totals = totals_by_type(&month_transactions);
    let category_totals = sum_by_category(&month_transactions);
    let trend = monthly_expenses(transactions, month, TREND_MONTHS);

    let mut charts = Vec::with_capacity(2);

    if !category_totals.is_empty() {
        charts.push(DashboardChart {
            id: "category-chart",
            options: category_chart(month, &category_totals).to_string(),
        });
    }

    charts.push(DashboardChart {
        id: "expenses-chart",
        options: expenses_over_time_chart(&trend).to_string(),
    });

    DashboardData {
        month,
        totals,
        all_time_totals: totals_by_type(transactions),
        category_totals,
        charts,
    }
}

fn dashboard_url(month: YearMonth) -> String {
    format!("{}?month={month}", endpoints::DASHBOARD_VIEW)
}

/// Renders the dashboard page when no transaction data exists.
fn dashboard_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "add a transaction");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
            data-empty-state="true"
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Charts will show up here once you " (new_transaction_link) "."
            }
        }
    );

    base("Dashboard", &[], &content)
}

fn month_heading(month: YearMonth) -> Markup {
    html! {
        div class="w-full flex items-center justify-between gap-4 mb-4"
        {
            a
                href=(dashboard_url(month.previous()))
                class=(BUTTON_SECONDARY_STYLE)
                aria-label="Previous month"
            { "‹" }

            h1 class="text-2xl font-bold" { (month.long_label()) }

            a
                href=(dashboard_url(month.next()))
                class=(BUTTON_SECONDARY_STYLE)
                aria-label="Next month"
            { "›" }
        }
    }
}

fn dashboard_view(nav_bar: NavBar, data: &DashboardData) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div
                id="dashboard-content"
                class="w-full max-w-screen-xl flex flex-col items-center"
            {
                (month_heading(data.month))
                (totals_cards_view(&data.totals))
                (all_time_totals_view(&data.all_time_totals))
                (charts_view(&data.charts))
                (category_breakdown_view(&data.category_totals, data.totals.expenses))
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_URL.to_owned()),
        charts_script(&data.charts),
    ];

    base("Dashboard", &scripts, &content)
}
