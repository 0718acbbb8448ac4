//! Defines the route handler for the page that lists a month of transactions grouped by date.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use serde::Deserialize;

use crate::{
    AppState, Error,
    app_state::lock_store,
    endpoints,
    month::YearMonth,
    timezone::local_today,
    transaction::{
        TransactionId, TransactionStore, filter_by_month, group_by_date, totals_by_type,
        view::{TransactionsViewModel, transactions_view},
    },
};

/// The query parameters for the transactions page.
///
/// Also used to build consistent links and redirect URLs to the page.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TransactionsQuery {
    /// The month to show, defaults to the current month.
    pub month: Option<YearMonth>,
    /// The transaction to show in edit mode, if any.
    pub edit: Option<TransactionId>,
}

impl TransactionsQuery {
    fn to_query_string(self) -> String {
        let mut params = Vec::with_capacity(2);

        if let Some(month) = self.month {
            params.push(format!("month={month}"));
        }

        if let Some(id) = self.edit {
            params.push(format!("edit={id}"));
        }

        params.join("&")
    }

    /// The URL of the transactions page with these query parameters.
    pub fn to_url(self) -> String {
        let query = self.to_query_string();

        if query.is_empty() {
            endpoints::TRANSACTIONS_VIEW.to_owned()
        } else {
            format!("{}?{query}", endpoints::TRANSACTIONS_VIEW)
        }
    }
}

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The store holding the transactions to display.
    pub store: Arc<Mutex<TransactionStore>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the transactions for a month grouped by date.
///
/// If `edit` names a transaction in the month, that transaction is shown as
/// an inline form instead of a row.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Response, Error> {
    let month = match query.month {
        Some(month) => month,
        None => YearMonth::of(local_today(&state.local_timezone)?),
    };

    let transactions = {
        let store = lock_store(&state.store)?;
        filter_by_month(store.transactions(), month)
    };

    let model = TransactionsViewModel {
        month,
        totals: totals_by_type(&transactions),
        groups: group_by_date(&transactions),
        editing: query.edit,
        page_url: TransactionsQuery {
            month: Some(month),
            edit: None,
        }
        .to_url(),
    };

    Ok(transactions_view(model).into_response())
}

#[cfg(test)]
mod tests {
    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use axum_extra::extract::Query;
    use time::{Month, OffsetDateTime, macros::date};

    use crate::{
        month::YearMonth,
        test_utils::{
            assert_status_ok, assert_valid_html, get_test_state_with, parse_html_document,
            select_texts,
        },
        transaction::{
            CategoryName, Transaction, TransactionType, get_transactions_page,
            transactions_page::{TransactionsQuery, TransactionsViewState},
        },
    };

    fn get_state() -> (TransactionsViewState, Vec<Transaction>) {
        let (state, transactions) = get_test_state_with([
            Transaction::build(TransactionType::Expense, 50.0, date!(2024 - 03 - 01), "Lunch")
                .category(CategoryName::new_unchecked("Food")),
            Transaction::build(TransactionType::Income, 1000.0, date!(2024 - 03 - 01), "Pay")
                .category(CategoryName::new_unchecked("Salary")),
            Transaction::build(TransactionType::Expense, 9.0, date!(2024 - 03 - 15), "Bus")
                .category(CategoryName::new_unchecked("Transportation")),
            Transaction::build(TransactionType::Expense, 30.0, date!(2024 - 04 - 01), "Movie")
                .category(CategoryName::new_unchecked("Entertainment")),
        ]);

        (
            TransactionsViewState {
                store: state.store,
                local_timezone: state.local_timezone,
            },
            transactions,
        )
    }

    fn march() -> TransactionsQuery {
        TransactionsQuery {
            month: Some(YearMonth::new(2024, Month::March)),
            edit: None,
        }
    }

    #[test]
    fn query_to_url() {
        assert_eq!(TransactionsQuery::default().to_url(), "/transactions");
        assert_eq!(march().to_url(), "/transactions?month=2024-03");
        assert_eq!(
            TransactionsQuery {
                edit: Some(3),
                ..march()
            }
            .to_url(),
            "/transactions?month=2024-03&edit=3"
        );
    }

    #[tokio::test]
    async fn shows_only_transactions_in_month_grouped_by_date() {
        let (state, _) = get_state();

        let response = get_transactions_page(State(state), Query(march()))
            .await
            .unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(
            select_texts(&html, "[data-day-group] h3"),
            vec!["Friday, March 1, 2024", "Friday, March 15, 2024"]
        );
        assert_eq!(
            select_texts(&html, "[data-transaction-row] [data-description]"),
            vec!["Lunch", "Pay", "Bus"]
        );
    }

    #[tokio::test]
    async fn defaults_to_current_month() {
        let (state, _) = get_state();
        let current_month = YearMonth::of(OffsetDateTime::now_utc().date()).to_string();

        let response = get_transactions_page(State(state), Query(TransactionsQuery::default()))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let month_input = html
            .select(&scraper::Selector::parse("input[type=month]").unwrap())
            .next()
            .unwrap();
        assert_eq!(month_input.value().attr("value"), Some(current_month.as_str()));
    }

    #[tokio::test]
    async fn edit_param_shows_one_inline_form() {
        let (state, transactions) = get_state();
        let query = TransactionsQuery {
            edit: Some(transactions[1].id),
            ..march()
        };

        let response = get_transactions_page(State(state), Query(query))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(html.select(&scraper::Selector::parse("form[hx-put]").unwrap()).count(), 1);
        assert_eq!(
            select_texts(&html, "[data-transaction-row] [data-description]"),
            vec!["Lunch", "Bus"]
        );
    }

    #[tokio::test]
    async fn invalid_timezone_is_an_error() {
        let (mut state, _) = get_state();
        state.local_timezone = "Not/AZone".to_owned();

        let Err(error) =
            get_transactions_page(State(state), Query(TransactionsQuery::default())).await
        else {
            panic!("want error for invalid timezone");
        };

        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
