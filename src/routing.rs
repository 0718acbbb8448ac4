//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post, put},
};

use crate::{
    AppState,
    dashboard::get_dashboard_page,
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_create_transaction_page, get_transactions_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_create_transaction_page),
        )
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            put(edit_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}


#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use time::macros::date;

    use crate::{
        build_router, endpoints,
        endpoints::format_endpoint,
        test_utils::{get_test_state, get_test_state_with},
        transaction::{CategoryName, Transaction, TransactionType},
    };

    fn lunch_form() -> [(&'static str, &'static str); 5] {
        [
            ("type_", "expense"),
            ("amount", "50"),
            ("category", "Food"),
            ("date", "2024-03-01"),
            ("description", "Lunch"),
        ]
    }

    #[tokio::test]
    async fn pages_render() {
        let server = TestServer::new(build_router(get_test_state()))
            .expect("Could not create test server.");

        for path in [
            endpoints::DASHBOARD_VIEW,
            endpoints::TRANSACTIONS_VIEW,
            endpoints::NEW_TRANSACTION_VIEW,
        ] {
            server.get(path).await.assert_status_ok();
        }
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let server = TestServer::new(build_router(get_test_state()))
            .expect("Could not create test server.");

        server
            .get("/does/not/exist")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn error_page_is_internal_server_error() {
        let server = TestServer::new(build_router(get_test_state()))
            .expect("Could not create test server.");

        server
            .get(endpoints::INTERNAL_ERROR_VIEW)
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn created_transaction_appears_in_list() {
        let state = get_test_state();
        let server =
            TestServer::new(build_router(state.clone())).expect("Could not create test server.");

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .form(&lunch_form())
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(
            response.header("hx-redirect"),
            "/transactions?month=2024-03"
        );
        let store = state.store.lock().unwrap();
        assert_eq!(store.transactions().len(), 1);
        assert_eq!(store.transactions()[0].description, "Lunch");
    }

    #[tokio::test]
    async fn invalid_amount_is_bad_request() {
        let state = get_test_state();
        let server =
            TestServer::new(build_router(state.clone())).expect("Could not create test server.");
        let mut form = lunch_form();
        form[1] = ("amount", "-5");

        server
            .post(endpoints::TRANSACTIONS_API)
            .form(&form)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        assert!(state.store.lock().unwrap().transactions().is_empty());
    }

    #[tokio::test]
    async fn update_and_delete_by_id() {
        let (state, transactions) = get_test_state_with([Transaction::build(
            TransactionType::Expense,
            10.0,
            date!(2024 - 03 - 01),
            "Snack",
        )
        .category(CategoryName::new_unchecked("Food"))]);
        let server =
            TestServer::new(build_router(state.clone())).expect("Could not create test server.");
        let path = format_endpoint(endpoints::TRANSACTION, transactions[0].id);

        server
            .put(&path)
            .form(&lunch_form())
            .await
            .assert_status(StatusCode::SEE_OTHER);
        assert_eq!(
            state.store.lock().unwrap().transactions()[0].description,
            "Lunch"
        );

        server
            .delete(&path)
            .await
            .assert_status(StatusCode::SEE_OTHER);
        assert!(state.store.lock().unwrap().transactions().is_empty());

        server
            .delete(&path)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
