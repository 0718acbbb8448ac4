use rusqlite::Connection;

use crate::{AppState, SQLiteStorage, Transaction, TransactionBuilder};

pub(crate) fn get_test_state() -> AppState {
    let connection = Connection::open_in_memory().unwrap();
    AppState::new(SQLiteStorage::new(connection).unwrap(), "Etc/UTC")
}

/// Create a state whose store already holds `transactions`, in order.
pub(crate) fn get_test_state_with(
    transactions: impl IntoIterator<Item = TransactionBuilder>,
) -> (AppState, Vec<Transaction>) {
    let state = get_test_state();

    let created = {
        let mut store = state.store.lock().unwrap();
        transactions
            .into_iter()
            .map(|builder| store.create(builder).unwrap())
            .collect()
    };

    (state, created)
}
