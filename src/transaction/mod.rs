//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - The `TransactionStore` that owns the collection and persists every change
//! - Pure aggregations used by the dashboard and the transaction list
//! - View and endpoint handlers for transaction-related web pages

mod aggregation;
mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod edit_endpoint;
mod form;
mod store;
mod transactions_page;
mod view;

pub use aggregation::{
    CategoryTotal, DayGroup, Totals, filter_by_month, group_by_date, monthly_expenses,
    sum_by_category, totals_by_type,
};
pub use core::{
    CategoryName, DEFAULT_CATEGORIES, Transaction, TransactionBuilder, TransactionId,
    TransactionType,
};
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_create_transaction_page;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use store::{RowsAffected, TransactionStore};
pub use transactions_page::get_transactions_page;
