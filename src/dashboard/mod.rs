//! Dashboard module
//!
//! Provides an overview page for a single month: totals, a breakdown of
//! expenses by category and the trend of expenses over recent months.

mod cards;
mod charts;
mod handlers;

pub use handlers::get_dashboard_page;
