//! Aggregated reports over the recorded transactions.
//!
//! This module contains:
//! - Pure aggregation functions used by the dashboard and the history table
//! - Chart generation for the dashboard
//! - The route handler for the dashboard page

mod aggregation;
mod cards;
mod charts;
mod handlers;

pub use aggregation::sorted_history;
pub use handlers::get_dashboard_page;
