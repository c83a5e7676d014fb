//! Keyword research and campaign-structure planning: ad-group
//! classification, Performance Max themes, Shopping bids and budget views.
//!
//! Everything here is synchronous and free of side effects apart from
//! `tracing` output, so the same request always yields the same plan.

pub mod bids;
pub mod budget;
pub mod catalog;
pub mod classifier;
pub mod generator;
pub mod research;
pub mod themes;

pub use bids::BidPolicy;
pub use budget::BudgetBreakdown;
pub use generator::PlanGenerator;
pub use research::{KeywordFilter, ShoppingOverview};
