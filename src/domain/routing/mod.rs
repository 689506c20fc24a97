//! Query routing domain types

mod config;
mod decision;

pub use config::RouterConfig;
pub use decision::{RouteDecision, RouteStrategy};
