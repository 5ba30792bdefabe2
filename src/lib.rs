//! certstat: statistics charting engine for a certification dashboard.
//!
//! The crate keeps a strict split between pure math (`core`), payload
//! projection (`stats`), backend-agnostic drawing (`render`) and the
//! event-driven chart/selection layer (`api`).

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod stats;
pub mod telemetry;

pub use api::{BarChart, Dashboard, DashboardConfig, LineChart, SelectionController};
pub use error::{ChartError, ChartResult, LoadError};
