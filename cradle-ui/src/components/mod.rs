//! UI Components
//!
//! Reusable Leptos components for the dashboard. None of them fetch or
//! hold asynchronous state.

pub mod charts;
pub mod correlation_table;
pub mod empty_state;
pub mod error_banner;
pub mod loading;
pub mod nav;
pub mod section;
pub mod summary_card;

pub use charts::{BarChart, HeatMap, LineChart, NoData, ScatterChart};
pub use correlation_table::CorrelationTable;
pub use empty_state::EmptyState;
pub use error_banner::ErrorBanner;
pub use loading::{InlineLoading, Loading};
pub use nav::{Header, Sidebar};
pub use section::Section;
pub use summary_card::{SummaryCard, SummaryCards};
