//! # Cradle
//!
//! Infant-care log dashboard core: the contract with the analysis backend and
//! everything the dashboard does with its answers before anything is drawn.
//!
//! ## Features
//!
//! - **Typed API contract**: every backend endpoint behind one [`api::CareApi`] trait
//! - **One fetch-state machine**: `Loading → Ready | Empty | Error` for every page
//! - **Null-safe metrics**: missing or `null` numbers become `0`, never `NaN`
//! - **Chart shaping**: time series, 24-hour distributions, scatter points, heat-map colours
//!
//! ## Modules
//!
//! - [`api`]: endpoint paths, wire types and the HTTP client
//! - [`view`]: view states and the fetch cycle that drives them
//! - [`pages`]: per-page fetch sequences and view models
//! - [`charts`]: chart-ready records and colour scales
//! - [`metrics`]: unit conversions, rates and display formatting
//! - [`shell`]: route table and sidebar state
//! - [`config`]: TOML + environment configuration (native only)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cradle::api::HttpClient;
//! use cradle::view::{drive, FetchTracker};
//!
//! #[tokio::main]
//! async fn main() {
//!     let api = HttpClient::new("http://localhost:5000/api");
//!     let tracker = FetchTracker::new();
//!
//!     let state = drive(
//!         &tracker,
//!         |s| println!("{}", s.label()),
//!         cradle::pages::dashboard::load(&api),
//!     )
//!     .await;
//!
//!     if let Some(dashboard) = state.as_ref().and_then(|s| s.ready()) {
//!         for card in &dashboard.cards {
//!             println!("{}: {}", card.label, card.value);
//!         }
//!     }
//! }
//! ```

pub mod api;
pub mod charts;
#[cfg(feature = "native")]
pub mod config;
pub mod metrics;
pub mod pages;
pub mod shell;
pub mod view;

pub use api::{CareApi, ClientError, ClientResult};
pub use view::{Loaded, ViewState};
