//! Page Controllers
//!
//! The pure half of every page: the fetch sequence against [`CareApi`] and
//! the reshaping of its payloads into a view model. Each loader returns
//! `Loaded::Empty` when the backend has nothing to show and propagates the
//! first failure of a required call.
//!
//! Loaders are run through [`crate::view::drive`], which owns the
//! `Loading → Ready | Empty | Error` transitions.
//!
//! [`CareApi`]: crate::api::CareApi

pub mod dashboard;
pub mod feeding;
pub mod growth;
pub mod sleep;
pub mod upload;
pub mod vomit;

use serde::Serialize;

pub use dashboard::DashboardView;
pub use feeding::FeedingView;
pub use growth::{GrowthMetric, GrowthView, TemperatureSummary};
pub use sleep::SleepView;
pub use upload::{ExportLink, UploadMode, UploadResult};
pub use vomit::{CorrelationRow, VomitView};

/// Labelled scalar shown in a summary card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCard {
    pub label: String,
    pub value: String,
    /// Secondary line, e.g. the range or std
    pub detail: Option<String>,
}

impl SummaryCard {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            detail: None,
        }
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
