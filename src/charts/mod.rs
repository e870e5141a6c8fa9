//! Chart Data
//!
//! The pure half of the chart primitives: reshaping backend payloads into
//! normalized records, computing axis domains, and heat-map colours.
//! Rendering lives in the UI crate and only ever sees these types.

pub mod color;
pub mod series;

pub use color::{ColorError, HeatScale, Rgb};
pub use series::{
    correlation_points, hourly_distribution, hourly_from_values, labeled_points,
    severity_distribution, zip_series, ChartFrame, CorrelationPoint, DistributionBucket,
    HeatRow, TimeSeriesPoint, HOURS_PER_DAY, SEVERITY_LABELS,
};
