//! Exploratory analysis of delimited tabular data.
//!
//! A [`CsvLoader`] turns a file or URL into a [`Dataset`] of raw string
//! cells. The use cases in [`application`] project columns, summarize a
//! single feature, relate pairs of numeric columns, extract coordinates and
//! aggregate categories. A [`SessionHost`] ties one loaded dataset to a
//! [`ChartSink`] that receives finished chart frames.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{
    distinct_by, extract_coordinates, project, project_column, AnalysisSession,
    FeatureSummarizer, GroupAggregator, PairwiseAnalyzer, SessionHost,
};
pub use domain::chart::{ChartFrame, ChartSink};
pub use domain::error::{AppError, Result};
pub use domain::table::{
    coerce, AnalysisConfig, CategoryAggregate, CoercionPolicy, ColumnValue, Coordinate, Dataset,
    Delimiter, FeatureSummary, FrequencyEntry, HexBin, HistogramBin, PairMatrix, PairOutcome,
    PairwiseSummary, Quartiles, Schema,
};
pub use infrastructure::bootstrap::init_tracing;
pub use infrastructure::chart_sink::JsonChartSink;
pub use infrastructure::config::ConfigService;
pub use infrastructure::csv::{CsvLoader, DataSource, DefaultFetcher, SourceFetcher};
