// ============================================================
// TABLE DOMAIN LAYER
// ============================================================
// Core types and value objects for tabular analysis
// No I/O, no async

mod analysis_config;
mod column_value;
mod dataset;
mod schema;
mod summaries;

pub use analysis_config::{AnalysisConfig, Delimiter};
pub use column_value::{coerce, CoercionPolicy, ColumnValue};
pub use dataset::{Dataset, Row};
pub use schema::{ColumnId, Schema};
pub use summaries::{
    CategoryAggregate, Coordinate, FeatureSummary, FrequencyEntry, HexBin, HistogramBin,
    PairMatrix, PairOutcome, PairwiseSummary, Quartiles,
};
