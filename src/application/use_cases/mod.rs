pub mod analysis_session;
pub mod column_projector;
pub mod feature_summarizer;
pub mod geo_extractor;
pub mod group_aggregator;
pub mod hexbin;
pub mod pairwise_analyzer;
pub mod statistics;
