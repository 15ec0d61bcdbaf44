pub mod use_cases;

pub use use_cases::analysis_session::{AnalysisSession, SessionHost};
pub use use_cases::column_projector::{distinct_by, project, project_column};
pub use use_cases::feature_summarizer::FeatureSummarizer;
pub use use_cases::geo_extractor::extract_coordinates;
pub use use_cases::group_aggregator::GroupAggregator;
pub use use_cases::pairwise_analyzer::PairwiseAnalyzer;
