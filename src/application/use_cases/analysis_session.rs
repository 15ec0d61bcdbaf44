// ============================================================
// ANALYSIS SESSION USE CASE
// ============================================================
// Own one loaded dataset, run analyses on it and hand complete
// chart frames to the sink

use tracing::{info, warn};
use uuid::Uuid;

use super::column_projector::distinct_by;
use super::feature_summarizer::FeatureSummarizer;
use super::geo_extractor::extract_coordinates;
use super::group_aggregator::GroupAggregator;
use super::pairwise_analyzer::PairwiseAnalyzer;
use crate::domain::chart::{ChartFrame, ChartSink};
use crate::domain::error::{AppError, Result};
use crate::domain::table::{
    AnalysisConfig, CategoryAggregate, Coordinate, Dataset, FeatureSummary, PairMatrix,
    PairOutcome,
};
use crate::infrastructure::csv::{CsvLoader, DataSource};

/// A loaded dataset plus the configuration every analysis on it uses
pub struct AnalysisSession {
    id: Uuid,
    source: DataSource,
    dataset: Dataset,
    config: AnalysisConfig,
}

impl AnalysisSession {
    /// Load `source` and start a session on it
    pub async fn open(source: DataSource, config: AnalysisConfig) -> Result<Self> {
        config.ensure_valid()?;
        let dataset = CsvLoader::from_config(&config).load(&source).await?;
        Ok(Self::from_dataset(source, dataset, config))
    }

    pub fn from_dataset(source: DataSource, dataset: Dataset, config: AnalysisConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            dataset,
            config,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn feature(&self, column: &str) -> Result<FeatureSummary> {
        FeatureSummarizer::new(self.config.clone()).summarize_column(&self.dataset, column)
    }

    pub fn pairs<S: AsRef<str>>(&self, columns: &[S]) -> Result<PairMatrix> {
        PairwiseAnalyzer::new(self.config.clone()).analyze_all_pairs(&self.dataset, columns)
    }

    pub fn coordinates(&self) -> Vec<Coordinate> {
        extract_coordinates(&self.dataset, &self.config)
    }

    /// Counts per category, plus the mean of `target` when given
    pub fn categories(&self, category: &str, target: Option<&str>) -> Result<Vec<CategoryAggregate>> {
        let aggregator = GroupAggregator::new(self.config.clone());
        match target {
            Some(target) => aggregator.mean_by(&self.dataset, category, target),
            None => aggregator.count_by(&self.dataset, category),
        }
    }

    pub fn distinct<S: AsRef<str>>(&self, key: &str, columns: &[S]) -> Result<Dataset> {
        distinct_by(&self.dataset, key, columns)
    }
}

/// Owns the chart sink and at most one session.
///
/// Opening a new source replaces the current session only after the load
/// succeeded; the replaced session is torn down on the sink first. Every
/// render computes its frame completely before the sink sees it.
pub struct SessionHost<S: ChartSink> {
    sink: S,
    loader: CsvLoader,
    config: AnalysisConfig,
    session: Option<AnalysisSession>,
}

impl<S: ChartSink> SessionHost<S> {
    pub fn new(sink: S, config: AnalysisConfig) -> Result<Self> {
        config.ensure_valid()?;
        Ok(Self {
            sink,
            loader: CsvLoader::from_config(&config),
            config,
            session: None,
        })
    }

    pub fn with_loader(mut self, loader: CsvLoader) -> Self {
        self.loader = loader;
        self
    }

    pub fn session(&self) -> Option<&AnalysisSession> {
        self.session.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Load `identifier` (path or URL) and make it the current session
    pub async fn open(&mut self, identifier: &str) -> Result<Uuid> {
        let source = DataSource::parse(identifier)?;
        let dataset = match self.loader.load(&source).await {
            Ok(dataset) => dataset,
            Err(err) => {
                warn!(source = %source, error = %err, "Load failed, keeping current session");
                return Err(err);
            }
        };

        let session = AnalysisSession::from_dataset(source, dataset, self.config.clone());
        if let Err(err) = self.close() {
            warn!(error = %err, "Teardown failed, keeping current session");
            return Err(err);
        }

        info!(
            session_id = %session.id(),
            source = %session.source(),
            rows = session.dataset().len(),
            "Analysis session opened"
        );

        let id = session.id();
        self.session = Some(session);
        Ok(id)
    }

    /// Tear down the current session, if any. The session is only dropped
    /// once the sink released it.
    pub fn close(&mut self) -> Result<()> {
        if let Some(previous) = &self.session {
            info!(session_id = %previous.id(), "Tearing down analysis session");
            self.sink.teardown(previous.id())?;
        }
        self.session = None;
        Ok(())
    }

    pub fn render_feature(&mut self, column: &str) -> Result<()> {
        let outcome = self.current()?.feature(column).map(ChartFrame::Feature);
        self.deliver(outcome)
    }

    pub fn render_pairs<C: AsRef<str>>(&mut self, columns: &[C]) -> Result<()> {
        let session = self.current()?;
        let schema = session.dataset().schema();
        let outcome = schema.resolve_all(columns).and_then(|ids| {
            let resolved: Vec<String> = ids.iter().map(|&id| schema.name(id).to_string()).collect();
            if resolved.len() < 2 {
                return Err(AppError::InsufficientData {
                    required: 2,
                    found: resolved.len(),
                    context: "pairwise analysis (distinct columns)".to_string(),
                });
            }

            let outcomes = session.pairs(&resolved)?;
            if let [PairOutcome::InsufficientData {
                column_a,
                column_b,
                found,
            }] = outcomes.as_slice()
            {
                return Err(AppError::InsufficientData {
                    required: 2,
                    found: *found,
                    context: format!("correlation of \"{}\" and \"{}\"", column_a, column_b),
                });
            }
            Ok(ChartFrame::Pairs {
                columns: resolved,
                outcomes,
            })
        });
        self.deliver(outcome)
    }

    /// An empty coordinate list is still rendered (basemap without points)
    pub fn render_map(&mut self) -> Result<()> {
        let coordinates = self.current()?.coordinates();
        self.deliver(Ok(ChartFrame::Map { coordinates }))
    }

    pub fn render_categories(&mut self, category: &str, target: Option<&str>) -> Result<()> {
        let outcome = self
            .current()?
            .categories(category, target)
            .map(|aggregates| ChartFrame::Categories {
                category: category.to_string(),
                target: target.map(str::to_string),
                aggregates,
            });
        self.deliver(outcome)
    }

    fn current(&self) -> Result<&AnalysisSession> {
        self.session
            .as_ref()
            .ok_or_else(|| AppError::ValidationError("No dataset loaded".to_string()))
    }

    /// Hand a computed frame to the sink. Insufficient data becomes a notice
    /// frame; every other error leaves the sink untouched.
    fn deliver(&mut self, outcome: Result<ChartFrame>) -> Result<()> {
        let session_id = self.current()?.id();
        let frame = match outcome {
            Ok(frame) => frame,
            Err(err @ AppError::InsufficientData { .. }) => ChartFrame::InsufficientData {
                message: err.to_string(),
            },
            Err(err) => return Err(err),
        };
        self.sink.render(session_id, frame)
    }
}
