//! Shapes crossing into the rendering layer and the sink that draws them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::Result;
use crate::domain::table::{CategoryAggregate, Coordinate, FeatureSummary, PairOutcome};

/// One fully computed chart payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartFrame {
    Feature(FeatureSummary),
    Pairs {
        columns: Vec<String>,
        outcomes: Vec<PairOutcome>,
    },
    Map {
        coordinates: Vec<Coordinate>,
    },
    Categories {
        category: String,
        target: Option<String>,
        aggregates: Vec<CategoryAggregate>,
    },
    /// Rendered instead of a chart when a statistic lacks data
    InsufficientData { message: String },
}

/// Rendering collaborator owned by a session host.
///
/// Frames are only handed over once completely computed, so a failing
/// request never leaves a half-drawn chart.
pub trait ChartSink {
    fn render(&mut self, session_id: Uuid, frame: ChartFrame) -> Result<()>;

    /// Release everything drawn for `session_id`
    fn teardown(&mut self, session_id: Uuid) -> Result<()>;
}
