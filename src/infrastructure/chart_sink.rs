use std::io::Write;

use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::domain::chart::{ChartFrame, ChartSink};
use crate::domain::error::{AppError, Result};

/// Writes every frame as one JSON line for a front end to consume
pub struct JsonChartSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonChartSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, value: serde_json::Value) -> Result<()> {
        let line = serde_json::to_string(&value)
            .map_err(|e| AppError::IoError(format!("Failed to serialize chart frame: {}", e)))?;
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> ChartSink for JsonChartSink<W> {
    fn render(&mut self, session_id: Uuid, frame: ChartFrame) -> Result<()> {
        debug!(session_id = %session_id, "Writing chart frame");
        self.write_line(json!({
            "session_id": session_id.to_string(),
            "frame": frame,
        }))
    }

    fn teardown(&mut self, session_id: Uuid) -> Result<()> {
        self.write_line(json!({
            "session_id": session_id.to_string(),
            "teardown": true,
        }))
    }
}
