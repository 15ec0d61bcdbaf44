// ============================================================
// CSV LOADER
// ============================================================
// Fetch a source, decode it and parse it into a Dataset

use std::sync::Arc;

use csv::{ReaderBuilder, Trim};
use encoding_rs::{UTF_8, WINDOWS_1252};
use tracing::{info, warn};

use super::source::{DataSource, DefaultFetcher, SourceFetcher};
use crate::domain::error::{AppError, Result};
use crate::domain::table::{AnalysisConfig, Dataset, Delimiter, Schema};

/// Tabular loader for delimited text with a header row
pub struct CsvLoader {
    /// Delimiter setting (default: comma)
    delimiter: Delimiter,

    fetcher: Arc<dyn SourceFetcher>,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Comma,
            fetcher: Arc::new(DefaultFetcher::new()),
        }
    }
}

impl CsvLoader {
    /// Create a new loader with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::default().with_delimiter(config.delimiter)
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Swap the fetcher (tests, custom transports)
    pub fn with_fetcher(mut self, fetcher: Arc<dyn SourceFetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Fetch and parse `source`. Resolves only once the whole source is parsed.
    pub async fn load(&self, source: &DataSource) -> Result<Dataset> {
        info!(source = %source, "Loading dataset");

        let bytes = self.fetcher.fetch(source).await?;
        let content = Self::decode(&bytes);

        let dataset = self.parse_content(&content).map_err(|err| match err {
            AppError::ParseError(msg) => AppError::ParseError(format!("{}: {}", source, msg)),
            other => other,
        })?;

        info!(
            source = %source,
            rows = dataset.len(),
            columns = dataset.columns().len(),
            "Dataset loaded"
        );
        Ok(dataset)
    }

    /// Parse CSV content from string
    pub fn parse_content(&self, content: &str) -> Result<Dataset> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let delimiter = self
            .delimiter
            .byte()
            .unwrap_or_else(|| Self::detect_delimiter(content));

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(Trim::None)
            .has_headers(true)
            .flexible(true) // Short and long rows are normalized below
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        if headers.is_empty() {
            return Err(AppError::ParseError("Missing header row".to_string()));
        }

        let width = headers.len();
        let mut records = Vec::new();

        // Empty lines never reach here; the reader skips them
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            if record.len() > width {
                warn!(
                    row = index + 1,
                    fields = record.len(),
                    columns = width,
                    "Dropping fields beyond the header"
                );
            }

            records.push(record.iter().take(width).map(str::to_string).collect());
        }

        if records.is_empty() {
            return Err(AppError::ParseError(
                "Source contains no data rows".to_string(),
            ));
        }

        let schema = Schema::new(headers.iter().map(str::to_string).collect())?;
        Ok(Dataset::new(schema, records))
    }

    /// UTF-8 (BOM stripped), falling back to Windows-1252
    fn decode(bytes: &[u8]) -> String {
        let (text, _, had_errors) = UTF_8.decode(bytes);
        if !had_errors {
            return text.into_owned();
        }

        warn!("Source is not valid UTF-8, decoding as Windows-1252");
        let (text, _, _) = WINDOWS_1252.decode(bytes);
        text.into_owned()
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe)
    pub fn detect_delimiter(content: &str) -> u8 {
        let candidates = [b',', b';', b'\t', b'|'];
        let sample_lines: Vec<_> = content
            .lines()
            .filter(|line| !line.is_empty())
            .take(10)
            .collect();

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        if sample_lines.is_empty() {
            return best_delimiter;
        }

        for &delimiter in &candidates {
            let field_counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| line.bytes().filter(|&b| b == delimiter).count())
                .collect();

            // Score by consistency (low standard deviation) and frequency
            let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
            let variance = field_counts
                .iter()
                .map(|&x| (x as f32 - avg).powi(2))
                .sum::<f32>()
                / field_counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());

            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_simple_csv() {
        let content = "name,age,city\nAlice,30,NYC\nBob,25,LA";
        let dataset = CsvLoader::new().parse_content(content).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.columns(), &["name", "age", "city"]);
        assert_eq!(dataset.values_by_name("name"), Some(vec!["Alice", "Bob"]));
    }

    #[test]
    fn test_blank_lines_skipped_and_short_rows_padded() {
        let content = "a,b,c\n1,2,3\n\n4,5\n\n";
        let dataset = CsvLoader::new().parse_content(content).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.values_by_name("c"), Some(vec!["3", ""]));
    }

    #[test]
    fn test_quoted_empty_cell_is_a_row() {
        let content = "a\n1\n\"\"\n2\n";
        let dataset = CsvLoader::new().parse_content(content).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.values_by_name("a"), Some(vec!["1", "", "2"]));

        let summary = crate::application::FeatureSummarizer::default()
            .summarize_column(&dataset, "a")
            .unwrap();
        assert_eq!(summary.missing_count, 1);
    }

    #[test]
    fn test_extra_fields_dropped() {
        let content = "a,b\n1,2,3";
        let dataset = CsvLoader::new().parse_content(content).unwrap();

        assert_eq!(dataset.rows()[0].cells(), &["1", "2"]);
    }

    #[test]
    fn test_quoted_fields_keep_delimiters_and_newlines() {
        let content = "title,notes\n\"Smith, J\",\"line one\nline two\"\n";
        let dataset = CsvLoader::new().parse_content(content).unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.values_by_name("title"), Some(vec!["Smith, J"]));
        assert_eq!(
            dataset.values_by_name("notes"),
            Some(vec!["line one\nline two"])
        );
    }

    #[test]
    fn test_whitespace_is_preserved() {
        let content = "a\n 1 \n";
        let dataset = CsvLoader::new().parse_content(content).unwrap();

        assert_eq!(dataset.values_by_name("a"), Some(vec![" 1 "]));
    }

    #[test]
    fn test_header_only_is_parse_error() {
        let err = CsvLoader::new().parse_content("a,b,c\n").unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }

    #[test]
    fn test_empty_content_is_parse_error() {
        let err = CsvLoader::new().parse_content("").unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }

    #[test]
    fn test_duplicate_header_is_parse_error() {
        let err = CsvLoader::new().parse_content("a,a\n1,2").unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(CsvLoader::detect_delimiter("a,b,c\nd,e,f"), b',');
        assert_eq!(CsvLoader::detect_delimiter("a;b;c\nd;e;f"), b';');
        assert_eq!(CsvLoader::detect_delimiter("a\tb\nc\td"), b'\t');
    }

    #[test]
    fn test_auto_delimiter() {
        let loader = CsvLoader::new().with_delimiter(Delimiter::Auto);
        let dataset = loader.parse_content("x;y\n1;2\n3;4").unwrap();

        assert_eq!(dataset.columns(), &["x", "y"]);
        assert_eq!(dataset.values_by_name("y"), Some(vec!["2", "4"]));
    }

    #[test]
    fn test_decode_falls_back_to_windows_1252() {
        let bytes = b"name\nCaf\xe9\n";
        assert_eq!(CsvLoader::decode(bytes), "name\nCaf\u{e9}\n");
    }

    #[test]
    fn test_decode_strips_bom() {
        let bytes = b"\xef\xbb\xbfname\nx\n";
        assert_eq!(CsvLoader::decode(bytes), "name\nx\n");
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Latitude,Longitude\n51.5,-0.1\n").unwrap();

        let source = DataSource::File(file.path().to_path_buf());
        let dataset = CsvLoader::new().load(&source).await.unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.values_by_name("Latitude"), Some(vec!["51.5"]));
    }

    #[tokio::test]
    async fn test_load_unreachable_source() {
        let source = DataSource::parse("/no/such/dir/Accidents.csv").unwrap();
        let err = CsvLoader::new().load(&source).await.unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }
}
