// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Source fetching, encoding detection and CSV parsing

mod csv_loader;
mod source;

pub use csv_loader::CsvLoader;
pub use source::{DataSource, DefaultFetcher, SourceFetcher};
