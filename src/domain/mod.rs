pub mod chart;
pub mod error;

// Tabular analysis module
pub mod table;
