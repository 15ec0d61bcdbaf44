pub mod bootstrap;
pub mod chart_sink;
pub mod config;
pub mod csv;
