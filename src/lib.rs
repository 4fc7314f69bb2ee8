pub mod config;
pub mod constants;
pub mod error;
pub mod fallback;
pub mod logging;
pub mod pipeline;
pub mod server;

// Metrics recording and exposition
pub mod observability;

// Load use case and its ports, adapters behind them
pub mod app;
pub mod infra;

// Board state, controls and table rendering
pub mod presentation;
