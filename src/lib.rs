//! Betting feed parser and over/under goals predictor
//!
//! Turns pasted bookmaker feed text into stored results and fixtures, and
//! predicts goal outcomes for every fixture from the teams' history.
//!
//! ## Architecture
//!
//! ```text
//! Ingester (results / odds text) → Storage (SQLite or memory)
//!                                      ↓
//!              Analysis (team stats) → Model (xG, over-probabilities, decision)
//!                                      ↓
//!                       Pipeline → Server (HTTP API) / CLI
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod ingester;
pub mod model;
pub mod pipeline;
pub mod server;
pub mod storage;
pub mod types;

pub use error::{FeedError, Result};
pub use pipeline::FeedService;
