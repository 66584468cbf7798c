//! jrp-core: random Japanese phrase generation backed by a local history store
//!
//! This crate provides the core functionality for sampling two-part phrases
//! from the Japanese WordNet database and for persisting, querying, favoriting
//! and deleting generated phrases.

pub mod config;
pub mod db;
pub mod download;
pub mod error;
pub mod generator;
pub mod models;
pub mod schema;
pub mod service;
pub mod version;
pub mod wordnet;

pub use config::Config;
pub use db::Database;
pub use error::Error;
pub use error::Result;
pub use service::HistoryService;

/// Application name used for config directories and paths.
pub const APP_NAME: &str = "jrp";
