//! COVID-19 statistics dashboard core.
//!
//! Fetches worldwide, per-country and historical totals from the disease.sh
//! API, shapes them into a country catalog and a sorted table, and keeps the
//! selected region and statistic in a single-owner store whose region results
//! are generation-checked.

pub mod api;
pub mod catalog;
pub mod chart;
pub mod config;
pub mod constants;
pub mod covid;
pub mod error;
pub mod format;
pub mod map;
pub mod model;
pub mod render;
pub mod session;
pub mod source;
pub mod store;

pub use api::DiseaseClient;
pub use config::TrackerConfig;
pub use error::TrackerError;
pub use model::{Region, Snapshot, StatKind};
pub use session::Session;
pub use source::StatsSource;
pub use store::{Dashboard, Outcome};
