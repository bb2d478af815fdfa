pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::catalog::StaticCatalog;
pub use adapters::http::HttpDispatchClient;
pub use app::locator::Locator;
pub use config::{AppConfig, OutputFormat};
pub use crate::core::{dispatch::DispatchService, ranking::ProximityRanker, watch::WatchThrottle};
pub use domain::model::{Coordinate, Credential, RankedResult, ResourceUnit, ServiceLocation};
pub use utils::error::{LocatorError, Result};
