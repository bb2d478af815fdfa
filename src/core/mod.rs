pub mod dispatch;
pub mod distance;
pub mod ranking;
pub mod watch;

pub use crate::domain::model::{
    Advisory, Coordinate, Credential, PositionReading, RankedResult, RankingUpdate,
};
pub use crate::domain::ports::{CatalogProvider, ConfigProvider, Notifier, PositionSource};
pub use crate::utils::error::Result;
