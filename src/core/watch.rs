use crate::core::distance::haversine_km;
use crate::core::ranking::ProximityRanker;
use crate::domain::model::{PositionReading, RankingUpdate};
use crate::domain::ports::{CatalogProvider, PositionSource};
use crate::utils::error::Result;
use std::time::Duration;

pub const DEFAULT_WATCH_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_DISTANCE_FILTER_METERS: f64 = 10.0;

/// 位置更新節流：移動足夠距離或經過足夠時間才重新計算
#[derive(Debug, Clone)]
pub struct WatchThrottle {
    interval: Duration,
    distance_filter_meters: f64,
    last_accepted: Option<PositionReading>,
}

impl WatchThrottle {
    pub fn new(interval: Duration, distance_filter_meters: f64) -> Self {
        Self {
            interval,
            distance_filter_meters,
            last_accepted: None,
        }
    }

    pub fn accept(&mut self, reading: &PositionReading) -> bool {
        let accepted = match &self.last_accepted {
            None => true,
            Some(last) => {
                let moved_meters = haversine_km(last.coordinate, reading.coordinate) * 1000.0;
                // 時間倒退（來源時鐘調整）視為 0
                let elapsed = (reading.recorded_at - last.recorded_at)
                    .to_std()
                    .unwrap_or(Duration::ZERO);
                moved_meters >= self.distance_filter_meters || elapsed >= self.interval
            }
        };

        if accepted {
            self.last_accepted = Some(*reading);
        }
        accepted
    }
}

impl Default for WatchThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_WATCH_INTERVAL, DEFAULT_DISTANCE_FILTER_METERS)
    }
}

/// 位置監看迴圈：每個被接受的讀數觸發一次完整的重新計算，
/// 計算完成後才讀取下一筆。
pub struct LocationWatch<'a, C: CatalogProvider> {
    ranker: &'a ProximityRanker<C>,
    throttle: WatchThrottle,
}

impl<'a, C: CatalogProvider> LocationWatch<'a, C> {
    pub fn new(ranker: &'a ProximityRanker<C>, throttle: WatchThrottle) -> Self {
        Self { ranker, throttle }
    }

    /// 回傳重新計算的次數；定位被拒絕或 sink 失敗時立即停止並回傳錯誤
    pub async fn run<P, F>(&mut self, source: &mut P, mut sink: F) -> Result<usize>
    where
        P: PositionSource,
        F: FnMut(RankingUpdate) -> Result<()>,
    {
        let mut recomputations = 0;

        while let Some(reading) = source.next_reading().await {
            let reading = match reading {
                Ok(reading) => reading,
                Err(e) => {
                    tracing::error!("❌ Location watch stopped: {}", e);
                    return Err(e);
                }
            };

            if !self.throttle.accept(&reading) {
                tracing::debug!("Skipping reading at {}", reading.coordinate);
                continue;
            }

            recomputations += 1;
            if let Err(e) = sink(self.ranker.refresh(reading.coordinate)) {
                tracing::error!(
                    "❌ Location watch stopped after {} update(s): {}",
                    recomputations,
                    e
                );
                return Err(e);
            }
        }

        tracing::info!("Location watch finished after {} update(s)", recomputations);
        Ok(recomputations)
    }
}
