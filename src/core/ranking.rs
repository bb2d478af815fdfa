use crate::core::distance::{haversine_km, round_to_tenth};
use crate::domain::model::{Advisory, Coordinate, RankedResult, RankingUpdate};
use crate::domain::ports::CatalogProvider;
use crate::utils::error::{LocatorError, Result};

pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// 依距離排序半徑內的所有單位。
///
/// 每次呼叫都從頭計算，不保留任何狀態；目錄在整個行程中唯讀。
pub struct ProximityRanker<C: CatalogProvider> {
    catalog: C,
    radius_km: f64,
    available_only: bool,
}

impl<C: CatalogProvider> ProximityRanker<C> {
    pub fn new(catalog: C) -> Self {
        Self::with_radius(catalog, DEFAULT_RADIUS_KM)
    }

    pub fn with_radius(catalog: C, radius_km: f64) -> Self {
        Self {
            catalog,
            radius_km,
            available_only: false,
        }
    }

    pub fn available_only(mut self, available_only: bool) -> Self {
        self.available_only = available_only;
        self
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn rank(&self, position: Coordinate) -> Result<Vec<RankedResult>> {
        if !self.radius_km.is_finite() || self.radius_km < 0.0 {
            return Err(LocatorError::MalformedInput {
                message: format!("radius must be finite and non-negative, got {}", self.radius_km),
            });
        }
        if !position.is_valid() {
            return Err(LocatorError::MalformedInput {
                message: format!("current position {} is out of range", position),
            });
        }

        let mut results = Vec::new();
        for location in self.catalog.locations() {
            if !location.coordinate.is_valid() {
                return Err(LocatorError::MalformedInput {
                    message: format!(
                        "location '{}' has invalid coordinate {}",
                        location.id, location.coordinate
                    ),
                });
            }

            let km = haversine_km(position, location.coordinate);
            if km > self.radius_km {
                continue;
            }

            let distance_km = round_to_tenth(km);
            tracing::debug!("{} is {:.3} km away", location.name, km);
            results.extend(
                location
                    .units
                    .iter()
                    .map(|unit| RankedResult::from_unit(unit, location, distance_km))
                    .filter(|result| !self.available_only || result.is_available()),
            );
        }

        // sort_by 是穩定排序：距離相同時保留目錄順序
        results.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        Ok(results)
    }

    /// 盡力而為的重新計算：任何錯誤都記錄下來並回傳空結果加 advisory
    pub fn refresh(&self, position: Coordinate) -> RankingUpdate {
        match self.rank(position) {
            Ok(results) => {
                tracing::info!(
                    "🚑 {} unit(s) within {} km of {}",
                    results.len(),
                    self.radius_km,
                    position
                );
                RankingUpdate {
                    position,
                    results,
                    advisory: None,
                }
            }
            Err(e) => {
                tracing::error!("❌ Failed to rank nearby units: {}", e);
                RankingUpdate {
                    position,
                    results: Vec::new(),
                    advisory: Some(Advisory::UnableToUpdate),
                }
            }
        }
    }
}
