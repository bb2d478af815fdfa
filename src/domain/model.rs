use crate::utils::error::{LocatorError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 經緯度座標（度）。
///
/// `new` 不做檢查；外部輸入一律經過 `try_new`。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let coordinate = Self::new(latitude, longitude);
        if coordinate.is_valid() {
            Ok(coordinate)
        } else {
            Err(LocatorError::InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitStatus {
    Available,
    Busy,
    #[serde(rename = "Out of Service", alias = "OutOfService")]
    OutOfService,
}

impl UnitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitStatus::Available => "Available",
            UnitStatus::Busy => "Busy",
            UnitStatus::OutOfService => "Out of Service",
        }
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 可派遣的單位（例如一台救護車），只屬於一個服務據點
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceUnit {
    pub id: String,
    pub registration: String,
    pub unit_type: String,
    pub phone: String,
    pub status: UnitStatus,
}

/// 服務據點（醫院），座標固定，擁有一組單位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLocation {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    pub units: Vec<ResourceUnit>,
}

/// 單次查詢的結果：單位欄位 + 所屬據點 + 距離（公里，一位小數）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    pub unit_id: String,
    pub registration: String,
    pub unit_type: String,
    pub phone: String,
    pub status: UnitStatus,
    pub location_id: String,
    pub location_name: String,
    pub coordinate: Coordinate,
    pub distance_km: f64,
}

impl RankedResult {
    pub fn from_unit(unit: &ResourceUnit, location: &ServiceLocation, distance_km: f64) -> Self {
        Self {
            unit_id: unit.id.clone(),
            registration: unit.registration.clone(),
            unit_type: unit.unit_type.clone(),
            phone: unit.phone.clone(),
            status: unit.status,
            location_id: location.id.clone(),
            location_name: location.name.clone(),
            coordinate: location.coordinate,
            distance_km,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == UnitStatus::Available
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionReading {
    pub coordinate: Coordinate,
    pub recorded_at: DateTime<Utc>,
}

impl PositionReading {
    pub fn new(coordinate: Coordinate, recorded_at: DateTime<Utc>) -> Self {
        Self {
            coordinate,
            recorded_at,
        }
    }

    pub fn now(coordinate: Coordinate) -> Self {
        Self::new(coordinate, Utc::now())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Advisory {
    UnableToUpdate,
}

impl Advisory {
    pub fn message(&self) -> &'static str {
        match self {
            Advisory::UnableToUpdate => "Unable to update nearby ambulances",
        }
    }
}

/// 一次重新計算的結果；失敗時 `results` 為空並附帶 advisory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingUpdate {
    pub position: Coordinate,
    pub results: Vec<RankedResult>,
    pub advisory: Option<Advisory>,
}

impl RankingUpdate {
    pub fn is_degraded(&self) -> bool {
        self.advisory.is_some()
    }
}

/// Bearer token，由外部登入流程提供；`Debug` 不輸出內容
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRequest {
    pub phone_number: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReceipt {
    pub status: u16,
    pub body: String,
}
