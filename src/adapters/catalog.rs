use crate::domain::model::{Coordinate, ResourceUnit, ServiceLocation, UnitStatus};
use crate::domain::ports::CatalogProvider;
use crate::utils::error::{LocatorError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 唯讀目錄：內建示範資料或 TOML 檔案
#[derive(Debug, Clone, PartialEq)]
pub struct StaticCatalog {
    locations: Vec<ServiceLocation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    locations: Vec<LocationEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LocationEntry {
    id: String,
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    units: Vec<ResourceUnit>,
}

impl From<LocationEntry> for ServiceLocation {
    fn from(entry: LocationEntry) -> Self {
        ServiceLocation {
            id: entry.id,
            name: entry.name,
            coordinate: Coordinate::new(entry.latitude, entry.longitude),
            units: entry.units,
        }
    }
}

impl StaticCatalog {
    pub fn new(locations: Vec<ServiceLocation>) -> Self {
        Self { locations }
    }

    /// 從 TOML 檔案載入目錄
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LocatorError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析目錄並驗證
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile =
            toml::from_str(content).map_err(|e| LocatorError::ConfigValidationError {
                field: "catalog".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        let catalog = Self::new(file.locations.into_iter().map(Into::into).collect());
        catalog.validate()?;
        tracing::debug!(
            "Loaded catalog with {} location(s) and {} unit(s)",
            catalog.locations.len(),
            catalog.unit_count()
        );
        Ok(catalog)
    }

    pub fn builtin() -> Self {
        Self::new(builtin_locations())
    }

    pub fn to_toml_string(&self) -> Result<String> {
        let file = CatalogFile {
            locations: self
                .locations
                .iter()
                .map(|location| LocationEntry {
                    id: location.id.clone(),
                    name: location.name.clone(),
                    latitude: location.coordinate.latitude,
                    longitude: location.coordinate.longitude,
                    units: location.units.clone(),
                })
                .collect(),
        };
        toml::to_string_pretty(&file).map_err(|e| LocatorError::ConfigError {
            message: format!("Failed to serialize catalog: {}", e),
        })
    }
}

impl CatalogProvider for StaticCatalog {
    fn locations(&self) -> &[ServiceLocation] {
        &self.locations
    }
}

impl Validate for StaticCatalog {
    fn validate(&self) -> Result<()> {
        validation::validate_unique_ids(
            "locations.id",
            self.locations.iter().map(|l| l.id.as_str()),
        )?;
        validation::validate_unique_ids(
            "locations.units.id",
            self.locations
                .iter()
                .flat_map(|l| l.units.iter().map(|u| u.id.as_str())),
        )?;

        for location in &self.locations {
            validation::validate_non_empty_string("locations.name", &location.name)?;
            validation::validate_range(
                &format!("locations[{}].latitude", location.id),
                location.coordinate.latitude,
                -90.0,
                90.0,
            )?;
            validation::validate_range(
                &format!("locations[{}].longitude", location.id),
                location.coordinate.longitude,
                -180.0,
                180.0,
            )?;
            for unit in &location.units {
                validation::validate_non_empty_string(
                    &format!("units[{}].phone", unit.id),
                    &unit.phone,
                )?;
            }
        }
        Ok(())
    }
}

fn unit(
    id: &str,
    registration: &str,
    unit_type: &str,
    phone: &str,
    status: UnitStatus,
) -> ResourceUnit {
    ResourceUnit {
        id: id.to_string(),
        registration: registration.to_string(),
        unit_type: unit_type.to_string(),
        phone: phone.to_string(),
        status,
    }
}

fn builtin_locations() -> Vec<ServiceLocation> {
    vec![
        ServiceLocation {
            id: "juja-modern".to_string(),
            name: "Juja Modern Hospital".to_string(),
            coordinate: Coordinate::new(-1.1022, 37.0127),
            units: vec![
                unit(
                    "jmh-01",
                    "KCA 101A",
                    "Advanced Life Support",
                    "+254700100101",
                    UnitStatus::Available,
                ),
                unit(
                    "jmh-02",
                    "KCB 202B",
                    "Basic Life Support",
                    "+254700100102",
                    UnitStatus::Busy,
                ),
            ],
        },
        ServiceLocation {
            id: "thika-level-5".to_string(),
            name: "Thika Level 5 Hospital".to_string(),
            coordinate: Coordinate::new(-1.0964, 37.0372),
            units: vec![unit(
                "tl5-01",
                "KCC 303C",
                "Advanced Life Support",
                "+254700200201",
                UnitStatus::Available,
            )],
        },
        ServiceLocation {
            id: "jkuat-hospital".to_string(),
            name: "JKUAT Hospital".to_string(),
            coordinate: Coordinate::new(-1.0912, 37.0117),
            units: vec![unit(
                "jkh-01",
                "KCD 404D",
                "Patient Transport",
                "+254700300301",
                UnitStatus::Available,
            )],
        },
        ServiceLocation {
            id: "kenyatta-national".to_string(),
            name: "Kenyatta National Hospital".to_string(),
            coordinate: Coordinate::new(-1.3006, 36.8073),
            units: vec![
                unit(
                    "knh-01",
                    "KCE 505E",
                    "Advanced Life Support",
                    "+254700400401",
                    UnitStatus::Available,
                ),
                unit(
                    "knh-02",
                    "KCF 606F",
                    "Critical Care",
                    "+254700400402",
                    UnitStatus::OutOfService,
                ),
            ],
        },
    ]
}
