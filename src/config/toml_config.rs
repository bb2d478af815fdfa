use crate::adapters::http::DEFAULT_DISPATCH_TIMEOUT;
use crate::core::dispatch::DEFAULT_MAP_LINK_BASE;
use crate::core::ranking::DEFAULT_RADIUS_KM;
use crate::core::watch::{DEFAULT_DISTANCE_FILTER_METERS, DEFAULT_WATCH_INTERVAL};
use crate::core::ConfigProvider;
use crate::utils::error::{LocatorError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub watch: WatchConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    pub radius_km: Option<f64>,
    pub available_only: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatchConfig {
    pub interval_seconds: Option<u64>,
    pub distance_filter_meters: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchConfig {
    pub endpoint: Option<String>,
    pub token: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub map_link_base: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub path: Option<String>,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LocatorError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LocatorError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DISPATCH_TOKEN})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LocatorError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_negative("search.radius_km", self.radius_km())?;
        validation::validate_positive_number(
            "watch.interval_seconds",
            self.watch_interval().as_secs(),
            1,
        )?;
        validation::validate_non_negative(
            "watch.distance_filter_meters",
            self.distance_filter_meters(),
        )?;
        validation::validate_positive_number(
            "dispatch.timeout_seconds",
            self.dispatch_timeout().as_secs(),
            1,
        )?;

        if let Some(endpoint) = &self.dispatch.endpoint {
            validation::validate_url("dispatch.endpoint", endpoint)?;
        }
        validation::validate_url("dispatch.map_link_base", self.map_link_base())?;

        if let Some(path) = &self.catalog.path {
            validation::validate_path("catalog.path", path)?;
        }

        Ok(())
    }

    /// 取得 bearer token；未替換的 `${VAR}` 視為未設定
    pub fn dispatch_token(&self) -> Option<&str> {
        self.dispatch
            .token
            .as_deref()
            .filter(|token| !token.trim().is_empty() && !token.starts_with("${"))
    }

    pub fn catalog_path(&self) -> Option<&str> {
        self.catalog.path.as_deref()
    }
}

impl ConfigProvider for AppConfig {
    fn radius_km(&self) -> f64 {
        self.search.radius_km.unwrap_or(DEFAULT_RADIUS_KM)
    }

    fn available_only(&self) -> bool {
        self.search.available_only.unwrap_or(false)
    }

    fn watch_interval(&self) -> Duration {
        self.watch
            .interval_seconds
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_WATCH_INTERVAL)
    }

    fn distance_filter_meters(&self) -> f64 {
        self.watch
            .distance_filter_meters
            .unwrap_or(DEFAULT_DISTANCE_FILTER_METERS)
    }

    fn dispatch_endpoint(&self) -> Option<&str> {
        self.dispatch.endpoint.as_deref()
    }

    fn dispatch_timeout(&self) -> Duration {
        self.dispatch
            .timeout_seconds
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_DISPATCH_TIMEOUT)
    }

    fn map_link_base(&self) -> &str {
        self.dispatch
            .map_link_base
            .as_deref()
            .unwrap_or(DEFAULT_MAP_LINK_BASE)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
