pub mod toml_config;

pub use toml_config::AppConfig;

#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(ValueEnum))]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "ambulance-finder")]
#[command(about = "Find the nearest ambulances and share your location with them")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Current latitude in degrees
    #[arg(long, allow_hyphen_values = true, requires = "longitude")]
    pub latitude: Option<f64>,

    /// Current longitude in degrees
    #[arg(long, allow_hyphen_values = true, requires = "latitude")]
    pub longitude: Option<f64>,

    /// Read `lat,lon` readings from stdin and re-rank on every accepted reading
    #[arg(long, conflicts_with_all = ["latitude", "longitude"])]
    pub watch: bool,

    /// Override search radius from config
    #[arg(long)]
    pub radius_km: Option<f64>,

    /// Only list units whose status is Available
    #[arg(long)]
    pub available_only: bool,

    /// Catalog TOML file, overrides [catalog] path
    #[arg(long)]
    pub catalog: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Share the current location with this unit after ranking
    #[arg(long, value_name = "UNIT_ID", conflicts_with = "watch")]
    pub notify: Option<String>,

    /// Bearer token for the dispatch endpoint, overrides [dispatch] token
    #[arg(long)]
    pub token: Option<String>,

    /// Print the active catalog as TOML and exit
    #[arg(long)]
    pub print_catalog: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 命令列參數覆蓋檔案設定
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(radius) = self.radius_km {
            config.search.radius_km = Some(radius);
            tracing::info!("🔧 Radius overridden to {} km", radius);
        }
        if self.available_only {
            config.search.available_only = Some(true);
        }
        if let Some(path) = &self.catalog {
            config.catalog.path = Some(path.clone());
        }
        if let Some(token) = &self.token {
            config.dispatch.token = Some(token.clone());
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;

    #[test]
    fn test_cli_overrides_file_values() {
        let cli = CliConfig::parse_from([
            "ambulance-finder",
            "--latitude",
            "-1.1",
            "--longitude",
            "37.01",
            "--radius-km",
            "3",
            "--available-only",
            "--token",
            "cli-token",
        ]);
        let mut config = AppConfig::from_toml_str("[search]\nradius_km = 10.0\n").unwrap();

        cli.apply_overrides(&mut config);

        assert_eq!(cli.latitude, Some(-1.1));
        assert_eq!(config.radius_km(), 3.0);
        assert!(config.available_only());
        assert_eq!(config.dispatch_token(), Some("cli-token"));
    }

    #[test]
    fn test_watch_conflicts_with_fixed_position() {
        let result = CliConfig::try_parse_from([
            "ambulance-finder",
            "--watch",
            "--latitude",
            "-1.1",
            "--longitude",
            "37.01",
        ]);
        assert!(result.is_err());
    }
}
