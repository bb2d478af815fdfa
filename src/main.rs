use ambulance_finder::adapters::location::StdinPositionSource;
use ambulance_finder::core::{ConfigProvider, PositionSource};
use ambulance_finder::utils::error::ErrorSeverity;
use ambulance_finder::utils::{logger, validation, validation::Validate};
use ambulance_finder::{
    AppConfig, CliConfig, Coordinate, Credential, DispatchService, HttpDispatchClient, Locator,
    LocatorError, ProximityRanker, StaticCatalog, WatchThrottle,
};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting ambulance-finder");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ ambulance-finder failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: CliConfig) -> Result<(), LocatorError> {
    // 載入配置
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            AppConfig::from_file(path)?
        }
        None => AppConfig::default(),
    };
    cli.apply_overrides(&mut config);
    config.validate()?;

    let catalog = match config.catalog_path() {
        Some(path) => {
            tracing::info!("📁 Loading catalog from: {}", path);
            StaticCatalog::from_file(path)?
        }
        None => StaticCatalog::builtin(),
    };

    if cli.print_catalog {
        print!("{}", catalog.to_toml_string()?);
        return Ok(());
    }

    let ranker = ProximityRanker::with_radius(catalog, config.radius_km())
        .available_only(config.available_only());
    let locator = Locator::new(ranker, cli.format);
    let mut stdout = std::io::stdout();

    if cli.watch {
        let throttle = WatchThrottle::new(config.watch_interval(), config.distance_filter_meters());
        let mut source = StdinPositionSource::stdin();
        tracing::info!("👀 Watching stdin for 'latitude,longitude' readings");
        locator.watch(&mut source, throttle, &mut stdout).await?;
        return Ok(());
    }

    let position = current_position(&cli).await?;

    match &cli.notify {
        Some(unit_id) => {
            let endpoint = validation::validate_required_field(
                "dispatch.endpoint",
                &config.dispatch.endpoint,
            )?;
            let token = config.dispatch_token().map(str::to_string);
            let token = validation::validate_required_field("dispatch.token", &token)?;

            let client = HttpDispatchClient::with_timeout(endpoint, config.dispatch_timeout())?;
            let dispatch = DispatchService::with_map_link_base(client, config.map_link_base());
            locator
                .notify(&dispatch, &Credential::bearer(token), position, unit_id)
                .await?;
            println!("✅ Location shared successfully with unit {}", unit_id);
        }
        None => {
            locator.locate(position, &mut stdout)?;
        }
    }

    Ok(())
}

async fn current_position(cli: &CliConfig) -> Result<Coordinate, LocatorError> {
    match (cli.latitude, cli.longitude) {
        (Some(latitude), Some(longitude)) => Coordinate::try_new(latitude, longitude),
        // 未指定座標時，與 --watch 相同方式從標準輸入讀取第一個有效讀數
        _ => match StdinPositionSource::stdin().next_reading().await {
            Some(reading) => Ok(reading?.coordinate),
            None => Err(LocatorError::LocationUnavailable {
                reason: "no position was provided".to_string(),
            }),
        },
    }
}
