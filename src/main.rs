//! Touchmap engine batch driver.
//!
//! Reads a directory of exported game CSVs, assembles a session, and emits
//! the derived chart data as JSON on stdout. The web upload surface and the
//! actual plot rendering live in a separate service; this binary drives the
//! same core pipeline offline.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use charts::{Chart, ChartDataBuilder, ChartScope, FieldBounds};
use ingest::{SessionBuilder, SessionStore, StoreConfig};

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    /// Directory of exported CSV files to ingest.
    #[serde(default = "default_data_dir")]
    data_dir: PathBuf,

    /// Session store capacity.
    #[serde(default = "default_max_sessions")]
    max_sessions: u64,

    /// Session time-to-live, seconds.
    #[serde(default = "default_session_ttl_secs")]
    session_ttl_secs: u64,

    /// Field geometry for touch-map projection.
    #[serde(default)]
    field: FieldBounds,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_max_sessions() -> u64 {
    256
}

fn default_session_ttl_secs() -> u64 {
    3600
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            max_sessions: default_max_sessions(),
            session_ttl_secs: default_session_ttl_secs(),
            field: FieldBounds::default(),
        }
    }
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    info!("Starting touchmap engine v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    info!(data_dir = %config.data_dir.display(), "Loaded configuration");

    let files = read_exports(&config.data_dir)?;
    if files.is_empty() {
        warn!(dir = %config.data_dir.display(), "no CSV exports found");
        return Ok(());
    }

    let mut builder = SessionBuilder::new();
    for (name, bytes) in &files {
        builder.add_file(name, bytes);
    }
    let session = builder.finish();

    for warning in session.warnings() {
        warn!("{warning}");
    }
    info!(
        games = session.catalog().len(),
        warnings = session.warnings().len(),
        "session assembled"
    );

    let store = SessionStore::new(StoreConfig {
        max_sessions: config.max_sessions,
        ttl: std::time::Duration::from_secs(config.session_ttl_secs),
    });

    let chart_builder = ChartDataBuilder::new(config.field);
    let players = chart_builder.players(&session);

    let mut output = Vec::new();
    let mut scopes = vec![ChartScope::team()];
    scopes.extend(players.iter().map(|p| ChartScope::player(p.clone())));
    for scope in scopes {
        let charts = chart_builder.charts(&session, &scope)?;
        if charts.is_empty() {
            continue;
        }
        info!(title = %chart_builder.title(&scope), charts = charts.len(), "derived charts");
        output.push(ChartOutput {
            title: chart_builder.title(&scope),
            charts,
        });
    }

    let session_id = store.insert(session);
    info!(session = %session_id, entities = output.len(), "batch complete");

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// One entity's derived charts, as handed to the rendering collaborator.
#[derive(serde::Serialize)]
struct ChartOutput {
    title: String,
    charts: Vec<Chart>,
}

/// Reads every CSV in the data directory, name-sorted for reproducible
/// merge order.
fn read_exports(dir: &Path) -> Result<Vec<(String, Vec<u8>)>> {
    let mut files = Vec::new();
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read data directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.extension().map_or(false, |ext| ext == "csv") {
            let name = entry.file_name().to_string_lossy().into_owned();
            let bytes = fs::read(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            files.push((name, bytes));
        }
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

/// Initialize tracing from the environment.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("TOUCHMAP")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    if let Ok(dir) = std::env::var("TOUCHMAP_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }

    Ok(config)
}
