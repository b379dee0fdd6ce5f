use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, Source};
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub import: ImportSettings,
    pub prediction: PredictionSettings,
    pub server: ServerSettings,
    #[serde(default)]
    pub session: SessionSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImportSettings {
    pub chunk_size: NonZeroUsize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PredictionSettings {
    pub latency_ms: u64,
}

impl PredictionSettings {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_addr: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SessionSettings {
    /// Where the login token is persisted; in-memory only when unset
    pub store_path: Option<PathBuf>,
}

/// Builder pre-seeded with the built-in defaults
fn defaults() -> anyhow::Result<ConfigBuilder<DefaultState>> {
    Ok(config::Config::builder()
        .set_default("api.base_url", "http://localhost:3000/api")?
        .set_default("api.timeout_ms", 10_000_i64)?
        .set_default("import.chunk_size", crate::domain::import::DEFAULT_CHUNK_SIZE as i64)?
        .set_default("prediction.latency_ms", 1_500_i64)?
        .set_default("server.bind_addr", "127.0.0.1:8080")?)
}

/// `SEAICE_<SECTION>__<KEY>` variables, e.g. `SEAICE_API__BASE_URL`
fn environment() -> Environment {
    Environment::with_prefix("SEAICE").prefix_separator("_").separator("__")
}

fn layered<F>(file: F, env: Environment) -> anyhow::Result<AppConfig>
where
    F: Source + Send + Sync + 'static,
{
    let settings = defaults()?.add_source(file).add_source(env).build()?;
    Ok(settings.try_deserialize()?)
}

/// Defaults, then `config/app.*` if present, then `SEAICE_*` environment variables
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    layered(File::with_name("config/app").required(false), environment())
}
