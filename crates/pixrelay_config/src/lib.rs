// --- File: crates/pixrelay_config/src/lib.rs ---

pub mod models;

pub use models::{AppConfig, SacapayConfig, ServerConfig};

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;

static DOTENV_LOADED: OnceCell<()> = OnceCell::new();

/// Loads .env exactly once, even when called from several crates.
pub fn ensure_dotenv_loaded() {
    DOTENV_LOADED.get_or_init(|| {
        dotenv::dotenv().ok();
    });
}

/// Loads the application configuration.
///
/// Sources, in order of increasing precedence:
/// 1. Built-in defaults (server bind address only).
/// 2. `config/default.toml` (optional).
/// 3. `config/{RUN_MODE}.toml` (optional, RUN_MODE defaults to "development").
/// 4. Environment variables with the `APP` prefix, `__` as separator
///    (e.g. `APP_SACAPAY__BASE_URL` overrides `sacapay.base_url`).
///
/// Secrets (API tokens) are never part of this struct; dependent crates read
/// them from the environment at the point of use.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8086)?
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}
