use crate::config::{BalanceConfig, DisplayConfig, ExportConfig};
use crate::error::{Error, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub balance: BalanceConfig,
    pub export: ExportConfig,
    pub display: DisplayConfig,
}

impl LedgerConfig {
    /// Layered load: `config/default.toml`, then `config/{env}.toml`, then
    /// `KHATA_`-prefixed environment variables. Every layer is optional;
    /// with nothing present this is `LedgerConfig::default()`.
    pub fn load(env: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("KHATA"))
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| Error::Config(e.to_string()))
    }
}
