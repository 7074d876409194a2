use crate::config::MAX_TIMEOUT_SECONDS;
use crate::core::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_url, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "kiotviet-mcp")]
#[command(about = "MCP server exposing the KiotViet retail API as agent tools", version)]
pub struct CliConfig {
    #[arg(long, env = "KIOTVIET_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, env = "KIOTVIET_TIMEOUT_SECONDS", default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    #[arg(long, help = "TOML config file; replaces --base-url and --timeout-seconds")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines on stderr")]
    pub log_json: bool,
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, MAX_TIMEOUT_SECONDS)?;
        Ok(())
    }
}
