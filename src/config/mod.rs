#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

/// Upper bound accepted for the per-request network timeout.
pub const MAX_TIMEOUT_SECONDS: u64 = 300;
