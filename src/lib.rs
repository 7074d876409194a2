pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use self::core::{ClientSettings, KiotVietClient};
pub use domain::model::{ApiRequest, Credentials, Identifier, Method, WireParams};
pub use server::{McpServer, ToolName, Toolbox};
pub use utils::error::{KiotVietError, Result};
