use clap::Parser;
use kiotviet_mcp::domain::ports::ConfigProvider;
use kiotviet_mcp::server::run_stdio;
use kiotviet_mcp::utils::{logger, validation::Validate};
use kiotviet_mcp::{CliConfig, KiotVietError, McpServer, TomlConfig, Toolbox};

fn report_and_exit(e: &KiotVietError, code: i32) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(code);
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting kiotviet-mcp {}", env!("CARGO_PKG_VERSION"));
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // A config file replaces the flag values entirely.
    let provider: Box<dyn ConfigProvider> = match &config.config {
        Some(path) => {
            let toml_config = match TomlConfig::from_file(path) {
                Ok(c) => c,
                Err(e) => report_and_exit(&e, 1),
            };
            if let Err(e) = toml_config.validate() {
                report_and_exit(&e, 1);
            }
            tracing::info!("Loaded configuration from {}", path.display());
            Box::new(toml_config)
        }
        None => {
            if let Err(e) = config.validate() {
                report_and_exit(&e, 1);
            }
            Box::new(config.clone())
        }
    };

    tracing::info!(
        "KiotViet base URL {} (timeout {}s)",
        provider.base_url(),
        provider.timeout_seconds()
    );

    let server = McpServer::new(Toolbox::from_config(provider.as_ref()));
    if let Err(e) = run_stdio(&server).await {
        report_and_exit(&e, 2);
    }
}
