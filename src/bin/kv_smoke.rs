//! Read-only smoke test against a live KiotViet store.
//!
//! Needs `KIOTVIET_ACCESS_TOKEN` and `KIOTVIET_RETAILER`; honours
//! `KIOTVIET_BASE_URL` and `KIOTVIET_TIMEOUT_SECONDS` like the server.

use anyhow::{Context, Result};
use clap::Parser;
use kiotviet_mcp::server::tools::dispatch;
use kiotviet_mcp::utils::logger;
use kiotviet_mcp::utils::validation::{validate_non_empty_string, Validate};
use kiotviet_mcp::{ClientSettings, CliConfig, Credentials, KiotVietClient, ToolName};
use serde_json::{json, Value};

fn summarize(value: &Value) -> String {
    match (value.get("total"), value.get("data").and_then(Value::as_array)) {
        (Some(total), Some(data)) => format!("total={} page={}", total, data.len()),
        (None, Some(data)) => format!("page={}", data.len()),
        _ => "ok".to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = CliConfig::parse();
    logger::init_cli_logger(config.verbose);
    config.validate()?;

    let access_token =
        std::env::var("KIOTVIET_ACCESS_TOKEN").context("KIOTVIET_ACCESS_TOKEN is not set")?;
    let retailer = std::env::var("KIOTVIET_RETAILER").context("KIOTVIET_RETAILER is not set")?;
    validate_non_empty_string("KIOTVIET_ACCESS_TOKEN", &access_token)?;
    validate_non_empty_string("KIOTVIET_RETAILER", &retailer)?;

    println!("🚀 KiotViet smoke test for retailer {}", retailer);

    let client = KiotVietClient::with_settings(
        Credentials::new(access_token, retailer),
        ClientSettings::from_config(&config),
    );

    let checks = [
        (ToolName::ListBranches, json!({})),
        (ToolName::ListProducts, json!({ "page_size": 5 })),
        (ToolName::SearchCustomers, json!({ "page_size": 5 })),
        (ToolName::ListOrders, json!({ "page_size": 5 })),
        (ToolName::ListInvoices, json!({ "page_size": 5 })),
    ];

    let mut failures = 0;
    for (tool, arguments) in &checks {
        match dispatch(&client, *tool, arguments).await {
            Ok(value) => println!("✅ {}: {}", tool, summarize(&value)),
            Err(e) => {
                failures += 1;
                println!("❌ {}: {}", tool, e.user_friendly_message());
                println!("   💡 {}", e.recovery_suggestion());
            }
        }
    }
    client.close();

    if failures > 0 {
        anyhow::bail!("{} of {} checks failed", failures, checks.len());
    }
    println!("🎉 All {} checks passed", checks.len());
    Ok(())
}
