use std::io::{self, Stderr};
use tracing::Subscriber;
use tracing_subscriber::fmt::{self, format::DefaultFields, format::Format};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "kiotviet_mcp=info";
const VERBOSE_DIRECTIVES: &str = "kiotviet_mcp=debug,info";

// stdout carries the MCP stream, so every layer writes to stderr.
type StderrLayer<S> = fmt::Layer<S, DefaultFields, Format, fn() -> Stderr>;

/// `RUST_LOG` wins over the built-in directives.
fn env_filter(default_directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives))
}

fn stderr_layer<S>() -> StderrLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(io::stderr as fn() -> Stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

pub fn init_cli_logger(verbose: bool) {
    let directives = if verbose {
        VERBOSE_DIRECTIVES
    } else {
        DEFAULT_DIRECTIVES
    };

    tracing_subscriber::registry()
        .with(env_filter(directives))
        .with(stderr_layer().compact())
        .init();
}

/// JSON lines, one object per event.
pub fn init_json_logger() {
    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_DIRECTIVES))
        .with(stderr_layer().json())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_layer_builds_both_formats() {
        let compact = tracing_subscriber::registry()
            .with(EnvFilter::new(VERBOSE_DIRECTIVES))
            .with(stderr_layer().compact());
        tracing::subscriber::with_default(compact, || {
            tracing::debug!("compact event");
        });

        let json = tracing_subscriber::registry()
            .with(EnvFilter::new(DEFAULT_DIRECTIVES))
            .with(stderr_layer().json());
        tracing::subscriber::with_default(json, || {
            tracing::info!(tool = "kv_list_branches", "json event");
        });
    }
}
