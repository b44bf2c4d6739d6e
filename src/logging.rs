use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Diagnostics go to stderr so stdout only carries results.
///
/// `RUST_LOG` overrides the verbosity flag when set.
pub fn init_logging(verbosity: u8) -> Result<()> {
    let filter = env_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok(), verbosity);
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;
    Ok(())
}

/// Invalid `RUST_LOG` directives are reported on stderr and skipped, they never fail startup
fn env_filter(rust_log: Option<String>, verbosity: u8) -> EnvFilter {
    EnvFilter::new(rust_log.unwrap_or_else(|| default_directives(verbosity)))
}

fn default_directives(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("{level},{}={level},reqwest=warn,hyper=warn", env!("CARGO_CRATE_NAME"))
}
