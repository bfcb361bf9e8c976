//! Logging setup
//!
//! Logs go to stderr so stdout only carries the integration report.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: filter directives (default: `askomics=info,askocli=info`)
//! - `ASKOMICS_LOG_FORMAT`: `json` for structured output, anything else for text

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "askomics=info,askocli=info";

pub fn init() -> Result<()> {
    let log_format = std::env::var("ASKOMICS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    match log_format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
        _ => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()?,
    }

    Ok(())
}
