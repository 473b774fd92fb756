//! Structured logging setup.
//!
//! Logs go to stderr so stdout stays reserved for the install report.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable that overrides the computed filter.
pub const LOG_ENV: &str = "AGENTS_SETUP_LOG";

/// Initialize tracing from CLI flags.
///
/// `verbose` raises the default level to debug; an explicit `log_level`
/// wins over both. `AGENTS_SETUP_LOG` (or `RUST_LOG`) overrides everything.
pub fn init_tracing(verbose: bool, log_level: Option<&str>, log_json: bool) -> Result<()> {
    let directive = filter_directive(verbose, log_level);

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(directive));

    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

fn filter_directive(verbose: bool, log_level: Option<&str>) -> String {
    match (verbose, log_level) {
        (_, Some(level)) if level.contains('=') => level.to_string(),
        (_, Some(level)) => format!("agents_setup={}", level),
        (true, None) => "agents_setup=debug".to_string(),
        (false, None) => "agents_setup=warn".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_level_is_warn() {
        assert_eq!(filter_directive(false, None), "agents_setup=warn");
    }

    #[test]
    fn verbose_enables_debug() {
        assert_eq!(filter_directive(true, None), "agents_setup=debug");
    }

    #[test]
    fn explicit_level_wins_over_verbose() {
        assert_eq!(filter_directive(true, Some("trace")), "agents_setup=trace");
    }

    #[test]
    fn full_directive_is_passed_through() {
        assert_eq!(
            filter_directive(false, Some("agents_setup=info,regex=warn")),
            "agents_setup=info,regex=warn"
        );
    }
}
