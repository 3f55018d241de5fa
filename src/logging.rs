use anyhow::Result;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "CUELINE_LOG";

/// Installs a stderr subscriber. The filter comes from `CUELINE_LOG`, e.g.
/// `CUELINE_LOG=cueline=debug`, and defaults to warnings only so command
/// output on stdout stays clean.
pub fn init(verbose: bool) -> Result<()> {
    let fallback = if verbose { "cueline=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_env_filter(filter)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
