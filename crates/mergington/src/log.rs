pub use tracing::{debug, error, info, trace, warn};

use crate::errors::LogError;

const DEFAULT_FILTER: &str = "tower_http=debug,mergington_backend=debug";

/// Setup the logging system for the application.
/// This function will install the [`color_eyre`] error reporting system
/// and the [`tracing-subscriber`] logging system.
/// `RUST_LIB_BACKTRACE` defaults to `1` and `RUST_LOG` defaults to
/// debug output for the backend and its HTTP layer when unset.
pub fn setup() -> Result<(), LogError> {
    use tracing_subscriber::EnvFilter;

    // Get / set backtrace
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        unsafe { std::env::set_var("RUST_LIB_BACKTRACE", "1") }
    }
    color_eyre::install().map_err(|e| LogError::ColorEyre(e.into()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(LogError::TracingSubscriber)?;

    Ok(())
}
