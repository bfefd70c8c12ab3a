/// Initialize structured logging with tracing.
/// Call once at startup; a second call leaves the first subscriber in place.
pub fn init_logging(json: bool) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    let installed = if json {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr)
                    .json(),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    };

    match installed {
        Ok(()) => tracing::debug!(json = json, "Structured logging initialized"),
        Err(e) => tracing::debug!(error = %e, "Tracing subscriber already installed"),
    }
}
