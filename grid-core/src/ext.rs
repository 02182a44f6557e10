use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

/// Pretty console logging capped at a fixed level.
pub fn init_logger(level: tracing::Level) {
    let format = tracing_subscriber::fmt::format()
        .with_timer(LocalTime::rfc_3339())
        .pretty();
    tracing_subscriber::FmtSubscriber::builder()
        .event_format(format)
        .with_max_level(level)
        .init();
}

/// Pretty console logging with a directive filter, e.g. `"grid=debug"`.
/// A `RUST_LOG` value in the environment wins over the given default.
pub fn init_logger_with_filter(default_filter: impl Into<EnvFilter>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());
    let format = tracing_subscriber::fmt::format()
        .with_timer(LocalTime::rfc_3339())
        .pretty()
        .with_file(false);
    tracing_subscriber::FmtSubscriber::builder()
        .event_format(format)
        .with_env_filter(filter)
        .init();
}
