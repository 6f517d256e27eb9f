use crate::logging::format::Formatter;
use tracing::Level;
use tracing_subscriber::Layer;
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

mod format;

const CRATE_PREFIX: &str = "device_registry";

fn is_crate_target(target: &str) -> bool {
    target == CRATE_PREFIX || target.starts_with("device_registry::")
}

/// Installs the global subscriber: crate events at `level`, everything else at INFO.
pub fn registry_logs(level: Level) {
    let app_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .event_format(Formatter::new(true))
        .with_filter(filter::filter_fn(move |metadata| {
            is_crate_target(metadata.target()) && metadata.level() <= &level
        }));
    let general_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .event_format(Formatter::new(true))
        .with_filter(filter::filter_fn(|metadata| {
            !is_crate_target(metadata.target()) && metadata.level() <= &Level::INFO
        }));
    tracing_subscriber::registry()
        .with(app_layer)
        .with(general_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_crate_target() {
        assert!(is_crate_target("device_registry"));
        assert!(is_crate_target("device_registry::services::device"));
        assert!(!is_crate_target("device_registry_extra::x"));
        assert!(!is_crate_target("tower_http::trace"));
    }
}
