//! src/bridge.rs
//! Forwarding of `tracing` events into a [`LogRouter`].
//!
//! [`RouterLayer`] lets a host that already instruments its code with the
//! `tracing` macros feed those events through the router's channels and
//! thresholds:
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tierlog::{LogRouter, RouterLayer, install_bridge};
//!
//! let router = Arc::new(LogRouter::new(provider));
//! install_bridge(Arc::clone(&router))?;
//!
//! tracing::warn!(target: "game::net", "connection lost");
//! ```

use std::fmt;
use std::sync::Arc;

use logging::Severity;
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::router::LogRouter;

/// Targets whose events are never forwarded, so the logger's own diagnostics
/// cannot loop back into it.
const OWN_TARGETS: [&str; 4] = ["tierlog", "logging_sink", "logging", "branding"];

/// A tracing layer that writes every event to a [`LogRouter`].
///
/// The event's `message` field becomes the log message; events without one
/// are skipped.
pub struct RouterLayer {
    router: Arc<LogRouter>,
}

impl RouterLayer {
    /// Creates a layer forwarding to `router`.
    #[must_use]
    pub const fn new(router: Arc<LogRouter>) -> Self {
        Self { router }
    }

    /// Map a tracing level to a severity.
    const fn level_to_severity(level: &Level) -> Severity {
        match *level {
            Level::ERROR => Severity::Error,
            Level::WARN => Severity::Warning,
            Level::INFO => Severity::Information,
            Level::DEBUG | Level::TRACE => Severity::Debug,
        }
    }

    fn is_own_target(target: &str) -> bool {
        OWN_TARGETS.iter().any(|own| {
            target
                .strip_prefix(own)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
        })
    }
}

impl fmt::Debug for RouterLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterLayer").finish_non_exhaustive()
    }
}

impl<S> Layer<S> for RouterLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if Self::is_own_target(metadata.target()) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        if let Some(message) = visitor.message {
            self.router
                .write_line(&message, Self::level_to_severity(metadata.level()));
        }
    }
}

/// Visitor to extract message from tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Installs a global subscriber that forwards every event to `router`.
///
/// Fails if a global subscriber is already set.
pub fn install_bridge(
    router: Arc<LogRouter>,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(RouterLayer::new(router))
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::StaticProvider;
    use branding::Identity;
    use logging::{HostEnvironment, Settings};
    use logging_sink::MemorySink;
    use tracing_subscriber::layer::SubscriberExt;

    fn router(sink: &MemorySink) -> Arc<LogRouter> {
        let settings = Settings {
            file: logging::ChannelConfig::uniform(logging::OutputCondition::disabled()),
            ..Settings::default()
        };
        let environment = HostEnvironment::new(Identity::new("Bridge", "1.0", "linux"));
        Arc::new(
            LogRouter::builder()
                .debug_sink(sink.clone())
                .build(StaticProvider::new(settings, environment)),
        )
    }

    #[test]
    fn test_level_to_severity() {
        assert_eq!(RouterLayer::level_to_severity(&Level::ERROR), Severity::Error);
        assert_eq!(RouterLayer::level_to_severity(&Level::WARN), Severity::Warning);
        assert_eq!(
            RouterLayer::level_to_severity(&Level::INFO),
            Severity::Information
        );
        assert_eq!(RouterLayer::level_to_severity(&Level::DEBUG), Severity::Debug);
        assert_eq!(RouterLayer::level_to_severity(&Level::TRACE), Severity::Debug);
    }

    #[test]
    fn test_own_targets() {
        assert!(RouterLayer::is_own_target("tierlog"));
        assert!(RouterLayer::is_own_target("tierlog::debug"));
        assert!(RouterLayer::is_own_target("logging_sink::file"));
        assert!(!RouterLayer::is_own_target("tierlogger"));
        assert!(!RouterLayer::is_own_target("game::net"));
    }

    #[test]
    fn events_reach_debug_channel() {
        let sink = MemorySink::new();
        let subscriber = tracing_subscriber::registry().with(RouterLayer::new(router(&sink)));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "game::net", "connection lost");
            tracing::debug!(target: "game::net", "below threshold");
            tracing::error!(target: "tierlog::debug", "own event");
        });

        assert_eq!(sink.messages(), vec!["[Bridge][Warning]connection lost"]);
    }
}
