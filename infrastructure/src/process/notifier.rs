//! Notifier that routes advisory warnings into the tracing log.

use envswitch_application::WarningNotifier;
use tracing::warn;

/// Emits each notification as a `WARN` event on the `envswitch::notice` target.
pub struct TracingNotifier;

impl WarningNotifier for TracingNotifier {
    fn notify(&self, text: &str) {
        warn!(target: "envswitch::notice", "{}", text);
    }
}
