//! User-visible notification port

/// Emits a single advisory warning to whoever is watching the application.
///
/// Delivery is best-effort. Implementations must not panic or block for
/// long; failures are swallowed inside the adapter.
pub trait WarningNotifier: Send + Sync {
    fn notify(&self, text: &str);
}

/// No-op notifier for when warnings are not shown anywhere
pub struct NoNotifier;

impl WarningNotifier for NoNotifier {
    fn notify(&self, _text: &str) {}
}
