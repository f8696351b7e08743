//! Listener contracts for the notification stream.

/// Observer registered with a [`ListenerRegistry`] to receive the internal
/// notification stream.
///
/// Dispatch is synchronous: implementations run on whichever thread raised
/// the notification, which may not be the thread that initiated the call.
///
/// [`ListenerRegistry`]: crate::progress::bus::ListenerRegistry
pub trait NotificationListener: Send + Sync {
    /// An operation opened with the given description.
    fn started(&self, description: &str);

    /// Intermediate progress for the open operation.
    fn progress(&self, status: Option<&str>);

    /// The open operation finished.
    fn completed(&self);
}

/// Caller-supplied callback invoked at operation boundaries.
///
/// The connection layer guarantees exactly one `on_operation_start` per
/// started operation, followed by at most one `on_operation_end`, and never
/// interleaves boundaries from other calls on the same instance unless the
/// caller shares one instance across calls. Implementations must tolerate
/// being invoked from a thread other than the calling one.
pub trait BuildProgressListener: Send + Sync {
    fn on_operation_start(&self, description: &str);

    fn on_operation_end(&self);
}

/// Listener that ignores all operation boundaries.
///
/// Callers that do not care about progress pass this instead of omitting
/// the callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgressListener;

impl BuildProgressListener for NoopProgressListener {
    fn on_operation_start(&self, _description: &str) {}

    fn on_operation_end(&self) {}
}
