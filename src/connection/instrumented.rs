//! Progress-instrumented decorator over a [`Connection`].
//!
//! Wraps a delegate connection so that every long-running call runs inside
//! a named operation span, with the caller's progress listener wired into
//! the internal notification stream for exactly the duration of the call.

use std::sync::Arc;

use tracing::warn;

use crate::connection::{Connection, OperationParameters};
use crate::error::ConnectionError;
use crate::progress::bus::ListenerRegistry;
use crate::progress::listener::{BuildProgressListener, NotificationListener};
use crate::progress::tracker::{OperationSpan, OperationTracker};
use crate::types::{BuildParameters, ConnectionMetadata, Model, ModelKind};

const OWNER: &str = "gantry::connection";

/// Decorator adding progress instrumentation to a delegate connection.
///
/// `execute_build` and `model` each get a fresh adapter registration and a
/// fresh span. Teardown is symmetric on every exit path, success, error, or
/// panic: the span is closed first, then the adapter is deregistered, the
/// exact reverse of setup. `stop` and `metadata` forward untouched.
pub struct ProgressConnection {
    delegate: Arc<dyn Connection>,
    registry: Arc<dyn ListenerRegistry>,
    tracker: Arc<dyn OperationTracker>,
}

impl ProgressConnection {
    pub fn new(
        delegate: Arc<dyn Connection>,
        registry: Arc<dyn ListenerRegistry>,
        tracker: Arc<dyn OperationTracker>,
    ) -> Self {
        Self {
            delegate,
            registry,
            tracker,
        }
    }

    fn instrumented<T>(
        &self,
        description: &str,
        operation: &OperationParameters,
        action: impl FnOnce(&dyn Connection) -> Result<T, ConnectionError>,
    ) -> Result<T, ConnectionError> {
        let adapter: Arc<dyn NotificationListener> =
            Arc::new(ListenerAdapter::new(operation.progress_listener()));
        // Guards drop in reverse declaration order, so the span closes
        // before the adapter leaves the registry.
        let _registration = ListenerGuard::register(self.registry.clone(), adapter)?;
        let mut span = self.tracker.new_operation(OWNER);
        span.set_description(description);
        span.started();
        let _span = SpanGuard::new(span);
        action(self.delegate.as_ref())
    }
}

impl Connection for ProgressConnection {
    fn metadata(&self) -> ConnectionMetadata {
        self.delegate.metadata()
    }

    fn execute_build(
        &self,
        parameters: &BuildParameters,
        operation: &OperationParameters,
    ) -> Result<(), ConnectionError> {
        self.instrumented("Execute build", operation, |delegate| {
            delegate.execute_build(parameters, operation)
        })
    }

    fn model(
        &self,
        kind: ModelKind,
        operation: &OperationParameters,
    ) -> Result<Model, ConnectionError> {
        self.instrumented("Load projects", operation, |delegate| {
            delegate.model(kind, operation)
        })
    }

    fn stop(&self) -> Result<(), ConnectionError> {
        self.delegate.stop()
    }
}

/// Bridges the internal notification stream to the caller's listener.
///
/// Only operation boundaries cross the bridge. Intermediate ticks stay
/// internal to the notification stream.
struct ListenerAdapter {
    target: Arc<dyn BuildProgressListener>,
}

impl ListenerAdapter {
    fn new(target: Arc<dyn BuildProgressListener>) -> Self {
        Self { target }
    }
}

impl NotificationListener for ListenerAdapter {
    fn started(&self, description: &str) {
        self.target.on_operation_start(description);
    }

    fn progress(&self, _status: Option<&str>) {}

    fn completed(&self) {
        self.target.on_operation_end();
    }
}

/// Holds a registration for the duration of one call.
struct ListenerGuard {
    registry: Arc<dyn ListenerRegistry>,
    listener: Arc<dyn NotificationListener>,
}

impl ListenerGuard {
    fn register(
        registry: Arc<dyn ListenerRegistry>,
        listener: Arc<dyn NotificationListener>,
    ) -> Result<Self, ConnectionError> {
        registry.add_listener(listener.clone())?;
        Ok(Self { registry, listener })
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        // Drop cannot propagate; a stale registration is worth a warning
        // but must not mask the call's own outcome.
        if let Err(err) = self.registry.remove_listener(&self.listener) {
            warn!(error = %err, "failed to deregister progress adapter");
        }
    }
}

/// Completes an open span when the call unwinds or returns.
struct SpanGuard {
    span: Box<dyn OperationSpan>,
}

impl SpanGuard {
    fn new(span: Box<dyn OperationSpan>) -> Self {
        Self { span }
    }
}

impl Drop for SpanGuard {
    fn drop(&mut self) {
        self.span.completed();
    }
}
