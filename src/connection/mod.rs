//! Connection contract for remote build execution.

pub mod instrumented;

pub use instrumented::ProgressConnection;

use std::sync::Arc;

use crate::error::ConnectionError;
use crate::progress::listener::{BuildProgressListener, NoopProgressListener};
use crate::types::{BuildParameters, ConnectionMetadata, Model, ModelKind, ModelPayload};

/// Per-call options supplied by the caller.
///
/// Cheap to clone; clones share the same underlying listener, so sharing
/// one instance across concurrent calls means the listener will observe
/// interleaved operation boundaries.
#[derive(Clone)]
pub struct OperationParameters {
    progress_listener: Arc<dyn BuildProgressListener>,
}

impl OperationParameters {
    pub fn new(progress_listener: Arc<dyn BuildProgressListener>) -> Self {
        Self { progress_listener }
    }

    /// Parameters that discard all progress callbacks.
    pub fn noop() -> Self {
        Self::new(Arc::new(NoopProgressListener))
    }

    pub fn progress_listener(&self) -> Arc<dyn BuildProgressListener> {
        self.progress_listener.clone()
    }
}

impl Default for OperationParameters {
    fn default() -> Self {
        Self::noop()
    }
}

/// A connection to a build-execution backend.
///
/// Implementations are expected to be long-lived and shared; every method
/// blocks the calling thread until the backend answers. After [`stop`]
/// returns `Ok`, further calls fail with [`ConnectionError::Stopped`].
///
/// [`stop`]: Connection::stop
pub trait Connection: Send + Sync {
    /// Identity of the backend this connection talks to.
    fn metadata(&self) -> ConnectionMetadata;

    /// Run a build to completion.
    ///
    /// Backend failures surface as [`ConnectionError::BuildExecution`];
    /// the error is returned to the caller unchanged.
    fn execute_build(
        &self,
        parameters: &BuildParameters,
        operation: &OperationParameters,
    ) -> Result<(), ConnectionError>;

    /// Fetch a model of the given kind from the backend.
    fn model(
        &self,
        kind: ModelKind,
        operation: &OperationParameters,
    ) -> Result<Model, ConnectionError>;

    /// Release the connection. Idempotence is up to the implementation.
    fn stop(&self) -> Result<(), ConnectionError>;
}

/// Typed model retrieval over the object-safe contract.
pub fn fetch_model<M: ModelPayload>(
    connection: &dyn Connection,
    operation: &OperationParameters,
) -> Result<M, ConnectionError> {
    connection.model(M::KIND, operation)?.decode()
}
