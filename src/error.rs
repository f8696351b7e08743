//! Error types for the gantry connection layer.

use crate::types::ModelKind;
use thiserror::Error;

/// Instrumentation-side errors raised by the listener registry facade.
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("listener already registered")]
    AlreadyRegistered,

    #[error("listener not registered")]
    NotRegistered,
}

/// Connection-side errors observed by callers of the connection contract.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("build execution failed: {0}")]
    BuildExecution(String),

    #[error("model retrieval failed: {0}")]
    ModelRetrieval(String),

    #[error("model kind not supported by this connection: {0:?}")]
    UnsupportedModel(ModelKind),

    #[error("model payload malformed: {0}")]
    ModelPayload(#[from] serde_json::Error),

    #[error("connection already stopped")]
    Stopped,

    #[error("progress instrumentation failed: {0}")]
    Progress(#[from] ProgressError),

    #[error("configuration error: {0}")]
    ConfigError(String),
}
