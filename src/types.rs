//! Shared value types for the connection contract.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConnectionError;

/// Parameters describing the build to execute.
///
/// Immutable per call; the connection layer forwards these without
/// modification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildParameters {
    /// Task names to run, in request order.
    pub tasks: Vec<String>,

    /// Extra command-line arguments passed through to the build.
    #[serde(default)]
    pub arguments: Vec<String>,
}

impl BuildParameters {
    pub fn new(tasks: Vec<String>) -> Self {
        Self {
            tasks,
            arguments: Vec::new(),
        }
    }
}

/// Identity of an established connection to a build-execution backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionMetadata {
    pub display_name: String,
    pub version: String,
}

/// Keys for the models a connection can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    ProjectOutline,
    BuildEnvironment,
}

impl ModelKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ModelKind::ProjectOutline => "project_outline",
            ModelKind::BuildEnvironment => "build_environment",
        }
    }
}

/// A model value produced by a connection.
///
/// The payload is carried as JSON so the connection contract stays
/// object-safe; [`Model::decode`] recovers the typed form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    pub kind: ModelKind,
    pub payload: Value,
}

impl Model {
    pub fn new<M: ModelPayload + Serialize>(payload: &M) -> Result<Self, ConnectionError> {
        Ok(Self {
            kind: M::KIND,
            payload: serde_json::to_value(payload)?,
        })
    }

    /// Decode the payload as a concrete model type.
    ///
    /// Fails with [`ConnectionError::UnsupportedModel`] when the carried
    /// kind does not match `M`.
    pub fn decode<M: ModelPayload>(&self) -> Result<M, ConnectionError> {
        if self.kind != M::KIND {
            return Err(ConnectionError::UnsupportedModel(self.kind));
        }
        Ok(serde_json::from_value(self.payload.clone())?)
    }
}

/// A typed model payload keyed by a [`ModelKind`].
pub trait ModelPayload: DeserializeOwned {
    const KIND: ModelKind;
}

/// Project structure reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectOutline {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub children: Vec<ProjectOutline>,
}

impl ModelPayload for ProjectOutline {
    const KIND: ModelKind = ModelKind::ProjectOutline;
}

/// Execution environment reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildEnvironment {
    pub service_version: String,
    pub working_dir: String,
}

impl ModelPayload for BuildEnvironment {
    const KIND: ModelKind = ModelKind::BuildEnvironment;
}
