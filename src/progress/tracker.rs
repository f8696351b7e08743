//! Named, timed operation spans for operator-facing visibility.
//!
//! Spans are a coarser progress channel than the caller's own listener:
//! they exist so an operator surface (status bar, log tail) can see what a
//! connection is doing without the caller opting in.

use std::time::Instant;

use chrono::{SecondsFormat, Utc};
use tracing::{info, warn};

/// Factory for operation spans.
pub trait OperationTracker: Send + Sync {
    /// Open a new span owned by `owner` (a stable tag naming the component
    /// that created it). The span starts in the Created state.
    fn new_operation(&self, owner: &str) -> Box<dyn OperationSpan>;
}

/// A single tracked unit of work.
///
/// Valid lifecycle is Created -> Started -> Completed. Completed is
/// terminal and releases timing resources. Out-of-order transitions are
/// logged and ignored, never panic: a misbehaving caller must not be able
/// to take down the dispatch thread.
pub trait OperationSpan: Send {
    fn set_description(&mut self, text: &str);

    fn started(&mut self);

    fn completed(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanState {
    Created,
    Started,
    Completed,
}

impl SpanState {
    fn as_str(self) -> &'static str {
        match self {
            SpanState::Created => "created",
            SpanState::Started => "started",
            SpanState::Completed => "completed",
        }
    }
}

/// Default tracker surfacing spans through the `tracing` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTracker;

impl TracingTracker {
    pub fn new() -> Self {
        Self
    }

    pub fn shared() -> std::sync::Arc<Self> {
        std::sync::Arc::new(Self)
    }
}

impl OperationTracker for TracingTracker {
    fn new_operation(&self, owner: &str) -> Box<dyn OperationSpan> {
        Box::new(TracingSpan {
            owner: owner.to_string(),
            description: String::new(),
            state: SpanState::Created,
            started_at: None,
        })
    }
}

struct TracingSpan {
    owner: String,
    description: String,
    state: SpanState,
    started_at: Option<Instant>,
}

impl OperationSpan for TracingSpan {
    fn set_description(&mut self, text: &str) {
        if self.state == SpanState::Completed {
            warn!(owner = %self.owner, "description set on completed span, ignored");
            return;
        }
        self.description = text.to_string();
    }

    fn started(&mut self) {
        if self.state != SpanState::Created {
            warn!(
                owner = %self.owner,
                state = self.state.as_str(),
                "span started out of order, ignored"
            );
            return;
        }
        self.state = SpanState::Started;
        self.started_at = Some(Instant::now());
        info!(
            owner = %self.owner,
            description = %self.description,
            ts = %Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            "operation started"
        );
    }

    fn completed(&mut self) {
        match self.state {
            SpanState::Completed => {
                warn!(owner = %self.owner, "span completed twice, ignored");
            }
            SpanState::Created => {
                warn!(owner = %self.owner, "span completed without starting");
                self.state = SpanState::Completed;
            }
            SpanState::Started => {
                let duration_ms = self
                    .started_at
                    .take()
                    .map(|t| t.elapsed().as_millis())
                    .unwrap_or(0);
                self.state = SpanState::Completed;
                info!(
                    owner = %self.owner,
                    description = %self.description,
                    duration_ms,
                    "operation completed"
                );
            }
        }
    }
}

impl Drop for TracingSpan {
    fn drop(&mut self) {
        // Backstop for spans abandoned without completion.
        if self.state == SpanState::Started {
            warn!(
                owner = %self.owner,
                description = %self.description,
                "span dropped while open"
            );
            self.completed();
        }
    }
}
