//! Long-running operations and the completion policy
//!
//! A mutating call returns an [`Operation`]. [`complete_operation`] decides
//! what happens next:
//!
//! ```text
//! ISSUED ──done──────────────────────────────▶ DONE      (never polled)
//!    │
//!    └─pending──┬─ run_async ────────────────▶ DEFERRED  (handle returned)
//!               └─ wait ─▶ WAITING ─┬────────▶ DONE
//!                                   └────────▶ FAILED
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{CoreError, RemoteServiceError, Result};
use crate::progress::{PollSettings, ProgressCallback, ProgressEvent, emit, poll_operation};

/// `google.longrunning.Operation`
///
/// Every poll yields a fresh snapshot; snapshots are never updated in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcStatus>,
}

/// `google.rpc.Status`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RpcStatus {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<Value>,
}

impl Operation {
    /// Error carried by a finished operation, as a remote error
    pub fn failure(&self) -> Option<RemoteServiceError> {
        self.error
            .as_ref()
            .map(|status| RemoteServiceError::from_rpc_code(status.code, status.message.clone()))
    }

    /// Final result of a finished operation
    ///
    /// A missing `response` (e.g. `google.protobuf.Empty`) becomes `Value::Null`.
    pub fn into_result(self) -> Result<Value> {
        if let Some(error) = self.failure() {
            return Err(CoreError::PollingFailure {
                operation: self.name,
                error,
            });
        }
        Ok(self.response.unwrap_or(Value::Null))
    }
}

/// Anything that can report the current state of an operation
#[async_trait]
pub trait OperationSource: Send + Sync {
    async fn get_operation(&self, name: &str) -> Result<Operation>;
}

/// Value surfaced to the output layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Invocation {
    /// Synchronous response or final operation result
    Completed(Value),
    /// The caller opted out of waiting
    Pending(Operation),
}

impl Invocation {
    pub fn is_pending(&self) -> bool {
        matches!(self, Invocation::Pending(_))
    }
}

/// How a caller wants a pending operation handled
#[derive(Debug, Clone, Default)]
pub struct CompletionOptions {
    /// Return the pending handle instead of waiting
    pub run_async: bool,
    pub poll: PollSettings,
}

/// Drive an issued operation to the caller-visible outcome
///
/// An operation that is already `done` is never polled. With `run_async`
/// the pending handle is returned after a hint naming the operation.
/// Otherwise the operation is polled until it finishes, fails or times out.
pub async fn complete_operation<S>(
    source: &S,
    operation: Operation,
    options: &CompletionOptions,
    on_progress: Option<ProgressCallback>,
) -> Result<Invocation>
where
    S: OperationSource + ?Sized,
{
    if operation.done {
        debug!("Operation {} already done, skipping poll", operation.name);
        return operation.into_result().map(Invocation::Completed);
    }

    if options.run_async {
        emit(
            &on_progress,
            ProgressEvent::Status {
                message: format!("Check operation [{}] for status.", operation.name),
            },
        );
        return Ok(Invocation::Pending(operation));
    }

    let finished = poll_operation(source, &operation.name, &options.poll, on_progress).await?;
    finished.into_result().map(Invocation::Completed)
}
