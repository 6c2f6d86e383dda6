//! Progress tracking and operation polling
//!
//! Mutating API calls return an [`Operation`] which must be polled until it
//! reports `done`. This module provides that polling with capped exponential
//! backoff and optional progress callbacks for UI updates.

use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::config::PollingConfig;
use crate::error::{CoreError, Result};
use crate::operation::{Operation, OperationSource};

/// Progress events emitted while an operation is handled
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Human-readable status line
    Status { message: String },
    /// Waiting has begun
    Started { operation: String },
    /// One status check finished without reaching a terminal state
    Polling {
        operation: String,
        attempt: u32,
        elapsed: Duration,
    },
    /// A transient polling error is being retried
    Retrying {
        operation: String,
        attempt: u32,
        error: String,
    },
    /// The operation finished successfully
    Completed { operation: String },
    /// The operation failed, or waiting was abandoned
    Failed { operation: String, error: String },
}

/// Callback type for progress updates
///
/// The CLI uses this to drive its spinner and status lines.
pub type ProgressCallback = Box<dyn Fn(ProgressEvent) + Send + Sync>;

/// Capped exponential backoff for [`poll_operation`]
#[derive(Debug, Clone, PartialEq)]
pub struct PollSettings {
    pub initial_interval: Duration,
    pub max_interval: Duration,
    pub multiplier: f64,
    pub timeout: Duration,
    /// Consecutive transient failures tolerated before polling gives up
    pub max_transient_retries: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self::from(&PollingConfig::default())
    }
}

impl From<&PollingConfig> for PollSettings {
    fn from(config: &PollingConfig) -> Self {
        Self {
            initial_interval: Duration::from_millis(config.initial_interval_ms),
            max_interval: Duration::from_millis(config.max_interval_ms),
            multiplier: config.multiplier,
            timeout: Duration::from_secs(config.timeout_secs),
            max_transient_retries: config.max_transient_retries,
        }
    }
}

/// Floor for every delay between status checks
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

impl PollSettings {
    /// Delay to use after `current`, kept within `MIN_POLL_INTERVAL..=max_interval`
    pub fn next_interval(&self, current: Duration) -> Duration {
        let multiplier = if self.multiplier.is_finite() && self.multiplier >= 1.0 {
            self.multiplier
        } else {
            1.0
        };
        let ceiling = self.max_interval.max(MIN_POLL_INTERVAL);
        Duration::try_from_secs_f64(current.as_secs_f64() * multiplier)
            .unwrap_or(ceiling)
            .clamp(MIN_POLL_INTERVAL, ceiling)
    }

    /// First delay, with the same bounds as [`PollSettings::next_interval`]
    pub fn first_interval(&self) -> Duration {
        self.initial_interval
            .clamp(MIN_POLL_INTERVAL, self.max_interval.max(MIN_POLL_INTERVAL))
    }
}

/// Poll an operation until it is done
///
/// # Arguments
///
/// * `source` - Where operation snapshots are fetched from
/// * `name` - The operation's resource name
/// * `settings` - Backoff, timeout and transient retry budget
/// * `on_progress` - Optional callback for progress updates
///
/// # Returns
///
/// The finished operation, [`CoreError::PollingFailure`] when it finished
/// with an error, or [`CoreError::OperationTimeout`] when waiting ran out.
///
/// # Example
///
/// ```rust,ignore
/// use gcpctl_core::{poll_operation, PollSettings, ProgressEvent};
///
/// let finished = poll_operation(
///     &client,
///     &operation.name,
///     &PollSettings::default(),
///     Some(Box::new(|event| {
///         if let ProgressEvent::Polling { attempt, elapsed, .. } = event {
///             println!("check #{} ({:.0}s)", attempt, elapsed.as_secs());
///         }
///     })),
/// ).await?;
/// ```
pub async fn poll_operation<S>(
    source: &S,
    name: &str,
    settings: &PollSettings,
    on_progress: Option<ProgressCallback>,
) -> Result<Operation>
where
    S: OperationSource + ?Sized,
{
    let start = Instant::now();
    let mut interval = settings.first_interval();
    let mut attempt: u32 = 0;
    let mut transient_failures: u32 = 0;

    emit(
        &on_progress,
        ProgressEvent::Started {
            operation: name.to_string(),
        },
    );

    // At least one check is always made; the deadline is only enforced
    // after a check that did not reach a terminal state.
    loop {
        let remaining = settings.timeout.saturating_sub(start.elapsed());
        tokio::time::sleep(interval.min(remaining)).await;
        interval = settings.next_interval(interval);

        attempt += 1;
        trace!("Polling operation {} (attempt {})", name, attempt);

        match source.get_operation(name).await {
            Ok(operation) if operation.done => {
                debug!("Operation {} done after {} checks", name, attempt);
                return finish(operation, name, &on_progress);
            }
            Ok(_) => {
                transient_failures = 0;
                emit(
                    &on_progress,
                    ProgressEvent::Polling {
                        operation: name.to_string(),
                        attempt,
                        elapsed: start.elapsed(),
                    },
                );
            }
            Err(CoreError::RemoteService(err))
                if err.is_retryable() && transient_failures < settings.max_transient_retries =>
            {
                transient_failures += 1;
                warn!(
                    "Transient error polling {} ({}/{}): {}",
                    name, transient_failures, settings.max_transient_retries, err
                );
                emit(
                    &on_progress,
                    ProgressEvent::Retrying {
                        operation: name.to_string(),
                        attempt,
                        error: err.to_string(),
                    },
                );
            }
            Err(err) => {
                emit(
                    &on_progress,
                    ProgressEvent::Failed {
                        operation: name.to_string(),
                        error: err.to_string(),
                    },
                );
                return Err(err);
            }
        }

        if start.elapsed() >= settings.timeout {
            emit(
                &on_progress,
                ProgressEvent::Failed {
                    operation: name.to_string(),
                    error: "timed out".to_string(),
                },
            );
            return Err(CoreError::OperationTimeout {
                operation: name.to_string(),
                timeout: settings.timeout,
            });
        }
    }
}

/// Report a done operation as success or [`CoreError::PollingFailure`]
fn finish(
    operation: Operation,
    name: &str,
    on_progress: &Option<ProgressCallback>,
) -> Result<Operation> {
    if let Some(error) = operation.failure() {
        emit(
            on_progress,
            ProgressEvent::Failed {
                operation: name.to_string(),
                error: error.to_string(),
            },
        );
        return Err(CoreError::PollingFailure {
            operation: name.to_string(),
            error,
        });
    }

    emit(
        on_progress,
        ProgressEvent::Completed {
            operation: name.to_string(),
        },
    );
    Ok(operation)
}

/// Helper to emit progress events
pub(crate) fn emit(callback: &Option<ProgressCallback>, event: ProgressEvent) {
    if let Some(cb) = callback {
        cb(event);
    }
}
