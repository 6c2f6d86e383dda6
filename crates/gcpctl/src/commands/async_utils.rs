//! Shared utilities for long-running operations with `--async` support
//!
//! Wraps the core completion policy with a spinner on stderr and the
//! `--async`/`--wait-timeout`/`--poll-interval` flags.

use std::time::Duration;

use clap::Args;
use gcpctl_core::{CompletionOptions, PollSettings, ProgressCallback, ProgressEvent};
use indicatif::{ProgressBar, ProgressStyle};

/// Common CLI arguments for operations that can run asynchronously
#[derive(Args, Debug, Clone, Default)]
pub struct AsyncOperationArgs {
    /// Return immediately with the pending operation instead of waiting
    #[arg(long = "async")]
    pub async_: bool,

    /// Maximum time to wait in seconds [default: profile setting, 1800]
    #[arg(long, conflicts_with = "async_")]
    pub wait_timeout: Option<u64>,

    /// Initial polling interval in seconds [default: profile setting, 1]
    #[arg(
        long,
        conflicts_with = "async_",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub poll_interval: Option<u64>,
}

impl AsyncOperationArgs {
    /// Completion options from these flags layered over the profile's polling settings
    pub fn completion_options(&self, base: &PollSettings) -> CompletionOptions {
        let mut poll = base.clone();
        if let Some(secs) = self.wait_timeout {
            poll.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.poll_interval {
            poll.initial_interval = Duration::from_secs(secs);
            poll.max_interval = poll.max_interval.max(poll.initial_interval);
        }
        CompletionOptions {
            run_async: self.async_,
            poll,
        }
    }
}

fn waiting_message(operation: &str) -> String {
    format!("Waiting for operation [{}] to complete", operation)
}

/// Progress callback that prints status lines and drives a spinner on stderr
///
/// When stderr is not a terminal the spinner stays hidden, and the waiting
/// and completion lines are printed as plain text instead.
pub fn operation_progress() -> ProgressCallback {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg} [{elapsed_precise}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);

    Box::new(move |event: ProgressEvent| match event {
        ProgressEvent::Status { message } => {
            pb.suspend(|| eprintln!("{}", message));
        }
        ProgressEvent::Started { operation } => {
            if pb.is_hidden() {
                eprintln!("{}...", waiting_message(&operation));
            } else {
                pb.set_message(waiting_message(&operation));
                pb.enable_steady_tick(Duration::from_millis(100));
            }
        }
        ProgressEvent::Polling {
            operation, attempt, ..
        } => {
            pb.set_message(format!("{} (check #{})", waiting_message(&operation), attempt));
        }
        ProgressEvent::Retrying {
            operation, error, ..
        } => {
            pb.set_message(format!("{} (retrying: {})", waiting_message(&operation), error));
        }
        ProgressEvent::Completed { operation } => {
            if pb.is_hidden() {
                eprintln!("{}...done.", waiting_message(&operation));
            } else {
                pb.finish_with_message(format!("{}...done.", waiting_message(&operation)));
            }
        }
        ProgressEvent::Failed { operation, .. } => {
            if pb.is_hidden() {
                eprintln!("{}...failed.", waiting_message(&operation));
            } else {
                pb.abandon_with_message(format!("{}...failed.", waiting_message(&operation)));
            }
        }
    })
}
