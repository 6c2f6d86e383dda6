//! # gcpctl-core
//!
//! Shared engine for the `gcpctl` CLI: configuration and profiles, the REST
//! transport, typed API clients, and the long-running operation machinery.
//!
//! ## Layers
//!
//! - [`config`] - TOML profiles with env-var expansion
//! - [`api`] - API track selection resolved once into [`ApiSettings`]
//! - [`http`] - authenticated JSON transport with uniform error translation
//! - [`scope`] / [`resource`] - project/location resolution and resource references
//! - [`operation`] / [`progress`] - the operation model, completion policy and poller
//! - [`container`] / [`connectivity`] - command handlers for the two API surfaces
//!
//! Handlers take their API client and [`ScopeResolver`] as parameters, so
//! tests can substitute in-memory fakes for the HTTP clients.

pub mod api;
pub mod config;
pub mod connectivity;
pub mod container;
pub mod error;
pub mod http;
pub mod operation;
pub mod progress;
pub mod resource;
pub mod scope;

pub use api::{ApiSettings, ApiTrack, ServiceEndpoint};
pub use config::{Config, ConfigError, PollingConfig, Profile};
pub use error::{CoreError, RemoteServiceError, Result};
pub use operation::{
    CompletionOptions, Invocation, Operation, OperationSource, RpcStatus, complete_operation,
};
pub use progress::{
    MIN_POLL_INTERVAL, PollSettings, ProgressCallback, ProgressEvent, poll_operation,
};
pub use resource::{NodePoolRef, SpokeRef};
pub use scope::{LocationFlags, RegionFlags, ScopeDefaults, ScopeResolver};
