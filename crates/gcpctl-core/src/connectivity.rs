//! Network Connectivity Center client and spoke commands

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use crate::api::ServiceEndpoint;
use crate::error::Result;
use crate::http::ApiTransport;
use crate::operation::{
    CompletionOptions, Invocation, Operation, OperationSource, complete_operation,
};
use crate::progress::{ProgressCallback, ProgressEvent, emit};
use crate::resource::SpokeRef;
use crate::scope::{RegionFlags, ScopeResolver};

/// Network Connectivity API surface used by the spoke commands
///
/// Operations live in the same service, so every implementation is also an
/// [`OperationSource`].
#[async_trait]
pub trait ConnectivityApi: OperationSource {
    /// `spokes.deactivate`
    async fn deactivate_spoke(
        &self,
        spoke: &SpokeRef,
        request_id: Option<&str>,
    ) -> Result<Operation>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeactivateSpokeBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    request_id: Option<&'a str>,
}

/// REST implementation of [`ConnectivityApi`]
#[derive(Debug, Clone)]
pub struct HttpConnectivityClient {
    transport: ApiTransport,
    endpoint: ServiceEndpoint,
}

impl HttpConnectivityClient {
    pub fn new(transport: ApiTransport, endpoint: ServiceEndpoint) -> Self {
        Self {
            transport,
            endpoint,
        }
    }
}

#[async_trait]
impl OperationSource for HttpConnectivityClient {
    async fn get_operation(&self, name: &str) -> Result<Operation> {
        let url = self.endpoint.url_for(name, None);
        self.transport.get_json(url).await
    }
}

#[async_trait]
impl ConnectivityApi for HttpConnectivityClient {
    async fn deactivate_spoke(
        &self,
        spoke: &SpokeRef,
        request_id: Option<&str>,
    ) -> Result<Operation> {
        let url = self
            .endpoint
            .url_for(&spoke.relative_name(), Some("deactivate"));
        self.transport
            .post_json(url, &DeactivateSpokeBody { request_id })
            .await
    }
}

/// Arguments of `network-connectivity spokes deactivate`
#[derive(Debug, Clone, Default)]
pub struct DeactivateSpokeRequest {
    /// Short spoke name or full relative name
    pub name: String,
    pub region: RegionFlags,
    /// Idempotency key forwarded to the API
    pub request_id: Option<String>,
}

/// Deactivate a spoke and apply the completion policy to the returned operation
pub async fn deactivate_spoke(
    api: &dyn ConnectivityApi,
    resolver: &ScopeResolver,
    request: &DeactivateSpokeRequest,
    options: &CompletionOptions,
    on_progress: Option<ProgressCallback>,
) -> Result<Invocation> {
    let spoke = SpokeRef::resolve(&request.name, &request.region, resolver)?;
    info!("Deactivating spoke {}", spoke);

    let operation = api
        .deactivate_spoke(&spoke, request.request_id.as_deref())
        .await?;

    emit(
        &on_progress,
        ProgressEvent::Status {
            message: format!("Deactivate request issued for: [{}]", spoke.name()),
        },
    );

    complete_operation(api, operation, options, on_progress).await
}
