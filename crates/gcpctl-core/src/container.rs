//! Kubernetes Engine (container API) client and node pool commands

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use crate::api::ServiceEndpoint;
use crate::error::Result;
use crate::http::ApiTransport;
use crate::operation::Invocation;
use crate::resource::NodePoolRef;
use crate::scope::{LocationFlags, ScopeResolver};

/// Container API surface used by the node pool commands
#[async_trait]
pub trait ContainerApi: Send + Sync {
    /// `nodePools.fetchNodePoolUpgradeInfo`
    async fn fetch_node_pool_upgrade_info(
        &self,
        node_pool: &NodePoolRef,
        version: Option<&str>,
    ) -> Result<Value>;
}

/// REST implementation of [`ContainerApi`]
#[derive(Debug, Clone)]
pub struct HttpContainerClient {
    transport: ApiTransport,
    endpoint: ServiceEndpoint,
}

impl HttpContainerClient {
    pub fn new(transport: ApiTransport, endpoint: ServiceEndpoint) -> Self {
        Self {
            transport,
            endpoint,
        }
    }
}

#[async_trait]
impl ContainerApi for HttpContainerClient {
    async fn fetch_node_pool_upgrade_info(
        &self,
        node_pool: &NodePoolRef,
        version: Option<&str>,
    ) -> Result<Value> {
        let mut url = self.endpoint.url_for(
            &node_pool.relative_name(),
            Some("fetchNodePoolUpgradeInfo"),
        );
        if let Some(version) = version {
            url.query_pairs_mut().append_pair("version", version);
        }
        self.transport.get_json(url).await
    }
}

/// Arguments of `container node-pools get-upgrade-info`
#[derive(Debug, Clone, Default)]
pub struct UpgradeInfoRequest {
    /// Short node pool name or full relative name
    pub name: String,
    pub cluster: Option<String>,
    pub location: LocationFlags,
    /// Target version to evaluate the upgrade against
    pub version: Option<String>,
}

/// Fetch upgrade information for a node pool
///
/// The response payload is returned unchanged; nothing is polled.
pub async fn get_node_pool_upgrade_info(
    api: &dyn ContainerApi,
    resolver: &ScopeResolver,
    request: &UpgradeInfoRequest,
) -> Result<Invocation> {
    let node_pool = NodePoolRef::resolve(
        &request.name,
        request.cluster.as_deref(),
        &request.location,
        resolver,
    )?;
    info!("Fetching upgrade info for node pool {}", node_pool);

    let info = api
        .fetch_node_pool_upgrade_info(&node_pool, request.version.as_deref())
        .await?;
    debug!("Upgrade info received for {}", node_pool.name());

    Ok(Invocation::Completed(info))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, RemoteServiceError};
    use crate::scope::ScopeDefaults;
    use serde_json::json;
    use std::sync::Mutex;

    struct FakeContainer {
        reply: Mutex<Option<Result<Value>>>,
        calls: Mutex<Vec<(String, Option<String>)>>,
    }

    impl FakeContainer {
        fn new(reply: Result<Value>) -> Self {
            Self {
                reply: Mutex::new(Some(reply)),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ContainerApi for FakeContainer {
        async fn fetch_node_pool_upgrade_info(
            &self,
            node_pool: &NodePoolRef,
            version: Option<&str>,
        ) -> Result<Value> {
            self.calls
                .lock()
                .unwrap()
                .push((node_pool.relative_name(), version.map(str::to_string)));
            self.reply.lock().unwrap().take().expect("called twice")
        }
    }

    fn resolver() -> ScopeResolver {
        ScopeResolver::new(ScopeDefaults {
            project: Some("my-project".to_string()),
            location: Some("us-central1".to_string()),
            ..Default::default()
        })
    }

    fn request() -> UpgradeInfoRequest {
        UpgradeInfoRequest {
            name: "node-pool-1".to_string(),
            cluster: Some("sample-cluster".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_payload_returned_unchanged() {
        let payload = json!({
            "minorTargetVersion": "1.30",
            "patchTargetVersion": "1.29.6-gke.1038001",
            "autoUpgradeStatus": ["ACTIVE"],
            "upgradeDetails": [{"state": "SUCCEEDED"}]
        });
        let api = FakeContainer::new(Ok(payload.clone()));

        let result = get_node_pool_upgrade_info(&api, &resolver(), &request())
            .await
            .unwrap();

        assert_eq!(result, Invocation::Completed(payload));
        let calls = api.calls.lock().unwrap();
        assert_eq!(
            calls.as_slice(),
            &[(
                "projects/my-project/locations/us-central1/clusters/sample-cluster/nodePools/node-pool-1"
                    .to_string(),
                None
            )]
        );
    }

    #[tokio::test]
    async fn test_remote_error_keeps_status() {
        let api = FakeContainer::new(Err(RemoteServiceError::http(
            404,
            Some("NOT_FOUND"),
            "Node pool not found",
        )
        .into()));

        let err = get_node_pool_upgrade_info(&api, &resolver(), &request())
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::RemoteService(_)));
        assert_eq!(err.status(), Some(404));
        assert_eq!(
            err.to_string(),
            "ResponseError: code=404, message=Node pool not found"
        );
    }

    #[tokio::test]
    async fn test_unresolvable_location_makes_no_call() {
        let api = FakeContainer::new(Ok(json!({})));
        let resolver = ScopeResolver::new(ScopeDefaults {
            project: Some("p".to_string()),
            ..Default::default()
        });

        let err = get_node_pool_upgrade_info(&api, &resolver, &request())
            .await
            .unwrap_err();

        assert!(err.is_invalid_argument());
        assert!(api.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_version_is_forwarded() {
        let api = FakeContainer::new(Ok(json!({})));
        let request = UpgradeInfoRequest {
            version: Some("1.30.2-gke.100".to_string()),
            ..request()
        };

        get_node_pool_upgrade_info(&api, &resolver(), &request)
            .await
            .unwrap();

        let calls = api.calls.lock().unwrap();
        assert_eq!(calls[0].1.as_deref(), Some("1.30.2-gke.100"));
    }
}
