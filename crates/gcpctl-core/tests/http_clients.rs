//! Integration tests for the REST clients against a mock server

use std::time::Duration;

use gcpctl_core::connectivity::{DeactivateSpokeRequest, HttpConnectivityClient, deactivate_spoke};
use gcpctl_core::container::{HttpContainerClient, UpgradeInfoRequest, get_node_pool_upgrade_info};
use gcpctl_core::http::ApiTransport;
use gcpctl_core::{
    CompletionOptions, CoreError, Invocation, LocationFlags, PollSettings, RegionFlags,
    ScopeDefaults, ScopeResolver, ServiceEndpoint,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SPOKE_PATH: &str = "/v1/projects/my-project/locations/us-central1/spokes/myspoke:deactivate";
const OP_NAME: &str = "projects/my-project/locations/us-central1/operations/operation-42";
const OP_PATH: &str = "/v1/projects/my-project/locations/us-central1/operations/operation-42";

fn resolver() -> ScopeResolver {
    ScopeResolver::new(ScopeDefaults {
        project: Some("my-project".to_string()),
        ..Default::default()
    })
}

fn connectivity(server: &MockServer) -> HttpConnectivityClient {
    let transport = ApiTransport::new(Some("test-token".to_string())).unwrap();
    let endpoint = ServiceEndpoint::new(&server.uri(), "v1").unwrap();
    HttpConnectivityClient::new(transport, endpoint)
}

fn container(server: &MockServer) -> HttpContainerClient {
    let transport = ApiTransport::new(None).unwrap();
    let endpoint = ServiceEndpoint::new(&server.uri(), "v1").unwrap();
    HttpContainerClient::new(transport, endpoint)
}

fn spoke_request() -> DeactivateSpokeRequest {
    DeactivateSpokeRequest {
        name: "myspoke".to_string(),
        region: RegionFlags {
            region: Some("us-central1".to_string()),
            global: false,
        },
        request_id: None,
    }
}

fn options(run_async: bool) -> CompletionOptions {
    CompletionOptions {
        run_async,
        poll: PollSettings {
            initial_interval: Duration::ZERO,
            max_interval: Duration::ZERO,
            ..Default::default()
        },
    }
}

// ============================================================================
// Spoke deactivation
// ============================================================================

#[tokio::test]
async fn test_deactivate_and_wait() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SPOKE_PATH))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": OP_NAME,
            "done": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    // First poll: still running; second poll: finished
    Mock::given(method("GET"))
        .and(path(OP_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": OP_NAME,
            "done": false
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(OP_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": OP_NAME,
            "done": true,
            "response": {"status": "DEACTIVATED"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = connectivity(&server);
    let result = deactivate_spoke(&client, &resolver(), &spoke_request(), &options(false), None)
        .await
        .unwrap();

    assert_eq!(result, Invocation::Completed(json!({"status": "DEACTIVATED"})));
}

#[tokio::test]
async fn test_deactivate_async_makes_no_poll() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SPOKE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": OP_NAME
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = connectivity(&server);
    let result = deactivate_spoke(&client, &resolver(), &spoke_request(), &options(true), None)
        .await
        .unwrap();

    match result {
        Invocation::Pending(op) => {
            assert_eq!(op.name, OP_NAME);
            assert!(!op.done);
        }
        other => panic!("expected pending operation, got {other:?}"),
    }
}

#[tokio::test]
async fn test_deactivate_sends_request_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SPOKE_PATH))
        .and(body_json(json!({"requestId": "req-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": OP_NAME,
            "done": true,
            "response": {"name": "myspoke", "state": "INACTIVE"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = DeactivateSpokeRequest {
        request_id: Some("req-1".to_string()),
        ..spoke_request()
    };
    let client = connectivity(&server);
    let result = deactivate_spoke(&client, &resolver(), &request, &options(false), None)
        .await
        .unwrap();

    assert_eq!(
        result,
        Invocation::Completed(json!({"name": "myspoke", "state": "INACTIVE"}))
    );
}

#[tokio::test]
async fn test_deactivate_http_error_preserves_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SPOKE_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 403,
                "message": "Permission 'networkconnectivity.spokes.deactivate' denied",
                "status": "PERMISSION_DENIED"
            }
        })))
        .mount(&server)
        .await;

    let client = connectivity(&server);
    let err = deactivate_spoke(&client, &resolver(), &spoke_request(), &options(false), None)
        .await
        .unwrap_err();

    match &err {
        CoreError::RemoteService(remote) => {
            assert_eq!(remote.status, Some(403));
            assert_eq!(remote.reason.as_deref(), Some("PERMISSION_DENIED"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().starts_with("ResponseError: code=403"));
}

#[tokio::test]
async fn test_operation_finishing_with_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SPOKE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": OP_NAME})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(OP_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": OP_NAME,
            "done": true,
            "error": {"code": 9, "message": "Spoke is already inactive"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = connectivity(&server);
    let err = deactivate_spoke(&client, &resolver(), &spoke_request(), &options(false), None)
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::PollingFailure { .. }));
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_transient_poll_failure_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SPOKE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": OP_NAME})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(OP_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(OP_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": OP_NAME,
            "done": true,
            "response": {"state": "INACTIVE"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = connectivity(&server);
    let result = deactivate_spoke(&client, &resolver(), &spoke_request(), &options(false), None)
        .await
        .unwrap();

    assert_eq!(result, Invocation::Completed(json!({"state": "INACTIVE"})));
}

// ============================================================================
// Node pool upgrade info
// ============================================================================

#[tokio::test]
async fn test_get_upgrade_info() {
    let server = MockServer::start().await;
    let payload = json!({
        "minorTargetVersion": "1.31",
        "patchTargetVersion": "1.30.5-gke.1014001",
        "autoUpgradeStatus": ["ACTIVE"],
        "endOfStandardSupportTimestamp": "2025-09-30T00:00:00Z"
    });

    Mock::given(method("GET"))
        .and(path(
            "/v1/projects/my-project/locations/us-central1-a/clusters/sample-cluster/nodePools/node-pool-1:fetchNodePoolUpgradeInfo",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let request = UpgradeInfoRequest {
        name: "node-pool-1".to_string(),
        cluster: Some("sample-cluster".to_string()),
        location: LocationFlags {
            zone: Some("us-central1-a".to_string()),
            ..Default::default()
        },
        version: None,
    };
    let client = container(&server);
    let result = get_node_pool_upgrade_info(&client, &resolver(), &request)
        .await
        .unwrap();

    assert_eq!(result, Invocation::Completed(payload));
}

#[tokio::test]
async fn test_get_upgrade_info_with_version_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/v1/projects/p/locations/l/clusters/c/nodePools/np:fetchNodePoolUpgradeInfo",
        ))
        .and(query_param("version", "1.31.1-gke.100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"minorTargetVersion": "1.31"})))
        .expect(1)
        .mount(&server)
        .await;

    let request = UpgradeInfoRequest {
        name: "projects/p/locations/l/clusters/c/nodePools/np".to_string(),
        version: Some("1.31.1-gke.100".to_string()),
        ..Default::default()
    };
    let client = container(&server);
    get_node_pool_upgrade_info(&client, &ScopeResolver::default(), &request)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_get_upgrade_info_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": 404, "message": "Not found: node pool \"missing\".", "status": "NOT_FOUND"}
        })))
        .mount(&server)
        .await;

    let request = UpgradeInfoRequest {
        name: "missing".to_string(),
        cluster: Some("c".to_string()),
        location: LocationFlags {
            location: Some("us-central1".to_string()),
            ..Default::default()
        },
        version: None,
    };
    let client = container(&server);
    let err = get_node_pool_upgrade_info(&client, &resolver(), &request)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(
        err.to_string(),
        "ResponseError: code=404, message=Not found: node pool \"missing\"."
    );
}

#[tokio::test]
async fn test_transport_error_has_no_status() {
    // Port 1 is reserved and nothing listens there
    let endpoint = ServiceEndpoint::new("http://127.0.0.1:1", "v1").unwrap();
    let client = HttpContainerClient::new(ApiTransport::new(None).unwrap(), endpoint);

    let request = UpgradeInfoRequest {
        name: "projects/p/locations/l/clusters/c/nodePools/np".to_string(),
        ..Default::default()
    };
    let err = get_node_pool_upgrade_info(&client, &ScopeResolver::default(), &request)
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::RemoteService(ref remote) if remote.status.is_none()));
}
