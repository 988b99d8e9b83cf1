use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::extract::connect_info::MockConnectInfo;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use k8s_openapi::api::core::v1::Namespace;
use kube::api::{DynamicObject, ObjectMeta};
use kube::error::ErrorResponse;
use kubeview::error::{KubeviewError, Result};
use kubeview::k8s::{ClusterClient, ResourceKind};
use kubeview::scrape::redact::REDACTED;
use kubeview::server::handlers::Status;
use kubeview::server::{router, AppState};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashSet};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

#[derive(Default)]
struct FakeCluster {
    objects: BTreeMap<ResourceKind, Vec<DynamicObject>>,
    failing: HashSet<ResourceKind>,
    namespaces: Option<Vec<&'static str>>,
}

impl FakeCluster {
    fn with(mut self, kind: ResourceKind, object: DynamicObject) -> Self {
        self.objects.entry(kind).or_default().push(object);
        self
    }

    fn failing(mut self, kind: ResourceKind) -> Self {
        self.failing.insert(kind);
        self
    }
}

#[async_trait]
impl ClusterClient for FakeCluster {
    async fn list(
        &self,
        kind: ResourceKind,
        _namespace: Option<&str>,
    ) -> Result<Vec<DynamicObject>> {
        if self.failing.contains(&kind) {
            return Err(KubeviewError::from(kube::Error::Api(ErrorResponse {
                status: "Failure".to_string(),
                message: format!("{} is forbidden", kind),
                reason: "Forbidden".to_string(),
                code: 403,
            })));
        }

        Ok(self.objects.get(&kind).cloned().unwrap_or_default())
    }

    async fn list_namespaces(&self) -> Result<Vec<Namespace>> {
        let names = self.namespaces.as_ref().ok_or_else(|| {
            KubeviewError::KubernetesError("namespaces is forbidden".to_string())
        })?;

        Ok(names
            .iter()
            .map(|name| Namespace {
                metadata: ObjectMeta {
                    name: Some(name.to_string()),
                    ..Default::default()
                },
                ..Default::default()
            })
            .collect())
    }
}

fn object(kind: ResourceKind, name: &str) -> DynamicObject {
    DynamicObject::new(name, &kind.api_resource()).within("demo")
}

fn app(cluster: FakeCluster, static_dir: &Path) -> (Router, AppState) {
    let state = AppState::new(Arc::new(cluster));
    let app = router(state.clone(), static_dir)
        .layer(MockConnectInfo(SocketAddr::from(([10, 0, 0, 7], 51234))));
    (app, state)
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .uri(uri)
        .header(header::HOST, "kubeview.local:8000")
        .header(header::ORIGIN, "http://elsewhere.example")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[test]
fn test_error_types() {
    let err = KubeviewError::KubernetesError("pods is forbidden".to_string());
    assert_eq!(err.to_string(), "pods is forbidden");

    let err = KubeviewError::ClientInitFailed("no kubeconfig".to_string());
    assert!(err.to_string().contains("no kubeconfig"));
}

#[test]
fn test_version_const() {
    assert!(!kubeview::VERSION.is_empty());
    assert!(!kubeview::BUILD_INFO.is_empty());
}

#[tokio::test]
async fn test_scrape_demo_namespace() {
    let cluster = FakeCluster::default()
        .with(ResourceKind::Pod, object(ResourceKind::Pod, "web-1"))
        .with(ResourceKind::Pod, object(ResourceKind::Pod, "web-2"))
        .with(ResourceKind::Deployment, object(ResourceKind::Deployment, "web"))
        .failing(ResourceKind::Service);
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = app(cluster, dir.path());

    let (status, body) = get(app, "/api/scrape/demo").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["pods"].as_array().unwrap().len(), 2);
    assert_eq!(json["deployments"][0]["metadata"]["name"], "web");
    assert_eq!(json["services"], json!([]));
    assert_eq!(json.as_object().unwrap().len(), 15);
}

#[tokio::test]
async fn test_scrape_critical_failure_is_forbidden() {
    let cluster = FakeCluster::default()
        .with(ResourceKind::Deployment, object(ResourceKind::Deployment, "web"))
        .failing(ResourceKind::Pod);
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = app(cluster, dir.path());

    let (status, body) = get(app, "/api/scrape/demo").await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, "pods is forbidden");
}

#[tokio::test]
async fn test_scrape_hides_secret_values() {
    let helm = object(ResourceKind::Secret, "sh.helm.release.v1.app.v1")
        .data(json!({ "data": { "release": "H4sIAAAA" } }));
    let creds = object(ResourceKind::Secret, "db-creds")
        .data(json!({ "type": "Opaque", "data": { "password": "aHVudGVyMg==" } }));
    let cluster = FakeCluster::default()
        .with(ResourceKind::Secret, helm)
        .with(ResourceKind::Secret, creds);
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = app(cluster, dir.path());

    let (status, body) = get(app, "/api/scrape/demo").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    let secrets: Vec<k8s_openapi::api::core::v1::Secret> =
        serde_json::from_value(json["secrets"].clone()).unwrap();

    assert_eq!(secrets.len(), 1);
    assert_eq!(secrets[0].metadata.name.as_deref(), Some("db-creds"));
    let data = secrets[0].data.as_ref().unwrap();
    assert_eq!(data["password"].0, REDACTED.as_bytes());
    assert!(!body.contains("aHVudGVyMg=="));
    assert!(!body.contains("sh.helm.release"));
}

#[tokio::test]
async fn test_namespaces() {
    let cluster = FakeCluster {
        namespaces: Some(vec!["default", "demo"]),
        ..Default::default()
    };
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = app(cluster, dir.path());

    let (status, body) = get(app, "/api/namespaces").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json[0]["metadata"]["name"], "default");
    assert_eq!(json[1]["metadata"]["name"], "demo");
}

#[tokio::test]
async fn test_namespaces_forbidden() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = app(FakeCluster::default(), dir.path());

    let (status, body) = get(app, "/api/namespaces").await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, "namespaces is forbidden");
}

#[tokio::test]
async fn test_healthz() {
    let dir = tempfile::tempdir().unwrap();
    let (app, state) = app(FakeCluster::default(), dir.path());

    let (status, _) = get(app.clone(), "/healthz").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    state.set_healthy(false);
    let (status, _) = get(app, "/healthz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_status() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = app(FakeCluster::default(), dir.path());

    let (status, body) = get(app, "/api/status").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    for key in [
        "healthy",
        "version",
        "buildInfo",
        "hostname",
        "os",
        "architecture",
        "cpuCount",
        "rustVersion",
        "clientAddress",
        "serverHost",
    ] {
        assert!(json.get(key).is_some(), "missing {}", key);
    }

    let status: Status = serde_json::from_value(json).unwrap();
    assert!(status.healthy);
    assert_eq!(status.version, kubeview::VERSION);
    assert_eq!(status.client_address, "10.0.0.7:51234");
    assert_eq!(status.server_host, "kubeview.local:8000");
    assert!(status.cpu_count >= 1);
}

#[tokio::test]
async fn test_static_files_and_index_fallback() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<html>kubeview</html>").unwrap();
    std::fs::create_dir(dir.path().join("js")).unwrap();
    std::fs::write(dir.path().join("js").join("app.js"), "console.log(1)").unwrap();
    std::fs::write(dir.path().join("favicon.png"), "png").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "private").unwrap();
    let (app, _) = app(FakeCluster::default(), dir.path());

    let (status, body) = get(app.clone(), "/js/app.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "console.log(1)");

    let (status, body) = get(app.clone(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<html>kubeview</html>");

    let (status, body) = get(app.clone(), "/favicon.png").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "png");

    let (status, body) = get(app.clone(), "/namespace/demo").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<html>kubeview</html>");

    // Only the asset directories are exposed; other files fall back to the index
    let (status, body) = get(app, "/notes.txt").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<html>kubeview</html>");
}

#[tokio::test]
async fn test_status_host_from_authority() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = app(FakeCluster::default(), dir.path());

    let request = Request::builder()
        .uri("http://kubeview.example:8443/api/status")
        .version(axum::http::Version::HTTP_2)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let status: Status = serde_json::from_slice(&body).unwrap();
    assert_eq!(status.server_host, "kubeview.example:8443");
}
