use crate::k8s::types::ResourceKind;
use crate::{KubeviewError, Result};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Namespace;
use kube::api::{Api, DynamicObject, ListParams};
use kube::config::KubeConfigOptions;
use kube::{Client, Config};
use tracing::{debug, info};

/// Read-only view of a Kubernetes cluster.
///
/// Implementations are shared by every in-flight request, so they must be
/// safe to call concurrently.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// List all objects of `kind`, scoped to `namespace` when one is given.
    ///
    /// Objects are returned in the order the API server produced them.
    async fn list(&self, kind: ResourceKind, namespace: Option<&str>)
        -> Result<Vec<DynamicObject>>;

    /// List every namespace visible to the client's credentials
    async fn list_namespaces(&self) -> Result<Vec<Namespace>>;
}

/// How to obtain cluster credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectMode {
    /// Service account token mounted into the pod
    InCluster,
    /// Kubeconfig resolved from `KUBECONFIG` or `~/.kube/config`
    Kubeconfig,
}

pub struct KubeClusterClient {
    client: Client,
}

impl KubeClusterClient {
    pub async fn connect(mode: ConnectMode) -> Result<Self> {
        debug!("Initializing Kubernetes client ({:?})", mode);

        let config = match mode {
            ConnectMode::InCluster => {
                info!("Creating client in cluster mode");
                Config::incluster().map_err(|e| KubeviewError::ClientInitFailed(e.to_string()))?
            }
            ConnectMode::Kubeconfig => {
                info!("Creating client from kubeconfig");
                Config::from_kubeconfig(&KubeConfigOptions::default())
                    .await
                    .map_err(|e| KubeviewError::ClientInitFailed(e.to_string()))?
            }
        };

        info!("Connecting to: {}", config.cluster_url);

        let client =
            Client::try_from(config).map_err(|e| KubeviewError::ClientInitFailed(e.to_string()))?;

        Ok(Self { client })
    }

    fn api(&self, kind: ResourceKind, namespace: Option<&str>) -> Api<DynamicObject> {
        let resource = kind.api_resource();

        match namespace {
            Some(ns) => Api::namespaced_with(self.client.clone(), ns, &resource),
            None => Api::all_with(self.client.clone(), &resource),
        }
    }
}

#[async_trait]
impl ClusterClient for KubeClusterClient {
    async fn list(
        &self,
        kind: ResourceKind,
        namespace: Option<&str>,
    ) -> Result<Vec<DynamicObject>> {
        let list = self.api(kind, namespace).list(&ListParams::default()).await?;

        debug!(
            "Listed {} {} in {}",
            list.items.len(),
            kind,
            namespace.unwrap_or("<cluster>")
        );

        Ok(list.items)
    }

    async fn list_namespaces(&self) -> Result<Vec<Namespace>> {
        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        let list = namespaces.list(&ListParams::default()).await?;

        Ok(list.items)
    }
}
