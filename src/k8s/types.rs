use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, ReplicaSet, StatefulSet};
use k8s_openapi::api::core::v1::{
    ConfigMap, Endpoints, Node, PersistentVolume, PersistentVolumeClaim, Pod, Secret, Service,
    ServiceAccount,
};
use k8s_openapi::api::networking::v1::Ingress;
use k8s_openapi::api::storage::v1::StorageClass;
use kube::api::ApiResource;
use serde::Serialize;
use std::fmt;

/// Whether objects of a kind live inside a namespace or at cluster level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Namespaced,
    Cluster,
}

/// Kubernetes object kinds collected by a scrape.
///
/// The serde names are the keys of the scrape payload, so the frontend
/// depends on them staying exactly as they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ResourceKind {
    #[serde(rename = "pods")]
    Pod,
    #[serde(rename = "services")]
    Service,
    #[serde(rename = "endpoints")]
    Endpoints,
    #[serde(rename = "persistentvolumes")]
    PersistentVolume,
    #[serde(rename = "persistentvolumeclaims")]
    PersistentVolumeClaim,
    #[serde(rename = "deployments")]
    Deployment,
    #[serde(rename = "daemonsets")]
    DaemonSet,
    #[serde(rename = "replicasets")]
    ReplicaSet,
    #[serde(rename = "statefulsets")]
    StatefulSet,
    #[serde(rename = "ingresses")]
    Ingress,
    #[serde(rename = "configmaps")]
    ConfigMap,
    #[serde(rename = "secrets")]
    Secret,
    #[serde(rename = "storageclasses")]
    StorageClass,
    #[serde(rename = "serviceaccounts")]
    ServiceAccount,
    #[serde(rename = "nodes")]
    Node,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 15] = [
        ResourceKind::Pod,
        ResourceKind::Service,
        ResourceKind::Endpoints,
        ResourceKind::PersistentVolume,
        ResourceKind::PersistentVolumeClaim,
        ResourceKind::Deployment,
        ResourceKind::DaemonSet,
        ResourceKind::ReplicaSet,
        ResourceKind::StatefulSet,
        ResourceKind::Ingress,
        ResourceKind::ConfigMap,
        ResourceKind::Secret,
        ResourceKind::StorageClass,
        ResourceKind::ServiceAccount,
        ResourceKind::Node,
    ];

    pub fn scope(self) -> Scope {
        match self {
            ResourceKind::PersistentVolume | ResourceKind::StorageClass | ResourceKind::Node => {
                Scope::Cluster
            }
            _ => Scope::Namespaced,
        }
    }

    /// Lower-case plural name, as used in payload keys and log lines
    pub fn plural(self) -> &'static str {
        match self {
            ResourceKind::Pod => "pods",
            ResourceKind::Service => "services",
            ResourceKind::Endpoints => "endpoints",
            ResourceKind::PersistentVolume => "persistentvolumes",
            ResourceKind::PersistentVolumeClaim => "persistentvolumeclaims",
            ResourceKind::Deployment => "deployments",
            ResourceKind::DaemonSet => "daemonsets",
            ResourceKind::ReplicaSet => "replicasets",
            ResourceKind::StatefulSet => "statefulsets",
            ResourceKind::Ingress => "ingresses",
            ResourceKind::ConfigMap => "configmaps",
            ResourceKind::Secret => "secrets",
            ResourceKind::StorageClass => "storageclasses",
            ResourceKind::ServiceAccount => "serviceaccounts",
            ResourceKind::Node => "nodes",
        }
    }

    /// Group/version/kind information used to build a dynamic API for this kind
    pub fn api_resource(self) -> ApiResource {
        match self {
            ResourceKind::Pod => ApiResource::erase::<Pod>(&()),
            ResourceKind::Service => ApiResource::erase::<Service>(&()),
            ResourceKind::Endpoints => ApiResource::erase::<Endpoints>(&()),
            ResourceKind::PersistentVolume => ApiResource::erase::<PersistentVolume>(&()),
            ResourceKind::PersistentVolumeClaim => {
                ApiResource::erase::<PersistentVolumeClaim>(&())
            }
            ResourceKind::Deployment => ApiResource::erase::<Deployment>(&()),
            ResourceKind::DaemonSet => ApiResource::erase::<DaemonSet>(&()),
            ResourceKind::ReplicaSet => ApiResource::erase::<ReplicaSet>(&()),
            ResourceKind::StatefulSet => ApiResource::erase::<StatefulSet>(&()),
            ResourceKind::Ingress => ApiResource::erase::<Ingress>(&()),
            ResourceKind::ConfigMap => ApiResource::erase::<ConfigMap>(&()),
            ResourceKind::Secret => ApiResource::erase::<Secret>(&()),
            ResourceKind::StorageClass => ApiResource::erase::<StorageClass>(&()),
            ResourceKind::ServiceAccount => ApiResource::erase::<ServiceAccount>(&()),
            ResourceKind::Node => ApiResource::erase::<Node>(&()),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}
