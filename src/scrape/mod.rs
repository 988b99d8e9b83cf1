//! Namespace scraping: one list call per resource kind, then secret redaction
//!
//! Calls run strictly one after another, in the order of [`SCRAPE_PLAN`].
//! The workload kinds come first because the frontend cannot draw anything
//! without them; a failure there aborts the scrape. Everything after is
//! optional and degrades to an empty list.

pub mod redact;

use crate::k8s::{ClusterClient, ResourceKind, Scope};
use crate::Result;
use kube::api::DynamicObject;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, error, warn};

/// What a failed list call does to the scrape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criticality {
    /// Failure aborts the whole scrape
    Critical,
    /// Failure is logged and the kind is reported empty
    Optional,
}

#[derive(Debug, Clone, Copy)]
pub struct ScrapeStep {
    pub kind: ResourceKind,
    pub criticality: Criticality,
}

impl ScrapeStep {
    const fn critical(kind: ResourceKind) -> Self {
        Self {
            kind,
            criticality: Criticality::Critical,
        }
    }

    const fn optional(kind: ResourceKind) -> Self {
        Self {
            kind,
            criticality: Criticality::Optional,
        }
    }
}

pub const SCRAPE_PLAN: [ScrapeStep; 15] = [
    ScrapeStep::critical(ResourceKind::Deployment),
    ScrapeStep::critical(ResourceKind::DaemonSet),
    ScrapeStep::critical(ResourceKind::ReplicaSet),
    ScrapeStep::critical(ResourceKind::StatefulSet),
    ScrapeStep::critical(ResourceKind::Pod),
    ScrapeStep::optional(ResourceKind::Service),
    ScrapeStep::optional(ResourceKind::Endpoints),
    ScrapeStep::optional(ResourceKind::PersistentVolume),
    ScrapeStep::optional(ResourceKind::PersistentVolumeClaim),
    ScrapeStep::optional(ResourceKind::ConfigMap),
    ScrapeStep::optional(ResourceKind::Secret),
    ScrapeStep::optional(ResourceKind::Ingress),
    ScrapeStep::optional(ResourceKind::StorageClass),
    ScrapeStep::optional(ResourceKind::ServiceAccount),
    ScrapeStep::optional(ResourceKind::Node),
];

/// Objects of every kind found for one namespace.
///
/// Serializes to a JSON object with one array per kind, keyed by the kind's
/// plural name. Every kind is present, even when empty.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ScrapeResult {
    objects: BTreeMap<ResourceKind, Vec<DynamicObject>>,
}

impl ScrapeResult {
    pub fn new() -> Self {
        Self {
            objects: ResourceKind::ALL
                .into_iter()
                .map(|kind| (kind, Vec::new()))
                .collect(),
        }
    }

    pub fn get(&self, kind: ResourceKind) -> &[DynamicObject] {
        self.objects.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn insert(&mut self, kind: ResourceKind, objects: Vec<DynamicObject>) {
        self.objects.insert(kind, objects);
    }

    /// Total object count across all kinds
    pub fn len(&self) -> usize {
        self.objects.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ScrapeResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect every kind in [`SCRAPE_PLAN`] for `namespace` and redact secrets.
///
/// The namespace is handed to the cluster client untouched; cluster-scoped
/// kinds are listed without it. On a critical failure the cluster's error is
/// returned as-is and no further calls are made.
pub async fn scrape(client: &dyn ClusterClient, namespace: &str) -> Result<ScrapeResult> {
    let mut result = ScrapeResult::new();

    for step in SCRAPE_PLAN {
        let scope = match step.kind.scope() {
            Scope::Namespaced => Some(namespace),
            Scope::Cluster => None,
        };

        match client.list(step.kind, scope).await {
            Ok(objects) => result.insert(step.kind, objects),
            Err(e) => match step.criticality {
                Criticality::Critical => {
                    error!("Kubernetes API error listing {}: {}", step.kind, e);
                    return Err(e);
                }
                Criticality::Optional => {
                    warn!("Kubernetes API error listing {}: {}", step.kind, e);
                }
            },
        }
    }

    if let Some(secrets) = result.objects.get_mut(&ResourceKind::Secret) {
        *secrets = redact::redact_secrets(std::mem::take(secrets));
    }

    debug!(
        "Scraped {} objects from namespace {}",
        result.len(),
        namespace
    );

    Ok(result)
}
