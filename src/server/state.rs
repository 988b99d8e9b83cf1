use crate::k8s::ClusterClient;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    client: Arc<dyn ClusterClient>,
    healthy: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(client: Arc<dyn ClusterClient>) -> Self {
        Self {
            client,
            healthy: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn client(&self) -> &dyn ClusterClient {
        self.client.as_ref()
    }

    /// Nothing marks the service unhealthy yet; the flag only backs `/healthz`
    pub fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::Relaxed)
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::Relaxed);
    }
}
