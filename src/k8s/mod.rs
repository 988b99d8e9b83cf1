pub mod client;
pub mod types;

pub use client::{ClusterClient, ConnectMode, KubeClusterClient};
pub use types::{ResourceKind, Scope};
