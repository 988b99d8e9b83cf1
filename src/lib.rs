pub mod cli;
pub mod error;
pub mod k8s;
pub mod scrape;
pub mod server;

pub use error::{KubeviewError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Free-form build details, injected at compile time through `KUBEVIEW_BUILD_INFO`
pub const BUILD_INFO: &str = match option_env!("KUBEVIEW_BUILD_INFO") {
    Some(info) => info,
    None => "No build details",
};
