use crate::k8s::ConnectMode;
use clap::Parser;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kubeview")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Kubernetes cluster visualiser and API scraping service", long_about = None)]
pub struct Cli {
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, env = "PORT", default_value_t = 8000, help = "Port to listen on")]
    pub port: u16,

    #[arg(
        long,
        env = "IN_CLUSTER",
        help = "Use the in-cluster service account instead of a kubeconfig"
    )]
    pub in_cluster: bool,

    #[arg(
        long,
        env = "STATIC_DIR",
        default_value = "./frontend",
        help = "Directory holding the web frontend"
    )]
    pub static_dir: PathBuf,
}

impl Cli {
    pub fn connect_mode(&self) -> ConnectMode {
        if self.in_cluster {
            ConnectMode::InCluster
        } else {
            ConnectMode::Kubeconfig
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
