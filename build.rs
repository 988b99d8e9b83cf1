use std::env;
use std::process::Command;

fn main() {
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());

    let version = Command::new(rustc)
        .arg("--version")
        .output()
        .ok()
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=KUBEVIEW_RUSTC_VERSION={}", version);
    println!("cargo:rerun-if-env-changed=KUBEVIEW_BUILD_INFO");
    println!("cargo:rerun-if-changed=build.rs");
}
