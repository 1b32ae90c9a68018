use std::process::Command;

/// `<crate version>+<git hash>` を BUILD_VERSION として埋め込む
fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");

    let pkg_version = std::env::var("CARGO_PKG_VERSION").unwrap_or_default();
    let git_hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string());

    let version = match git_hash {
        Some(hash) if !hash.is_empty() => format!("{}+{}", pkg_version, hash),
        _ => pkg_version,
    };

    println!("cargo:rustc-env=BUILD_VERSION={}", version);
}
