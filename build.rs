use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
    println!("cargo:rerun-if-env-changed=GIT_VERSION");

    println!("cargo:rustc-env=GIT_VERSION={}", build_version());
}

/// `GIT_VERSION` from the environment (container builds have no .git), then
/// `git describe`, then the crate version.
fn build_version() -> String {
    std::env::var("GIT_VERSION")
        .ok()
        .filter(|v| !v.is_empty() && v != "dev")
        .or_else(git_describe)
        .unwrap_or_else(|| format!("v{}", env!("CARGO_PKG_VERSION")))
}

fn git_describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|o| o.status.success())?;
    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!version.is_empty()).then_some(version)
}
