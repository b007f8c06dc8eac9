//! Build script to capture git metadata from the enclosing checkout.

use std::process::Command;

fn main() {
    // Re-run if git HEAD changes
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/");

    if let Some(branch) = git(&["rev-parse", "--abbrev-ref", "HEAD"]) {
        println!("cargo:rustc-env=BUILD_VCS_BRANCH={branch}");
    }

    if let Some(revision) = git(&["rev-parse", "HEAD"]) {
        println!("cargo:rustc-env=BUILD_VCS_REVISION={revision}");
    }

    // Committer timestamp of HEAD, normalized to UTC with a trailing Z.
    if let Some(time) = git(&[
        "log",
        "-1",
        "--format=%cd",
        "--date=format-local:%Y-%m-%dT%H:%M:%SZ",
    ]) {
        println!("cargo:rustc-env=BUILD_VCS_TIME={time}");
    }

    // Emitted only when git could answer, so a non-repo build reads as
    // unknown rather than clean.
    let status = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .filter(|o| o.status.success());
    if let Some(output) = status {
        let modified = !output.stdout.is_empty();
        println!("cargo:rustc-env=BUILD_VCS_MODIFIED={modified}");
    }
}

/// Run a git subcommand and return its trimmed stdout, or `None` if git is
/// missing, fails, or prints nothing.
fn git(args: &[&str]) -> Option<String> {
    Command::new("git")
        .env("TZ", "UTC")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
