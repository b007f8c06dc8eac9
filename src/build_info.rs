//! Build metadata embedded at compile time.
//!
//! The build script captures git information from the enclosing checkout and
//! embeds it as environment variables. This module reads those back into a
//! [`BuildInfo`] value, an ordered list of key/value settings plus the main
//! version string, and provides the extraction helpers the version builder
//! derives its fields from. Every helper degrades to an empty string when the
//! underlying data is missing or malformed; build provenance is diagnostic,
//! never load-bearing.

use chrono::NaiveDateTime;

/// Placeholder version reported for unreleased local builds.
const DEVEL: &str = "(devel)";

/// A single key/value setting describing the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSetting {
    /// Setting key (e.g. `vcs.time`). Matched case-sensitively.
    pub key: String,
    /// Setting value.
    pub value: String,
}

impl BuildSetting {
    /// Create a setting from any string-like key and value.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Build metadata embedded into the binary: the main version string and an
/// ordered list of settings describing the source checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    /// Version of the main package.
    pub main_version: String,
    /// Ordered key/value settings (`vcs`, `vcs.revision`, `vcs.time`,
    /// `vcs.modified`).
    pub settings: Vec<BuildSetting>,
}

impl BuildInfo {
    /// Assemble build metadata from the compile-time environment.
    ///
    /// Returns `None` when the build script could not capture any VCS
    /// metadata (e.g. the crate was built outside a git checkout).
    #[must_use]
    pub fn from_build_env() -> Option<Self> {
        let mut settings = Vec::new();
        if let Some(branch) = option_env!("BUILD_VCS_BRANCH") {
            settings.push(BuildSetting::new("vcs", branch));
        }
        if let Some(revision) = option_env!("BUILD_VCS_REVISION") {
            settings.push(BuildSetting::new("vcs.revision", revision));
        }
        if let Some(time) = option_env!("BUILD_VCS_TIME") {
            settings.push(BuildSetting::new("vcs.time", time));
        }
        if let Some(modified) = option_env!("BUILD_VCS_MODIFIED") {
            settings.push(BuildSetting::new("vcs.modified", modified));
        }
        if settings.is_empty() {
            tracing::debug!("no vcs metadata was embedded at build time");
            return None;
        }
        Some(Self {
            main_version: env!("CARGO_PKG_VERSION").to_owned(),
            settings,
        })
    }
}

/// Main version from the build metadata, unless it is the `(devel)`
/// placeholder or metadata is absent.
pub(crate) fn get_git_version(build_info: Option<&BuildInfo>) -> String {
    match build_info {
        Some(bi) if bi.main_version != DEVEL => bi.main_version.clone(),
        _ => String::new(),
    }
}

/// Value of the first setting whose key matches exactly, or empty.
pub(crate) fn get_key(build_info: Option<&BuildInfo>, key: &str) -> String {
    let Some(bi) = build_info else {
        return String::new();
    };
    bi.settings
        .iter()
        .find(|s| s.key == key)
        .map_or_else(String::new, |s| s.value.clone())
}

/// Branch name recorded under the `vcs` setting, or empty.
pub(crate) fn get_branch(build_info: Option<&BuildInfo>) -> String {
    get_key(build_info, "vcs")
}

/// Working-tree state from the `vcs.modified` setting: `dirty`, `clean`, or
/// empty when unknown.
pub(crate) fn get_dirty(build_info: Option<&BuildInfo>) -> String {
    match get_key(build_info, "vcs.modified").as_str() {
        "true" => "dirty".to_owned(),
        "false" => "clean".to_owned(),
        _ => String::new(),
    }
}

/// Build timestamp from the `vcs.time` setting with the trailing `Z`
/// stripped, or empty when absent or unparseable.
pub(crate) fn get_build_date(build_info: Option<&BuildInfo>) -> String {
    let raw = get_key(build_info, "vcs.time");
    if raw.is_empty() {
        return String::new();
    }
    match NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%SZ") {
        Ok(ts) => ts.format("%Y-%m-%dT%H:%M:%S").to_string(),
        Err(err) => {
            tracing::debug!(value = %raw, %err, "unparseable vcs.time setting");
            String::new()
        }
    }
}

/// First non-empty candidate, preserving order, or empty if all are empty.
pub(crate) fn first_non_empty<'a>(candidates: &[&'a str]) -> &'a str {
    candidates
        .iter()
        .copied()
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}
