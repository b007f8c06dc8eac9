//! Version info builder and rendering.
//!
//! [`get_version_info`] assembles an [`Info`] value from the embedded build
//! metadata, applies caller-supplied configuration functions in order, and
//! optionally rewrites the version string according to git-flow branch
//! classification. The result renders as a multi-line text block
//! ([`std::fmt::Display`]), a one-line summary ([`Info::short_string`]), or
//! JSON ([`Info::json_string`]).

use std::fmt;

use serde::Serialize;

use crate::build_info::{self, BuildInfo};
use crate::error::Result;

/// Sentinel for fields the build metadata could not supply.
const UNKNOWN: &str = "unknown";

/// A configuration function applied to an [`Info`] during construction.
///
/// The named constructors ([`with_app_details`], [`with_built_by`], ...)
/// cover the common fields; arbitrary closures may set any field directly.
pub type InfoOption = Box<dyn FnOnce(&mut Info)>;

/// Version and build metadata for a single program invocation.
///
/// Built once via [`get_version_info`], immutable afterwards. All fields
/// default to an `unknown` sentinel or the empty string, never to an absent
/// value, so rendering is total.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    /// Banner text rendered verbatim above the labeled lines.
    pub ascii_name: String,
    /// Application name.
    pub app_name: String,
    /// Application description.
    pub app_description: String,
    /// Application URL.
    pub app_url: String,
    /// Attribution string (e.g. the packaging system that produced the
    /// binary).
    pub built_by: String,
    /// Derived semantic-version-like string.
    pub git_version: String,
    /// Commit identifier, full length; shortened to 7 characters when
    /// embedded in derived version strings.
    pub git_commit: String,
    /// Source branch name.
    pub git_branch: String,
    /// `dirty`, `clean`, or empty when unknown.
    pub git_dirty: String,
    /// Build timestamp without the trailing zone marker, or empty.
    pub build_date: String,
    /// Whether git-flow branch classification rewrites `git_version`.
    pub git_flow_enabled: bool,
}

/// Build an [`Info`] from the embedded build metadata and the given
/// configuration functions, applied in order (last write wins).
///
/// When git-flow classification is enabled, the version rewrite happens after
/// all options have run, so options may inject the version, commit, and
/// branch it operates on.
#[must_use]
pub fn get_version_info(options: Vec<InfoOption>) -> Info {
    let build_info = BuildInfo::from_build_env();
    let mut info = Info::from_build_info(build_info.as_ref());
    for option in options {
        option(&mut info);
    }
    if info.git_flow_enabled {
        info.git_version = git_flow_version(&info.git_version, &info.git_commit, &info.git_branch);
    }
    info
}

/// Set the banner text.
#[must_use]
pub fn with_ascii_name(name: impl Into<String>) -> InfoOption {
    let name = name.into();
    Box::new(move |i| i.ascii_name = name)
}

/// Set the application name, description, and URL.
#[must_use]
pub fn with_app_details(
    name: impl Into<String>,
    description: impl Into<String>,
    url: impl Into<String>,
) -> InfoOption {
    let name = name.into();
    let description = description.into();
    let url = url.into();
    Box::new(move |i| {
        i.app_name = name;
        i.app_description = description;
        i.app_url = url;
    })
}

/// Set the attribution string.
#[must_use]
pub fn with_built_by(built_by: impl Into<String>) -> InfoOption {
    let built_by = built_by.into();
    Box::new(move |i| i.built_by = built_by)
}

/// Toggle git-flow branch classification of the version string.
#[must_use]
pub fn with_git_flow_enabled(enabled: bool) -> InfoOption {
    Box::new(move |i| i.git_flow_enabled = enabled)
}

impl Info {
    fn from_build_info(bi: Option<&BuildInfo>) -> Self {
        let version = build_info::get_git_version(bi);
        let commit = build_info::get_key(bi, "vcs.revision");
        let branch = build_info::get_branch(bi);
        Self {
            git_version: build_info::first_non_empty(&[version.as_str(), UNKNOWN]).to_owned(),
            git_commit: build_info::first_non_empty(&[commit.as_str(), UNKNOWN]).to_owned(),
            git_branch: build_info::first_non_empty(&[branch.as_str(), UNKNOWN]).to_owned(),
            git_dirty: build_info::get_dirty(bi),
            build_date: build_info::get_build_date(bi),
            ..Self::default()
        }
    }

    /// One-line version summary for `--version` flags and constrained UI
    /// surfaces.
    ///
    /// Format: `1.0.0 (02af8e0)`, with a `*` after the commit when the tree
    /// was dirty at build time.
    #[must_use]
    pub fn short_string(&self) -> String {
        let commit = short_commit(&self.git_commit);
        if self.git_dirty == "dirty" {
            format!("{} ({commit}*)", self.git_version)
        } else {
            format!("{} ({commit})", self.git_version)
        }
    }

    /// Render as pretty-printed JSON.
    pub fn json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.ascii_name.is_empty() {
            writeln!(f, "{}", self.ascii_name.trim_end_matches('\n'))?;
        }
        if !self.app_name.is_empty() {
            writeln!(f, "{}", self.app_name)?;
        }
        if !self.app_description.is_empty() {
            writeln!(f, "{}", self.app_description)?;
        }
        if !self.app_url.is_empty() {
            writeln!(f, "{}", self.app_url)?;
        }
        if !self.git_version.is_empty() {
            writeln!(f, "version:    {}", self.git_version)?;
        }
        if !self.git_commit.is_empty() {
            writeln!(f, "commit:     {}", self.git_commit)?;
        }
        if !self.git_branch.is_empty() {
            writeln!(f, "branch:     {}", self.git_branch)?;
        }
        if !self.git_dirty.is_empty() {
            writeln!(f, "tree state: {}", self.git_dirty)?;
        }
        if !self.build_date.is_empty() {
            writeln!(f, "built at:   {}", self.build_date)?;
        }
        if !self.built_by.is_empty() {
            writeln!(f, "built by:   {}", self.built_by)?;
        }
        Ok(())
    }
}

/// Classify a branch under the git-flow convention and derive the qualified
/// version string. Ordered decision table, first match wins: exact
/// `main`/`master` before the prefix rules.
fn git_flow_version(version: &str, commit: &str, branch: &str) -> String {
    let commit = short_commit(commit);
    match branch {
        "main" | "master" => version.to_owned(),
        _ if branch.starts_with("release/") => format!("{version}-RC+{commit}"),
        _ if branch.starts_with("feature/") => format!("{version}-M+{commit}"),
        _ => format!("{version}-SNAPSHOT+{commit}"),
    }
}

/// First 7 characters of the commit hash; the full input when shorter or not
/// splittable at a character boundary.
fn short_commit(commit: &str) -> &str {
    commit.get(..7).unwrap_or(commit)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERSION: &str = "1.0.0";
    const COMMIT: &str = "02af8e0619ca3f625bfbc25e60289e0eba222c35";

    #[test]
    fn git_flow_main_is_unqualified() {
        assert_eq!(git_flow_version(VERSION, COMMIT, "main"), "1.0.0");
    }

    #[test]
    fn git_flow_master_is_unqualified() {
        assert_eq!(git_flow_version(VERSION, COMMIT, "master"), "1.0.0");
    }

    #[test]
    fn git_flow_release_is_release_candidate() {
        assert_eq!(
            git_flow_version(VERSION, COMMIT, "release/1.0.0"),
            "1.0.0-RC+02af8e0"
        );
    }

    #[test]
    fn git_flow_feature_is_milestone() {
        assert_eq!(
            git_flow_version(VERSION, COMMIT, "feature/new-model"),
            "1.0.0-M+02af8e0"
        );
    }

    #[test]
    fn git_flow_other_is_snapshot() {
        assert_eq!(
            git_flow_version(VERSION, COMMIT, "develop"),
            "1.0.0-SNAPSHOT+02af8e0"
        );
        assert_eq!(
            git_flow_version(VERSION, COMMIT, "some/arbitrary-branch"),
            "1.0.0-SNAPSHOT+02af8e0"
        );
    }

    #[test]
    fn short_commit_guards_short_input() {
        assert_eq!(short_commit("02af"), "02af");
        assert_eq!(short_commit(""), "");
        assert_eq!(short_commit(COMMIT), "02af8e0");
    }

    #[test]
    fn display_omits_empty_fields() {
        let info = Info {
            git_version: "1.2.3".to_owned(),
            ..Info::default()
        };
        let text = info.to_string();
        assert_eq!(text, "version:    1.2.3\n");
    }

    #[test]
    fn display_renders_populated_fields_once() {
        let info = Info {
            app_name: "demo".to_owned(),
            app_description: "a demo application".to_owned(),
            app_url: "https://example.com".to_owned(),
            built_by: "nixpkgs".to_owned(),
            git_version: "1.2.3".to_owned(),
            git_commit: COMMIT.to_owned(),
            git_branch: "main".to_owned(),
            git_dirty: "clean".to_owned(),
            build_date: "2023-05-01T10:00:00".to_owned(),
            ..Info::default()
        };
        let text = info.to_string();
        assert_eq!(text.matches("demo").count(), 2);
        assert_eq!(text.matches("1.2.3").count(), 1);
        assert_eq!(text.matches(COMMIT).count(), 1);
        assert_eq!(text.matches("clean").count(), 1);
        assert_eq!(text.matches("nixpkgs").count(), 1);
    }

    #[test]
    fn short_string_clean() {
        let info = Info {
            git_version: "1.2.3".to_owned(),
            git_commit: COMMIT.to_owned(),
            git_dirty: "clean".to_owned(),
            ..Info::default()
        };
        assert_eq!(info.short_string(), "1.2.3 (02af8e0)");
    }

    #[test]
    fn short_string_dirty_marker() {
        let info = Info {
            git_version: "1.2.3".to_owned(),
            git_commit: COMMIT.to_owned(),
            git_dirty: "dirty".to_owned(),
            ..Info::default()
        };
        assert_eq!(info.short_string(), "1.2.3 (02af8e0*)");
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let info = Info {
            git_version: "1.2.3".to_owned(),
            build_date: "2023-05-01T10:00:00".to_owned(),
            ..Info::default()
        };
        let json = info.json_string().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["gitVersion"], "1.2.3");
        assert_eq!(value["buildDate"], "2023-05-01T10:00:00");
        assert_eq!(value["gitFlowEnabled"], false);
    }

    #[test]
    fn options_apply_in_order() {
        let info = get_version_info(vec![
            with_built_by("first"),
            with_built_by("second"),
            with_app_details("demo", "a demo application", "https://example.com"),
        ]);
        assert_eq!(info.built_by, "second");
        assert_eq!(info.app_name, "demo");
        assert_eq!(info.app_url, "https://example.com");
    }

    #[test]
    fn unconfigured_info_still_renders() {
        let info = get_version_info(vec![]);
        assert!(!info.to_string().is_empty());
        assert!(!info.git_version.is_empty());
        assert!(!info.git_commit.is_empty());
        assert!(!info.git_branch.is_empty());
    }
}
