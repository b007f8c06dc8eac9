//! Version and build metadata for embedding in binaries.
//!
//! This library reads the build/version metadata captured at compile time
//! (version, git commit, branch, build date, dirty-tree flag), lets the
//! embedding application layer its own identity on top through functional
//! options, and renders the result for humans (multi-line text) and machines
//! (JSON).
//!
//! Metadata extraction is fail-soft throughout: fields the toolchain could
//! not supply degrade to `unknown` or empty, and nothing in this crate can
//! prevent a program from starting.
//!
//! ```
//! use version_info::{get_version_info, with_app_details, with_built_by};
//!
//! let info = get_version_info(vec![
//!     with_app_details("demo", "a demo application", "https://example.com"),
//!     with_built_by("cargo"),
//! ]);
//!
//! println!("{info}");
//! println!("{}", info.json_string().expect("serializable"));
//! ```

pub mod build_info;
pub mod error;
pub mod version;

pub use build_info::{BuildInfo, BuildSetting};
pub use error::{Error, Result};
pub use version::{
    Info, InfoOption, get_version_info, with_app_details, with_ascii_name, with_built_by,
    with_git_flow_enabled,
};
