//! The ordered list of install rules for one run.
//!
//! A [`Manifest`] is built from the build configuration, the host platform
//! and (for directory walks) the source tree. It only describes *what* goes
//! *where*; the [`installer`](crate::installer) decides how each rule is
//! applied for a given [`Action`](crate::installer::Action).
pub mod files;
pub mod headers;
pub mod package;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::BuildConfig;
use crate::error::FsError;
use crate::fs::DestRoot;
use crate::platform::Platform;

pub use package::PackageRule;

/// Directory holding the compiled artifacts, relative to the source root.
pub const BUILD_OUTPUT_DIR: &str = "out/Release";

/// Where a rule's sources land, relative to the destination root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestTemplate {
    /// Place each source inside this directory, keeping its basename.
    Dir(PathBuf),
    /// Install the (single) source under exactly this path.
    Exact(PathBuf),
}

impl DestTemplate {
    /// Parse a template string: a trailing `/` marks a directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use node_install::manifest::DestTemplate;
    /// use std::path::PathBuf;
    ///
    /// assert_eq!(
    ///     DestTemplate::parse("include/node/"),
    ///     DestTemplate::Dir(PathBuf::from("include/node"))
    /// );
    /// assert_eq!(
    ///     DestTemplate::parse("bin/node"),
    ///     DestTemplate::Exact(PathBuf::from("bin/node"))
    /// );
    /// ```
    #[must_use]
    pub fn parse(template: &str) -> Self {
        template.strip_suffix('/').map_or_else(
            || Self::Exact(PathBuf::from(template)),
            |dir| Self::Dir(PathBuf::from(dir)),
        )
    }

    /// The concrete target for `source` below `root`.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::OutsideRoot`] if the target would escape `root`.
    pub fn target_for(&self, root: &DestRoot, source: &Path) -> Result<PathBuf, FsError> {
        match self {
            Self::Dir(dir) => match source.file_name() {
                Some(name) => root.resolve(&dir.join(name)),
                None => root.resolve(dir),
            },
            Self::Exact(path) => root.resolve(path),
        }
    }
}

impl fmt::Display for DestTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dir(dir) => write!(f, "{}/", dir.display()),
            Self::Exact(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A set of source files routed through one destination template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRule {
    /// Source files, relative to the source root.
    pub sources: Vec<PathBuf>,
    /// Destination template.
    pub dest: DestTemplate,
}

/// One step of a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Copy or remove a fixed set of files.
    Files(InstallRule),
    /// Install or uninstall a bundled package tree and its executables.
    Package(PackageRule),
}

/// Which part of the file set a run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Only the public headers.
    HeadersOnly,
    /// The runtime, auxiliary files, bundled packages, then the headers.
    Full,
}

/// Ordered install rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    rules: Vec<Rule>,
}

impl Manifest {
    /// Select the rules for `selection`.
    ///
    /// # Errors
    ///
    /// Returns an error if walking one of the source directories fails.
    pub fn select(
        selection: Selection,
        config: &BuildConfig,
        platform: &Platform,
        source_root: &Path,
    ) -> Result<Self, FsError> {
        let mut manifest = Self::default();
        match selection {
            Selection::HeadersOnly => headers::select(&mut manifest, config, platform, source_root)?,
            Selection::Full => files::select(&mut manifest, config, platform, source_root)?,
        }
        Ok(manifest)
    }

    /// Append a file rule. Empty source lists are dropped.
    pub fn files<I, P>(&mut self, sources: I, dest: &str)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.push_files(
            sources.into_iter().map(Into::into).collect(),
            DestTemplate::parse(dest),
        );
    }

    /// Append a file rule with an already-built template.
    pub fn push_files(&mut self, sources: Vec<PathBuf>, dest: DestTemplate) {
        if !sources.is_empty() {
            self.rules.push(Rule::Files(InstallRule { sources, dest }));
        }
    }

    /// Append a bundled-package rule.
    pub fn package(&mut self, rule: PackageRule) {
        self.rules.push(Rule::Package(rule));
    }

    /// The rules in execution order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Whether any rule installs `source` (a path relative to the source
    /// root).
    #[must_use]
    pub fn contains_source(&self, source: &Path) -> bool {
        self.rules.iter().any(|rule| match rule {
            Rule::Files(r) => r.sources.iter().any(|s| s == source),
            Rule::Package(_) => false,
        })
    }

    /// One line per file rule source (`<source> -> <template>`) and per
    /// package (`package <name>`), in order.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut lines = Vec::new();
        for rule in &self.rules {
            match rule {
                Rule::Files(r) => lines.extend(
                    r.sources
                        .iter()
                        .map(|s| format!("{} -> {}", s.display(), r.dest)),
                ),
                Rule::Package(p) => lines.push(format!("package {}", p.name)),
            }
        }
        lines.join("\n")
    }
}
