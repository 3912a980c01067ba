//! Bundled package trees (`npm`, `corepack`) and their executables.
use std::path::PathBuf;

/// Directory under `lib/` that holds bundled packages.
pub const MODULES_DIR: &str = "lib/node_modules";

/// Subtree name never copied from a bundled package.
pub const EXCLUDED_SUBTREE: &str = "test";

/// A vendored package installed verbatim (minus its tests), plus the
/// executables it exposes in `bin/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageRule {
    /// Package name; also the directory name under `deps/` and
    /// `lib/node_modules/`.
    pub name: &'static str,
    /// `(alias, entry point)` pairs; the entry point is relative to the
    /// package root.
    pub bins: &'static [(&'static str, &'static str)],
}

/// The npm package manager.
pub const NPM: PackageRule = PackageRule {
    name: "npm",
    bins: &[("npm", "bin/npm-cli.js"), ("npx", "bin/npx-cli.js")],
};

/// The corepack package-manager shim manager.
pub const COREPACK: PackageRule = PackageRule {
    name: "corepack",
    bins: &[("corepack", "dist/corepack.js")],
};

impl PackageRule {
    /// Package sources, relative to the source root.
    #[must_use]
    pub fn source_dir(&self) -> PathBuf {
        PathBuf::from("deps").join(self.name)
    }

    /// Installed package directory, relative to the destination root.
    #[must_use]
    pub fn install_dir(&self) -> PathBuf {
        PathBuf::from(MODULES_DIR).join(self.name)
    }

    /// Path of the `bin/` entry for `alias`, relative to the destination
    /// root.
    #[must_use]
    pub fn bin_path(alias: &str) -> PathBuf {
        PathBuf::from("bin").join(alias)
    }

    /// What `bin/<alias>` points at: a path relative to `bin/`.
    #[must_use]
    pub fn link_target(&self, entry: &str) -> PathBuf {
        PathBuf::from("..").join(self.install_dir()).join(entry)
    }
}
