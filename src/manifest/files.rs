//! The complete artifact set: runtime, auxiliary files, bundled packages and
//! headers.
use std::fmt;
use std::path::Path;

use super::package::{COREPACK, NPM};
use super::{BUILD_OUTPUT_DIR, Manifest, headers};
use crate::config::BuildConfig;
use crate::error::FsError;
use crate::platform::{Os, Platform};

/// The main build output: an executable or a shared library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputBinary {
    /// Statically linked executable, installed to `bin/`.
    Executable(String),
    /// Shared library, installed to `lib/`.
    SharedLibrary(String),
}

impl OutputBinary {
    /// Decide the output from `node_shared`, `shlib_suffix` and the host.
    ///
    /// Only an explicit `node_shared == "false"` means a static build; an
    /// unset flag selects the shared library.
    ///
    /// # Examples
    ///
    /// ```
    /// use node_install::config::BuildConfig;
    /// use node_install::manifest::files::OutputBinary;
    /// use node_install::platform::{Os, Platform};
    ///
    /// let config = BuildConfig::parse(
    ///     "{'variables': {'node_shared': 'true', 'shlib_suffix': 'so.115'}, 'target_defaults': {}}",
    ///     std::path::Path::new("config.gypi"),
    /// )
    /// .unwrap();
    /// let output = OutputBinary::for_build(&config, &Platform::new(Os::Linux));
    /// assert_eq!(output.dest(), "lib/libnode.so.115");
    /// ```
    #[must_use]
    pub fn for_build(config: &BuildConfig, platform: &Platform) -> Self {
        if config.is_false("node_shared") {
            let name = if platform.is_windows() { "node.exe" } else { "node" };
            Self::Executable(name.to_string())
        } else if platform.is_windows() {
            Self::SharedLibrary("node.dll".to_string())
        } else {
            let default_suffix = if platform.os == Os::MacOs { "dylib" } else { "so" };
            let suffix = config.variable("shlib_suffix").unwrap_or(default_suffix);
            Self::SharedLibrary(format!("libnode.{suffix}"))
        }
    }

    /// File name inside the build output directory.
    #[must_use]
    pub fn file_name(&self) -> &str {
        match self {
            Self::Executable(name) | Self::SharedLibrary(name) => name,
        }
    }

    /// Destination path relative to the destination root.
    #[must_use]
    pub fn dest(&self) -> String {
        match self {
            Self::Executable(name) => format!("bin/{name}"),
            Self::SharedLibrary(name) => format!("lib/{name}"),
        }
    }

    /// Source path relative to the source root.
    #[must_use]
    pub fn source(&self) -> String {
        format!("{BUILD_OUTPUT_DIR}/{}", self.file_name())
    }
}

impl fmt::Display for OutputBinary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Append the full artifact rules to `manifest`, headers last.
///
/// # Errors
///
/// Returns an error if walking one of the header trees fails.
pub fn select(
    manifest: &mut Manifest,
    config: &BuildConfig,
    platform: &Platform,
    source_root: &Path,
) -> Result<(), FsError> {
    let output = OutputBinary::for_build(config, platform);
    manifest.files([output.source()], &output.dest());

    if config.is_true("node_use_dtrace") {
        manifest.files([format!("{BUILD_OUTPUT_DIR}/node.d")], "lib/dtrace/node.d");
    }

    manifest.files(["src/node.stp"], "share/systemtap/tapset/");
    manifest.files(
        ["deps/v8/tools/gdbinit", "deps/v8/tools/lldb_commands.py"],
        "share/doc/node/",
    );

    let man_dir = if platform.uses_bsd_man_layout() {
        "man/man1/"
    } else {
        "share/man/man1/"
    };
    manifest.files(["doc/node.1"], man_dir);

    if config.is_true("node_install_npm") {
        manifest.package(NPM);
    }
    if config.is_true("node_install_corepack") {
        manifest.package(COREPACK);
    }

    headers::select(manifest, config, platform, source_root)
}
