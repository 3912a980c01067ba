// Shared helpers for integration tests.
//
// Provides a temporary source tree shaped like a configured and built
// runtime checkout, a fluent builder to adjust it, and helpers to run the
// installer against a temporary destination.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use node_install::config::BuildConfig;
use node_install::fs::{DestRoot, walk};
use node_install::installer::{Action, Installer, Summary};
use node_install::logging::{BufferedLog, Log};
use node_install::manifest::{Manifest, Selection};
use node_install::platform::{Os, Platform};
use sha2::{Digest, Sha256};

/// Every file of a typical source tree, relative to its root.
pub const SOURCE_FILES: &[&str] = &[
    "common.gypi",
    "src/node.h",
    "src/node_api.h",
    "src/js_native_api.h",
    "src/js_native_api_types.h",
    "src/node_api_types.h",
    "src/node_buffer.h",
    "src/node_object_wrap.h",
    "src/node_version.h",
    "src/node.stp",
    "doc/node.1",
    "out/Release/node",
    "out/Release/libnode.so.120",
    "out/Release/node.d",
    "deps/v8/tools/gdbinit",
    "deps/v8/tools/lldb_commands.py",
    "deps/v8/include/v8.h",
    "deps/v8/include/v8-isolate.h",
    "deps/v8/include/v8config.h",
    "deps/v8/include/libplatform/libplatform.h",
    "deps/v8/include/cppgc/common.h",
    "deps/uv/include/uv.h",
    "deps/uv/include/uv/unix.h",
    "deps/zlib/zconf.h",
    "deps/zlib/zlib.h",
    "deps/openssl/openssl/include/openssl/ssl.h",
    "deps/openssl/config/opensslconf.h",
    "deps/openssl/config/archs/linux-x86_64/asm/include/openssl/opensslconf.h",
    "deps/npm/package.json",
    "deps/npm/bin/npm-cli.js",
    "deps/npm/bin/npx-cli.js",
    "deps/npm/lib/npm.js",
    "deps/npm/test/fixtures/config.js",
    "deps/npm/node_modules/abbrev/lib/index.js",
    "deps/npm/node_modules/abbrev/test/basic.js",
    "deps/corepack/package.json",
    "deps/corepack/dist/corepack.js",
];

/// Build variables of a static build with everything bundled.
pub const DEFAULT_VARIABLES: &[(&str, &str)] = &[
    ("node_shared", "false"),
    ("node_shared_libuv", "false"),
    ("node_shared_openssl", "false"),
    ("node_shared_zlib", "false"),
    ("node_use_openssl", "true"),
    ("node_use_dtrace", "false"),
    ("node_install_npm", "true"),
    ("node_install_corepack", "true"),
    ("shlib_suffix", "so.120"),
];

/// A source tree plus a destination directory, both temporary.
pub struct TestTree {
    /// Source tree root.
    pub src: tempfile::TempDir,
    /// Directory standing in for `<staging root><prefix>`.
    pub dest: tempfile::TempDir,
    /// Log shared by every run.
    pub log: Arc<BufferedLog>,
}

impl TestTree {
    /// A default tree.
    pub fn new() -> Self {
        TestTreeBuilder::new().build()
    }

    /// Source tree root.
    pub fn src_path(&self) -> &Path {
        self.src.path()
    }

    /// Destination root.
    pub fn dest_path(&self) -> &Path {
        self.dest.path()
    }

    /// Build an installer for this tree.
    pub fn installer(&self, dry_run: bool) -> Installer {
        Installer {
            config: BuildConfig::load(self.src.path()).expect("load config.gypi"),
            platform: Platform::new(Os::Linux),
            source_root: self.src.path().to_path_buf(),
            root: DestRoot::from_path(self.dest.path()).expect("destination root"),
            log: Arc::clone(&self.log) as Arc<dyn Log>,
            dry_run,
        }
    }

    /// Select the manifest for `selection` on Linux.
    pub fn manifest(&self, selection: Selection) -> Manifest {
        let installer = self.installer(false);
        Manifest::select(
            selection,
            &installer.config,
            &installer.platform,
            &installer.source_root,
        )
        .expect("select manifest")
    }

    /// Run a full install or uninstall.
    pub fn run(&self, action: Action) -> Summary {
        self.run_selection(action, Selection::Full)
    }

    /// Run `action` over `selection`.
    pub fn run_selection(&self, action: Action, selection: Selection) -> Summary {
        self.installer(false)
            .run(action, &self.manifest(selection))
            .expect("installer run")
    }

    /// Path below the destination root.
    pub fn installed(&self, rel: &str) -> PathBuf {
        self.dest.path().join(rel)
    }

    /// Every entry below the destination root (files, links and
    /// directories), relative to it.
    pub fn dest_entries(&self) -> Vec<PathBuf> {
        walk(self.dest.path(), &[])
            .map(|e| e.expect("walk destination"))
            .map(|e| e.path)
            .filter(|p| p != self.dest.path())
            .map(|p| p.strip_prefix(self.dest.path()).expect("relative").to_path_buf())
            .collect()
    }

    /// SHA-256 of every regular file below the destination root.
    pub fn dest_hashes(&self) -> BTreeMap<PathBuf, String> {
        walk(self.dest.path(), &[])
            .map(|e| e.expect("walk destination"))
            .filter(|e| !e.is_dir && !e.path.is_symlink())
            .map(|e| {
                let bytes = std::fs::read(&e.path).expect("read installed file");
                let digest = Sha256::digest(&bytes);
                let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
                let rel = e
                    .path
                    .strip_prefix(self.dest.path())
                    .expect("relative")
                    .to_path_buf();
                (rel, hex)
            })
            .collect()
    }
}

/// Fluent builder for [`TestTree`].
pub struct TestTreeBuilder {
    variables: BTreeMap<String, String>,
    extra_files: Vec<(String, String)>,
    skipped: Vec<String>,
}

impl TestTreeBuilder {
    /// Start from [`SOURCE_FILES`] and [`DEFAULT_VARIABLES`].
    pub fn new() -> Self {
        Self {
            variables: DEFAULT_VARIABLES
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            extra_files: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Set a build variable.
    pub fn variable(mut self, key: &str, value: &str) -> Self {
        self.variables.insert(key.to_string(), value.to_string());
        self
    }

    /// Remove a build variable entirely.
    pub fn without_variable(mut self, key: &str) -> Self {
        self.variables.remove(key);
        self
    }

    /// Add or overwrite a source file.
    pub fn file(mut self, rel: &str, content: &str) -> Self {
        self.extra_files.push((rel.to_string(), content.to_string()));
        self
    }

    /// Leave one of [`SOURCE_FILES`] out of the tree.
    pub fn without_file(mut self, rel: &str) -> Self {
        self.skipped.push(rel.to_string());
        self
    }

    /// Write the tree and its `config.gypi`.
    pub fn build(self) -> TestTree {
        let src = tempfile::tempdir().expect("create source dir");
        for rel in SOURCE_FILES {
            if !self.skipped.iter().any(|s| s == rel) {
                write(src.path(), rel, &format!("contents of {rel}\n"));
            }
        }
        for (rel, content) in &self.extra_files {
            write(src.path(), rel, content);
        }

        let vars: Vec<String> = self
            .variables
            .iter()
            .map(|(k, v)| format!("                 '{k}': '{v}',"))
            .collect();
        let gypi = format!(
            "# Do not edit. Generated by the configure script.\n\
             {{ 'target_defaults': {{ 'default_configuration': 'Release'}},\n  \
             'variables': {{\n{}\n  }}\n}}\n",
            vars.join("\n")
        );
        write(src.path(), "config.gypi", &gypi);

        TestTree {
            src,
            dest: tempfile::tempdir().expect("create destination dir"),
            log: Arc::new(BufferedLog::new()),
        }
    }
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().expect("parent")).expect("create parent");
    std::fs::write(path, content).expect("write source file");
}
