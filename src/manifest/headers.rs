//! Public headers needed to build native addons against the runtime.
use std::path::{Path, PathBuf};

use super::{BUILD_OUTPUT_DIR, DestTemplate, Manifest};
use crate::config::BuildConfig;
use crate::error::FsError;
use crate::fs::walk;
use crate::platform::Platform;

/// Destination directory for every header.
pub const INCLUDE_DIR: &str = "include/node";

/// Headers and build metadata that are always installed.
const CORE_HEADERS: &[&str] = &[
    "common.gypi",
    "config.gypi",
    "src/node.h",
    "src/node_api.h",
    "src/js_native_api.h",
    "src/js_native_api_types.h",
    "src/node_api_types.h",
    "src/node_buffer.h",
    "src/node_object_wrap.h",
    "src/node_version.h",
];

/// The part of V8's include tree that addons may use.
const V8_HEADERS: &[&str] = &[
    "deps/v8/include/cppgc/common.h",
    "deps/v8/include/libplatform/libplatform.h",
    "deps/v8/include/libplatform/libplatform-export.h",
    "deps/v8/include/libplatform/v8-tracing.h",
    "deps/v8/include/v8.h",
    "deps/v8/include/v8-internal.h",
    "deps/v8/include/v8-platform.h",
    "deps/v8/include/v8-profiler.h",
    "deps/v8/include/v8-version.h",
    "deps/v8/include/v8config.h",
];

/// Append the header rules to `manifest`.
///
/// Bundled dependency headers (libuv, OpenSSL, zlib) are only added when the
/// runtime was built against the bundled copy rather than a system library.
///
/// # Errors
///
/// Returns an error if walking one of the include trees fails.
pub fn select(
    manifest: &mut Manifest,
    config: &BuildConfig,
    platform: &Platform,
    source_root: &Path,
) -> Result<(), FsError> {
    let include = format!("{INCLUDE_DIR}/");
    manifest.files(CORE_HEADERS.iter().copied(), &include);

    if platform.is_aix() {
        manifest.files([format!("{BUILD_OUTPUT_DIR}/node.exp")], &include);
    }

    subdir_headers(manifest, source_root, "deps/v8/include", INCLUDE_DIR, |p| {
        V8_HEADERS.iter().any(|h| Path::new(h) == p)
    })?;

    if config.is_false("node_shared_libuv") {
        subdir_headers(manifest, source_root, "deps/uv/include", INCLUDE_DIR, |_| true)?;
    }

    if config.is_true("node_use_openssl") && config.is_false("node_shared_openssl") {
        let openssl = format!("{INCLUDE_DIR}/openssl");
        subdir_headers(
            manifest,
            source_root,
            "deps/openssl/openssl/include/openssl",
            &openssl,
            |_| true,
        )?;
        subdir_headers(
            manifest,
            source_root,
            "deps/openssl/config/archs",
            &format!("{openssl}/archs"),
            |_| true,
        )?;
        subdir_headers(manifest, source_root, "deps/openssl/config", &openssl, |_| true)?;
    }

    if config.is_false("node_shared_zlib") {
        manifest.files(["deps/zlib/zconf.h", "deps/zlib/zlib.h"], &include);
    }

    Ok(())
}

/// Add every `.h` file below `source_dir` accepted by `wanted`, mirroring
/// its directory structure under `dest`.
///
/// One rule per directory, ordered top-down: a directory's rule comes before
/// the rules of its subdirectories.
///
/// Paths handed to `wanted` and stored in the manifest are relative to
/// `source_root`.
fn subdir_headers(
    manifest: &mut Manifest,
    source_root: &Path,
    source_dir: &str,
    dest: &str,
    wanted: impl Fn(&Path) -> bool,
) -> Result<(), FsError> {
    let base = source_root.join(source_dir);
    let mut by_dir: Vec<(PathBuf, Vec<PathBuf>)> = Vec::new();

    for entry in walk(&base, &[]) {
        let entry = entry?;
        if entry.is_dir {
            let subdir = entry.path.strip_prefix(&base).map(Path::to_path_buf);
            by_dir.push((subdir.unwrap_or_default(), Vec::new()));
            continue;
        }
        if entry.path.extension().is_none_or(|ext| ext != "h") {
            continue;
        }
        let Ok(relative) = entry.path.strip_prefix(source_root) else {
            continue;
        };
        if !wanted(relative) {
            continue;
        }
        let subdir = entry
            .path
            .parent()
            .and_then(|p| p.strip_prefix(&base).ok())
            .map(Path::to_path_buf)
            .unwrap_or_default();
        match by_dir.iter_mut().find(|(dir, _)| *dir == subdir) {
            Some((_, sources)) => sources.push(relative.to_path_buf()),
            None => by_dir.push((subdir, vec![relative.to_path_buf()])),
        }
    }

    for (subdir, sources) in by_dir {
        manifest.push_files(sources, DestTemplate::Dir(Path::new(dest).join(subdir)));
    }
    Ok(())
}
