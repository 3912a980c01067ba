//! Path and filesystem primitives.
//!
//! Every helper here treats one specific error kind as success (a missing
//! file on delete, an existing directory on create, a non-empty or missing
//! directory while pruning) and propagates everything else as [`FsError`].
use std::io;
use std::path::{Component, Path, PathBuf};

use filetime::FileTime;
use walkdir::WalkDir;

use crate::error::FsError;

/// Lexically normalise `path`: drop `.` components and resolve `..` against
/// the preceding component. `..` directly under the root is discarded.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}

/// Join `parts` and turn the result into a normalised absolute path.
///
/// Relative input is resolved against the current working directory.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn resolve_absolute<I, P>(parts: I) -> io::Result<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let joined: PathBuf = parts.into_iter().collect();
    Ok(normalize(&std::path::absolute(joined)?))
}

/// The directory under which every installed path lives.
///
/// Formed by concatenating the staging directory and the install prefix
/// (the same way `DESTDIR` and `PREFIX` are combined by make), then made
/// absolute against a base directory. The root itself is never removed by
/// pruning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestRoot {
    path: PathBuf,
}

impl DestRoot {
    /// Build the root from a staging directory and an install prefix.
    ///
    /// A relative concatenation is resolved against `base` (the source root),
    /// not the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` is relative and the current directory is
    /// unavailable.
    pub fn new(base: &Path, staging: &str, prefix: &str) -> io::Result<Self> {
        Self::from_path(&base.join(format!("{staging}{prefix}/")))
    }

    /// Use an existing path as the root.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory is needed and unavailable.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        Ok(Self {
            path: resolve_absolute([path])?,
        })
    }

    /// The absolute root path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `path` lies strictly below the root.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        path != self.path && path.starts_with(&self.path)
    }

    /// Resolve `relative` below the root.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::OutsideRoot`] if the normalised result escapes the
    /// root (an absolute input or too many `..` components).
    pub fn resolve(&self, relative: &Path) -> Result<PathBuf, FsError> {
        let target = normalize(&self.path.join(relative));
        if self.contains(&target) {
            Ok(target)
        } else {
            Err(FsError::OutsideRoot {
                path: target,
                root: self.path.clone(),
            })
        }
    }
}

/// Delete a file or link, succeeding if nothing is there.
///
/// # Errors
///
/// Returns [`FsError::Remove`] for any error other than "not found".
pub fn remove_if_exists(path: &Path) -> Result<(), FsError> {
    match std::fs::remove_file(path) {
        Err(source) if source.kind() != io::ErrorKind::NotFound => Err(FsError::Remove {
            path: path.to_path_buf(),
            source,
        }),
        _ => Ok(()),
    }
}

/// Create `path` and any missing ancestors, succeeding if it already exists.
///
/// # Errors
///
/// Returns [`FsError::CreateDir`] for any error other than "already exists".
pub fn create_dir_tree(path: &Path) -> Result<(), FsError> {
    match std::fs::create_dir_all(path) {
        Err(source) if source.kind() != io::ErrorKind::AlreadyExists => Err(FsError::CreateDir {
            path: path.to_path_buf(),
            source,
        }),
        _ => Ok(()),
    }
}

/// Ensure the parent directory of `path` exists.
///
/// # Errors
///
/// Propagates [`create_dir_tree`] failures.
pub fn ensure_parent_dir(path: &Path) -> Result<(), FsError> {
    path.parent().map_or(Ok(()), create_dir_tree)
}

/// Remove `start` and then each of its ancestors while they are empty,
/// never touching `root` or anything above it.
///
/// Stops quietly at the first directory that is not empty or does not exist.
///
/// # Errors
///
/// Returns [`FsError::Prune`] for any other failure (e.g. permission denied).
pub fn prune_empty_ancestors(start: &Path, root: &DestRoot) -> Result<(), FsError> {
    let mut dir = normalize(start);
    while root.contains(&dir) {
        match std::fs::remove_dir(&dir) {
            Ok(()) => {}
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::DirectoryNotEmpty | io::ErrorKind::NotFound
                ) =>
            {
                return Ok(());
            }
            Err(source) => return Err(FsError::Prune { path: dir, source }),
        }
        if !dir.pop() {
            break;
        }
    }
    Ok(())
}

/// Replace whatever is at `link` with a symlink to `target`.
///
/// `target` is stored verbatim, so a relative target is resolved against the
/// link's own directory and the installed tree stays relocatable.
///
/// # Errors
///
/// Returns an error if the old entry cannot be removed, the parent cannot be
/// created, or the link cannot be made.
pub fn create_symlink(target: &Path, link: &Path) -> Result<(), FsError> {
    remove_if_exists(link)?;
    ensure_parent_dir(link)?;
    symlink(target, link).map_err(|source| FsError::Symlink {
        link: link.to_path_buf(),
        target: target.to_path_buf(),
        source,
    })
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

/// Copy `from` to `to`, keeping permission bits and access/modification
/// times.
///
/// # Errors
///
/// Returns [`FsError::Copy`] if reading, writing, or setting times fails.
pub fn copy_preserving(from: &Path, to: &Path) -> Result<(), FsError> {
    let copy_error = |source| FsError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };
    std::fs::copy(from, to).map_err(copy_error)?;
    let meta = std::fs::metadata(from).map_err(copy_error)?;
    filetime::set_file_times(
        to,
        FileTime::from_last_access_time(&meta),
        FileTime::from_last_modification_time(&meta),
    )
    .map_err(copy_error)
}

/// One entry produced by [`walk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Path of the entry, starting with the walked root.
    pub path: PathBuf,
    /// Whether the entry is a directory (or a link to one, which is listed
    /// but not descended into).
    pub is_dir: bool,
}

/// Depth-first walk of `root`, sorted by file name, that never descends
/// into a directory whose name is in `excluded`.
///
/// The sequence is lazy and can be restarted by calling `walk` again. A
/// missing `root` yields nothing.
pub fn walk<'a>(
    root: &Path,
    excluded: &'a [&'a str],
) -> impl Iterator<Item = Result<WalkEntry, FsError>> + use<'a> {
    let walked = root.to_path_buf();
    let walker = root.is_dir().then(|| {
        WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |e| {
                e.depth() == 0
                    || !e.file_type().is_dir()
                    || !excluded.iter().any(|name| e.file_name() == *name)
            })
    });

    walker.into_iter().flatten().map(move |entry| {
        entry
            .map(|e| WalkEntry {
                is_dir: e.file_type().is_dir() || (e.path_is_symlink() && e.path().is_dir()),
                path: e.into_path(),
            })
            .map_err(|e| FsError::Walk {
                path: walked.clone(),
                message: e.to_string(),
            })
    })
}
