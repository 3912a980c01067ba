//! Domain-specific error types for the installer.
//!
//! Library modules return typed errors built with [`thiserror`]; the command
//! handlers at the CLI boundary convert them to [`anyhow::Error`] via `?` and
//! attach context naming the rule or path being processed.
//!
//! # Error hierarchy
//!
//! ```text
//! InstallError
//! ├── Config(ConfigError)  config.gypi missing, unparsable or incomplete
//! ├── Fs(FsError)          unexpected filesystem failures
//! └── Root(String)         source root could not be determined
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the installer.
#[derive(Error, Debug)]
pub enum InstallError {
    /// The build configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A filesystem operation failed with an error that is not part of the
    /// expected set (missing file on delete, existing directory on create,
    /// non-empty directory while pruning).
    #[error("Filesystem error: {0}")]
    Fs(#[from] FsError),

    /// The source tree root could not be located.
    #[error("cannot determine source root: {0}")]
    Root(String),
}

/// Errors raised while loading `config.gypi`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The configuration file is not a valid gypi literal.
    #[error("Invalid config syntax in {path}: {message}")]
    Parse {
        /// Path of the file that failed to parse.
        path: PathBuf,
        /// Parser message, including line and column when available.
        message: String,
    },

    /// A required top-level section is absent or is not a mapping.
    #[error("Missing required section '{0}'")]
    MissingSection(String),
}

/// Filesystem failures that abort the operation.
#[derive(Error, Debug)]
pub enum FsError {
    /// Creating a directory (or one of its ancestors) failed.
    #[error("cannot create directory {path}: {source}")]
    CreateDir {
        /// Directory being created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Removing a file or link failed.
    #[error("cannot remove {path}: {source}")]
    Remove {
        /// Path being removed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Removing an empty directory while pruning failed.
    #[error("cannot prune directory {path}: {source}")]
    Prune {
        /// Directory being pruned.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Copying a file failed.
    #[error("cannot copy {from} to {to}: {source}")]
    Copy {
        /// Source file.
        from: PathBuf,
        /// Destination file.
        to: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Creating a symbolic link failed.
    #[error("cannot create symlink {link} -> {target}: {source}")]
    Symlink {
        /// Path of the link being created.
        link: PathBuf,
        /// Relative path the link points at.
        target: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Walking a source directory failed.
    #[error("cannot walk {path}: {message}")]
    Walk {
        /// Directory being walked.
        path: PathBuf,
        /// Error reported by the walker.
        message: String,
    },

    /// A target path resolved outside the destination root.
    #[error("{path} is outside the destination root {root}")]
    OutsideRoot {
        /// Offending path.
        path: PathBuf,
        /// Destination root.
        root: PathBuf,
    },
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn config_error_io_display() {
        let e = ConfigError::Io {
            path: PathBuf::from("/src/config.gypi"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(e.to_string().contains("/src/config.gypi"));
        assert!(e.to_string().contains("IO error reading config file"));
    }

    #[test]
    fn config_error_io_has_source() {
        use std::error::Error as StdError;
        let e = ConfigError::Io {
            path: PathBuf::from("config.gypi"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.source().is_some());
    }

    #[test]
    fn config_error_parse_display() {
        let e = ConfigError::Parse {
            path: PathBuf::from("config.gypi"),
            message: "expected value at line 3".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Invalid config syntax in config.gypi: expected value at line 3"
        );
    }

    #[test]
    fn config_error_missing_section_display() {
        let e = ConfigError::MissingSection("variables".to_string());
        assert_eq!(e.to_string(), "Missing required section 'variables'");
    }

    #[test]
    fn fs_error_copy_display() {
        let e = FsError::Copy {
            from: PathBuf::from("out/Release/node"),
            to: PathBuf::from("/usr/local/bin/node"),
            source: io::Error::other("disk full"),
        };
        let msg = e.to_string();
        assert!(msg.contains("out/Release/node"));
        assert!(msg.contains("/usr/local/bin/node"));
        assert!(msg.contains("disk full"));
    }

    #[test]
    fn fs_error_outside_root_display() {
        let e = FsError::OutsideRoot {
            path: PathBuf::from("/etc"),
            root: PathBuf::from("/usr/local"),
        };
        assert_eq!(
            e.to_string(),
            "/etc is outside the destination root /usr/local"
        );
    }

    #[test]
    fn install_error_from_config_error() {
        let e: InstallError = ConfigError::MissingSection("target_defaults".to_string()).into();
        assert!(e.to_string().contains("Configuration error"));
        assert!(e.to_string().contains("target_defaults"));
    }

    #[test]
    fn install_error_from_fs_error() {
        let e: InstallError = FsError::Walk {
            path: PathBuf::from("deps/npm"),
            message: "permission denied".to_string(),
        }
        .into();
        assert!(e.to_string().contains("Filesystem error"));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<InstallError>();
        assert_send_sync::<ConfigError>();
        assert_send_sync::<FsError>();
    }

    #[test]
    fn errors_convert_to_anyhow() {
        let _config: anyhow::Error = ConfigError::MissingSection("x".to_string()).into();
        let _fs: anyhow::Error = FsError::OutsideRoot {
            path: PathBuf::from("/a"),
            root: PathBuf::from("/b"),
        }
        .into();
    }
}
