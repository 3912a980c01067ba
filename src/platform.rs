//! Host platform identification.
//!
//! Only a few install decisions depend on the host: the executable and
//! shared library names (Windows), the man page location (FreeBSD and
//! OpenBSD) and the AIX export file.
use std::fmt;

/// Detected operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux and any Unix-like system without a dedicated variant.
    Linux,
    /// macOS.
    MacOs,
    /// Microsoft Windows.
    Windows,
    /// FreeBSD.
    FreeBsd,
    /// OpenBSD.
    OpenBsd,
    /// IBM AIX.
    Aix,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::MacOs => write!(f, "macos"),
            Self::Windows => write!(f, "windows"),
            Self::FreeBsd => write!(f, "freebsd"),
            Self::OpenBsd => write!(f, "openbsd"),
            Self::Aix => write!(f, "aix"),
        }
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Operating system family.
    pub os: Os,
}

impl Platform {
    /// Detect the current platform from the compilation target.
    #[must_use]
    pub const fn detect() -> Self {
        Self {
            os: Self::detect_os(),
        }
    }

    /// Create a platform with an explicit OS.
    #[must_use]
    pub const fn new(os: Os) -> Self {
        Self { os }
    }

    /// Whether the host is Windows.
    #[must_use]
    pub const fn is_windows(&self) -> bool {
        matches!(self.os, Os::Windows)
    }

    /// Whether the host is AIX, which ships an export-symbol file.
    #[must_use]
    pub const fn is_aix(&self) -> bool {
        matches!(self.os, Os::Aix)
    }

    /// Whether man pages live under `man/` instead of `share/man/`.
    #[must_use]
    pub const fn uses_bsd_man_layout(&self) -> bool {
        matches!(self.os, Os::FreeBsd | Os::OpenBsd)
    }

    const fn detect_os() -> Os {
        if cfg!(target_os = "windows") {
            Os::Windows
        } else if cfg!(target_os = "macos") {
            Os::MacOs
        } else if cfg!(target_os = "freebsd") {
            Os::FreeBsd
        } else if cfg!(target_os = "openbsd") {
            Os::OpenBsd
        } else if cfg!(target_os = "aix") {
            Os::Aix
        } else {
            Os::Linux
        }
    }
}
