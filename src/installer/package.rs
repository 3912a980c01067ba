//! Installs and removes a bundled package tree and its `bin/` links.
use std::path::Path;

use super::{Action, Installer, Summary};
use crate::error::FsError;
use crate::fs::{create_symlink, walk};
use crate::manifest::DestTemplate;
use crate::manifest::package::{EXCLUDED_SUBTREE, PackageRule};

/// Apply `rule` with `action`.
///
/// A package whose install directory is a symlink (usually a development
/// checkout linked into place) is left alone for both actions.
pub(super) fn apply(
    installer: &Installer,
    action: Action,
    rule: &PackageRule,
    summary: &mut Summary,
) -> Result<(), FsError> {
    let install_dir = installer.root.resolve(&rule.install_dir())?;
    if install_dir
        .symlink_metadata()
        .is_ok_and(|meta| meta.file_type().is_symlink())
    {
        installer.log.warn(&format!(
            "skipping {}: {} is a symlink",
            rule.name,
            install_dir.display()
        ));
        summary.skipped_packages += 1;
        return Ok(());
    }

    let source_dir = installer.source(&rule.source_dir());
    for entry in walk(&source_dir, &[EXCLUDED_SUBTREE]) {
        let entry = entry?;
        if entry.is_dir {
            continue;
        }
        let Ok(relative) = entry.path.strip_prefix(&installer.source_root) else {
            continue;
        };
        let subdir = entry
            .path
            .parent()
            .and_then(|p| p.strip_prefix(&source_dir).ok())
            .unwrap_or_else(|| Path::new(""));
        let dest = DestTemplate::Dir(rule.install_dir().join(subdir));
        installer.transfer(action, &[relative.to_path_buf()], &dest, summary)?;
    }

    for &(alias, entry) in rule.bins {
        let bin = PackageRule::bin_path(alias);
        match action {
            Action::Install => {
                let link = installer.root.resolve(&bin)?;
                let target = rule.link_target(entry);
                installer.progress(&format!(
                    "symlinking {} -> {}",
                    target.display(),
                    link.display()
                ));
                summary.linked += 1;
                if !installer.dry_run {
                    create_symlink(&target, &link)?;
                }
            }
            Action::Uninstall => {
                installer.remove_from(&[bin.clone()], &DestTemplate::Exact(bin), summary)?;
            }
        }
    }
    Ok(())
}

#[cfg(all(test, unix))]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use super::*;
    use crate::config::BuildConfig;
    use crate::fs::DestRoot;
    use crate::logging::{BufferedLog, Log, LogEntry};
    use crate::manifest::package::{COREPACK, NPM};
    use crate::platform::{Os, Platform};

    fn setup() -> (tempfile::TempDir, tempfile::TempDir, Arc<BufferedLog>) {
        let src = tempfile::tempdir().unwrap();
        for rel in [
            "deps/npm/package.json",
            "deps/npm/bin/npm-cli.js",
            "deps/npm/bin/npx-cli.js",
            "deps/npm/lib/cli.js",
            "deps/npm/test/index.js",
            "deps/npm/node_modules/abbrev/test/basic.js",
            "deps/npm/node_modules/abbrev/lib/index.js",
        ] {
            let path = src.path().join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, rel).unwrap();
        }
        (src, tempfile::tempdir().unwrap(), Arc::new(BufferedLog::new()))
    }

    fn installer(src: &Path, dest: &Path, log: &Arc<BufferedLog>) -> Installer {
        Installer {
            config: BuildConfig::default(),
            platform: Platform::new(Os::Linux),
            source_root: src.to_path_buf(),
            root: DestRoot::from_path(dest).unwrap(),
            log: Arc::clone(log) as Arc<dyn Log>,
            dry_run: false,
        }
    }

    fn files_under(dir: &Path) -> Vec<PathBuf> {
        walk(dir, &[])
            .map(Result::unwrap)
            .filter(|e| !e.is_dir)
            .map(|e| e.path.strip_prefix(dir).unwrap().to_path_buf())
            .collect()
    }

    #[test]
    fn install_skips_test_subtrees_at_every_depth() {
        let (src, dest, log) = setup();
        let mut summary = Summary::default();

        apply(&installer(src.path(), dest.path(), &log), Action::Install, &NPM, &mut summary)
            .unwrap();

        let installed = files_under(&dest.path().join("lib/node_modules/npm"));
        assert_eq!(
            installed,
            vec![
                PathBuf::from("bin/npm-cli.js"),
                PathBuf::from("bin/npx-cli.js"),
                PathBuf::from("lib/cli.js"),
                PathBuf::from("node_modules/abbrev/lib/index.js"),
                PathBuf::from("package.json"),
            ]
        );
        assert_eq!(summary.installed, 5);
    }

    #[test]
    fn install_links_every_alias() {
        let (src, dest, log) = setup();
        let mut summary = Summary::default();

        apply(&installer(src.path(), dest.path(), &log), Action::Install, &NPM, &mut summary)
            .unwrap();

        assert_eq!(
            std::fs::read_link(dest.path().join("bin/npm")).unwrap(),
            PathBuf::from("../lib/node_modules/npm/bin/npm-cli.js")
        );
        assert_eq!(
            std::fs::read_to_string(dest.path().join("bin/npx")).unwrap(),
            "deps/npm/bin/npx-cli.js"
        );
        let root = dest.path().display().to_string();
        assert!(log.progress_lines().contains(&format!(
            "symlinking ../lib/node_modules/npm/bin/npm-cli.js -> {root}/bin/npm"
        )));
        assert_eq!(summary.linked, 2);
    }

    #[test]
    fn uninstall_removes_links_and_prunes_bin() {
        let (src, dest, log) = setup();
        let inst = installer(src.path(), dest.path(), &log);
        let mut summary = Summary::default();
        apply(&inst, Action::Install, &NPM, &mut summary).unwrap();

        apply(&inst, Action::Uninstall, &NPM, &mut summary).unwrap();

        assert!(!dest.path().join("bin").exists());
        assert!(!dest.path().join("lib").exists());
        assert!(dest.path().is_dir());
    }

    #[test]
    fn symlinked_install_dir_is_left_alone() {
        let (src, dest, log) = setup();
        let dev_checkout = tempfile::tempdir().unwrap();
        std::fs::write(dev_checkout.path().join("marker"), "dev").unwrap();
        std::fs::create_dir_all(dest.path().join("lib/node_modules")).unwrap();
        std::os::unix::fs::symlink(dev_checkout.path(), dest.path().join("lib/node_modules/npm"))
            .unwrap();
        let inst = installer(src.path(), dest.path(), &log);

        for action in [Action::Install, Action::Uninstall] {
            let mut summary = Summary::default();
            apply(&inst, action, &NPM, &mut summary).unwrap();
            assert_eq!(summary.skipped_packages, 1);
        }

        assert!(log.progress_lines().is_empty());
        let warnings = log
            .entries()
            .into_iter()
            .filter(|e| matches!(e, LogEntry::Warn(msg) if msg.starts_with("skipping npm:")))
            .count();
        assert_eq!(warnings, 2, "one warning per action");
        assert!(!dest.path().join("bin").exists());
        assert!(dev_checkout.path().join("marker").is_file());
    }

    #[test]
    fn missing_package_sources_still_link_aliases() {
        let (src, dest, log) = setup();
        let mut summary = Summary::default();

        apply(&installer(src.path(), dest.path(), &log), Action::Install, &COREPACK, &mut summary)
            .unwrap();

        assert_eq!(summary.installed, 0);
        assert!(
            dest.path()
                .join("bin/corepack")
                .symlink_metadata()
                .unwrap()
                .file_type()
                .is_symlink()
        );
    }
}
