// ABOUTME: Single-slot backup of known_hosts and the undo that restores from it
// ABOUTME: Each removal overwrites the .backup copy; each undo snapshots into .pre-undo first

use crate::config::HostsPaths;
use crate::error::{FixError, Result};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use tracing::{debug, info};

/// Snapshot the current known_hosts file into the backup slot, replacing any
/// earlier backup. The primary file must not be modified if this fails.
pub fn create_backup(paths: &HostsPaths) -> Result<()> {
    debug!(
        "Backing up {} to {}",
        paths.known_hosts.display(),
        paths.backup.display()
    );
    copy_file(&paths.known_hosts, &paths.backup, paths.file_mode).map_err(FixError::Backup)?;
    info!("Created backup {}", paths.backup.display());
    Ok(())
}

/// Put the backup slot back in place of known_hosts.
///
/// The current file is copied to the pre-undo slot first so the undo itself
/// can be reversed by hand. The two copies are not atomic as a pair: when the
/// restore step fails the pre-undo copy has already been written.
///
/// Only one backup is ever kept, so running this twice in a row restores the
/// same backup twice and the pre-undo slot ends up holding the restored
/// content.
pub fn restore(paths: &HostsPaths) -> Result<()> {
    debug!(
        "Saving {} to {} before undo",
        paths.known_hosts.display(),
        paths.pre_undo.display()
    );
    copy_file(&paths.known_hosts, &paths.pre_undo, paths.file_mode).map_err(FixError::PreUndo)?;

    debug!(
        "Restoring {} from {}",
        paths.known_hosts.display(),
        paths.backup.display()
    );
    copy_file(&paths.backup, &paths.known_hosts, paths.file_mode).map_err(FixError::Restore)?;

    info!("Restored {} from backup", paths.known_hosts.display());
    Ok(())
}

/// Byte-for-byte copy. `mode` applies when `to` is created.
fn copy_file(from: &Path, to: &Path, mode: u32) -> io::Result<()> {
    let content = fs::read(from)?;

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(mode);
    #[cfg(not(unix))]
    let _ = mode;

    let mut file = options.open(to)?;
    file.write_all(&content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ORIGINAL: &str = "alpha ssh-rsa AAAA\nbeta ssh-rsa BBBB\ngamma ssh-rsa CCCC\n";
    const EDITED: &str = "alpha ssh-rsa AAAA\ngamma ssh-rsa CCCC\n";

    fn setup(content: &str) -> (TempDir, HostsPaths) {
        let dir = TempDir::new().unwrap();
        let paths = HostsPaths::new(dir.path().join("known_hosts"), 0o666);
        fs::write(&paths.known_hosts, content).unwrap();
        (dir, paths)
    }

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_create_backup_copies_verbatim() {
        let (_dir, paths) = setup(ORIGINAL);

        create_backup(&paths).unwrap();

        assert_eq!(read(&paths.backup), ORIGINAL);
        assert_eq!(read(&paths.known_hosts), ORIGINAL);
    }

    #[test]
    fn test_create_backup_overwrites_previous_backup() {
        let (_dir, paths) = setup(ORIGINAL);
        fs::write(&paths.backup, "stale content that is much longer than the new file\n").unwrap();

        create_backup(&paths).unwrap();

        assert_eq!(read(&paths.backup), ORIGINAL);
    }

    #[test]
    fn test_create_backup_without_source_fails() {
        let dir = TempDir::new().unwrap();
        let paths = HostsPaths::new(dir.path().join("known_hosts"), 0o666);

        let err = create_backup(&paths).unwrap_err();

        assert!(matches!(err, FixError::Backup(_)));
        assert!(err.is_fatal());
        assert!(!paths.backup.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_backup_created_with_requested_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let paths = HostsPaths::new(dir.path().join("known_hosts"), 0o600);
        fs::write(&paths.known_hosts, ORIGINAL).unwrap();

        create_backup(&paths).unwrap();

        let mode = fs::metadata(&paths.backup).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_restore_brings_back_backup_and_saves_pre_undo() {
        let (_dir, paths) = setup(EDITED);
        fs::write(&paths.backup, ORIGINAL).unwrap();

        restore(&paths).unwrap();

        assert_eq!(read(&paths.known_hosts), ORIGINAL);
        assert_eq!(read(&paths.pre_undo), EDITED);
        assert_eq!(read(&paths.backup), ORIGINAL);
    }

    #[test]
    fn test_restore_without_backup_fails_after_pre_undo() {
        let (_dir, paths) = setup(EDITED);

        let err = restore(&paths).unwrap_err();

        assert!(matches!(err, FixError::Restore(_)));
        assert_eq!(err.to_string(), "could not restore file, exiting");
        // No rollback: the pre-undo copy stays, the primary is untouched
        assert_eq!(read(&paths.pre_undo), EDITED);
        assert_eq!(read(&paths.known_hosts), EDITED);
    }

    #[test]
    fn test_restore_without_hosts_file_fails_at_pre_undo() {
        let dir = TempDir::new().unwrap();
        let paths = HostsPaths::new(dir.path().join("known_hosts"), 0o666);
        fs::write(&paths.backup, ORIGINAL).unwrap();

        let err = restore(&paths).unwrap_err();

        assert!(matches!(err, FixError::PreUndo(_)));
        assert_eq!(err.to_string(), "could not create pre-undo file, exiting");
        assert!(!paths.known_hosts.exists());
        assert!(!paths.pre_undo.exists());
    }

    #[test]
    fn test_double_undo_restores_same_backup() {
        let (_dir, paths) = setup(EDITED);
        fs::write(&paths.backup, ORIGINAL).unwrap();

        restore(&paths).unwrap();
        assert_eq!(read(&paths.known_hosts), ORIGINAL);
        assert_eq!(read(&paths.pre_undo), EDITED);

        restore(&paths).unwrap();
        assert_eq!(read(&paths.known_hosts), ORIGINAL);
        // The edited version is gone from every slot after the second undo
        assert_eq!(read(&paths.pre_undo), ORIGINAL);
    }
}
