/*!
 * Additional-folder merging
 *
 * Moves the direct files of each additional folder into a same-named
 * subdirectory of the root before the tree is scanned. Subfolders of an
 * additional folder are not merged.
 */

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::FtpGenError;

/// Outcome of merging additional folders into the root
#[derive(Debug, Default)]
pub struct MergeReport {
    /// Destination paths of the files that were moved
    pub moved: Vec<PathBuf>,
    /// Source files left in place because the destination already existed
    pub skipped: Vec<PathBuf>,
    /// Individual failures; none of them stops the merge
    pub failures: Vec<FtpGenError>,
}

impl MergeReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn fail(&mut self, path: &Path, source: io::Error) {
        warn!("Could not merge {}: {}", path.display(), source);
        self.failures.push(FtpGenError::AdditionalFolderMerge {
            path: path.to_path_buf(),
            source,
        });
    }
}

/// Merge every folder of `folders` into `root`, in order
pub fn merge_additional_folders(root: &Path, folders: &[PathBuf]) -> MergeReport {
    let mut report = MergeReport::default();

    for folder in folders {
        merge_folder(root, folder, &mut report);
    }

    if !folders.is_empty() {
        info!(
            "Merged {} additional folders: {} moved, {} skipped, {} failed",
            folders.len(),
            report.moved.len(),
            report.skipped.len(),
            report.failures.len()
        );
    }

    report
}

fn merge_folder(root: &Path, folder: &Path, report: &mut MergeReport) {
    let Some(name) = folder.file_name() else {
        report.fail(
            folder,
            io::Error::new(io::ErrorKind::InvalidInput, "folder has no name"),
        );
        return;
    };

    if !folder.is_dir() {
        report.fail(
            folder,
            io::Error::new(io::ErrorKind::NotFound, "folder not found"),
        );
        return;
    }

    let target_dir = root.join(name);
    if let Err(e) = fs::create_dir_all(&target_dir) {
        report.fail(&target_dir, e);
        return;
    }

    for entry in WalkDir::new(folder).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(folder).to_path_buf();
                report.fail(&path, e.into());
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        let destination = target_dir.join(entry.file_name());
        if destination.exists() {
            debug!("Keeping {}, {} already exists", entry.path().display(), destination.display());
            report.skipped.push(entry.path().to_path_buf());
            continue;
        }

        match move_file(entry.path(), &destination) {
            Ok(()) => {
                debug!("Moved {} to {}", entry.path().display(), destination.display());
                report.moved.push(destination);
            }
            Err(e) => report.fail(entry.path(), e),
        }
    }
}

/// Rename `from` to `to`, copying then removing when a rename is impossible
///
/// On failure the file is left only at `from`.
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }

    fs::copy(from, to)?;
    if let Err(e) = fs::remove_file(from) {
        let _ = fs::remove_file(to);
        return Err(e);
    }
    Ok(())
}
