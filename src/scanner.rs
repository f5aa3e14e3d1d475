/*!
 * Directory scanning functionality
 *
 * Reads the local tree one level at a time into `DirectoryNode`s. Entries
 * are sorted by name so the generated script is deterministic.
 *
 * Entries that cannot be read are logged and skipped. An unreadable
 * subdirectory therefore appears empty: the delete pass emits `cd` and
 * `rmdir` for it without `mdelete *`, and that `rmdir` fails on the server
 * if the remote directory still holds files.
 */

use std::io;
use std::path::Path;

use log::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::types::DirectoryNode;

/// Scan the directory at `root` and return its tree
pub fn scan_tree(root: &Path) -> io::Result<DirectoryNode> {
    if !root.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Directory not found: {}", root.display()),
        ));
    }
    Ok(scan_directory(root))
}

/// Scan a directory and return its node representation
fn scan_directory(abs_path: &Path) -> DirectoryNode {
    let mut node = DirectoryNode::new(abs_path);

    let entries: Vec<DirEntry> = WalkDir::new(abs_path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", abs_path.display(), e);
                None
            }
        })
        .collect();

    // Split into directories and files
    let (dirs, files): (Vec<_>, Vec<_>) =
        entries.into_iter().partition(|e| e.file_type().is_dir());

    node.files = files
        .iter()
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();

    for entry in dirs {
        node.children.push(scan_directory(entry.path()));
    }

    debug!(
        "Scanned {}: {} files, {} subdirectories",
        abs_path.display(),
        node.files.len(),
        node.children.len()
    );

    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::tempdir;

    #[test]
    fn test_scan_sorted_tree() -> io::Result<()> {
        let temp_dir = tempdir()?;
        let root = temp_dir.path().join("site");
        fs::create_dir_all(root.join("zeta"))?;
        fs::create_dir_all(root.join("alpha").join("inner"))?;
        File::create(root.join("b.txt"))?;
        File::create(root.join("a.txt"))?;
        File::create(root.join("alpha").join("c.txt"))?;

        let tree = scan_tree(&root)?;

        assert_eq!(tree.name, "site");
        assert_eq!(tree.files, vec!["a.txt", "b.txt"]);
        let names: Vec<_> = tree.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
        assert_eq!(tree.children[0].files, vec!["c.txt"]);
        assert_eq!(tree.children[0].children[0].path, root.join("alpha").join("inner"));
        assert!(!tree.children[1].has_files());

        Ok(())
    }

    #[test]
    fn test_scan_missing_root() {
        let temp_dir = tempdir().unwrap();
        let err = scan_tree(&temp_dir.path().join("missing")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
