/*!
 * Core types and data structures for ftpgen
 */

use std::fmt;
use std::path::{Path, PathBuf};

/// One transfer target, as read from the configuration file
#[derive(Clone, PartialEq, Eq)]
pub struct ServerProfile {
    /// Profile identifier
    pub id: String,
    /// Server address passed to `open`
    pub address: String,
    /// Login user
    pub user: String,
    /// Login password, already decoded
    pub password: String,
    /// Directory to mirror
    pub local_root: PathBuf,
    /// Directory the command file is written to
    pub output_directory: PathBuf,
    /// Name of the command file
    pub output_file_name: String,
    /// Folders merged into the root before generation
    pub additional_folders: Vec<PathBuf>,
}

impl ServerProfile {
    /// Leaf name of the local root, used to derive remote paths
    pub fn root_marker(&self) -> Option<String> {
        self.local_root
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
    }
}

impl fmt::Debug for ServerProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerProfile")
            .field("id", &self.id)
            .field("address", &self.address)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("local_root", &self.local_root)
            .field("output_directory", &self.output_directory)
            .field("output_file_name", &self.output_file_name)
            .field("additional_folders", &self.additional_folders)
            .finish()
    }
}

/// Represents a directory of the local tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    /// Directory name
    pub name: String,
    /// Absolute path
    pub path: PathBuf,
    /// Subdirectories, sorted by name
    pub children: Vec<DirectoryNode>,
    /// Names of the files directly inside, sorted
    pub files: Vec<String>,
}

impl DirectoryNode {
    /// Create an empty node for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = leaf_name(&path);
        Self {
            name,
            path,
            children: Vec::new(),
            files: Vec::new(),
        }
    }

    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }

    /// Number of directories in this subtree, including this one
    pub fn directory_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(DirectoryNode::directory_count)
            .sum::<usize>()
    }

    /// Number of files in this subtree
    pub fn file_count(&self) -> usize {
        self.files.len()
            + self
                .children
                .iter()
                .map(DirectoryNode::file_count)
                .sum::<usize>()
    }
}

fn leaf_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
