/*!
 * Command sequencing for the mirrored tree
 *
 * Two recursive passes over a scanned tree: the delete pass empties and
 * removes the remote mirror bottom-up, the create pass recreates it
 * top-down and uploads every directory's files.
 */

use std::path::{Path, MAIN_SEPARATOR};

use crate::command::{emit, CommandLine, FtpCommand};
use crate::types::DirectoryNode;

/// Byte offset into a local path string where the remote-relative part starts
///
/// Computed once from the root path and shared by every node of both
/// passes. Descendants share the root's prefix, so the same offset applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootOffset(usize);

impl RootOffset {
    /// Locate the last occurrence of `marker` in `root` and point past it
    pub fn locate(root: &Path, marker: &str) -> Self {
        let root = root.to_string_lossy();
        let offset = match root.rfind(marker) {
            Some(index) => index + marker.len(),
            None => root.len(),
        };
        Self(offset)
    }

    pub fn value(self) -> usize {
        self.0
    }

    /// Remote path of a local path under the root; the root itself is `/`
    pub fn remote_path(self, local: &Path) -> String {
        let local = local.to_string_lossy();
        let suffix = local.get(self.0..).unwrap_or_default();
        if suffix.is_empty() {
            return "/".to_string();
        }
        if MAIN_SEPARATOR == '/' {
            suffix.to_string()
        } else {
            suffix.replace(MAIN_SEPARATOR, "/")
        }
    }
}

/// Commands that delete the whole remote mirror of `root`
pub fn delete_pass(root: &DirectoryNode, offset: RootOffset) -> Vec<CommandLine> {
    let mut commands = Vec::new();
    delete_directory(root, offset, &mut commands);
    commands
}

fn delete_directory(node: &DirectoryNode, offset: RootOffset, out: &mut Vec<CommandLine>) {
    let remote = offset.remote_path(&node.path);
    out.push(emit(FtpCommand::ChangeRemoteFolder, Some(&remote)));

    if node.has_files() {
        out.push(emit(FtpCommand::DeleteAllFiles, None));
    }

    for child in &node.children {
        delete_directory(child, offset, out);
        // the recursive call left the remote cursor inside the child
        out.push(emit(FtpCommand::ChangeRemoteFolder, Some(&remote)));
        out.push(emit(FtpCommand::DeleteDirectory, Some(&child.name)));
    }
}

/// Commands that recreate the remote mirror of `root` and upload its files
pub fn create_pass(root: &DirectoryNode, offset: RootOffset) -> Vec<CommandLine> {
    let mut commands = Vec::new();
    create_directory(root, offset, &mut commands);
    commands
}

fn create_directory(node: &DirectoryNode, offset: RootOffset, out: &mut Vec<CommandLine>) {
    let local = node.path.to_string_lossy();
    out.push(emit(FtpCommand::ChangeLocalFolder, Some(&local)));
    out.push(emit(
        FtpCommand::ChangeRemoteFolder,
        Some(&offset.remote_path(&node.path)),
    ));

    if node.has_files() {
        out.push(emit(FtpCommand::CopyAllFiles, None));
    }

    for child in &node.children {
        out.push(emit(FtpCommand::CreateDirectory, Some(&child.name)));
    }

    for child in &node.children {
        create_directory(child, offset, out);
    }
}
