/*!
 * Command file writer for ftpgen
 *
 * Opens the destination file, falling back once to the user's desktop, and
 * writes the full script: connect, login, delete pass, create pass,
 * disconnect.
 */

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::command::{emit, CommandLine, FtpCommand};
use crate::error::{FtpGenError, Result};
use crate::merge::{merge_additional_folders, MergeReport};
use crate::scanner::scan_tree;
use crate::sequencer::{create_pass, delete_pass, RootOffset};
use crate::types::ServerProfile;

/// Where the command file goes; relocated at most once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLocation {
    directory: PathBuf,
    file_name: String,
    relocated: bool,
}

impl OutputLocation {
    /// Location configured in the profile
    pub fn configured(profile: &ServerProfile) -> Self {
        Self {
            directory: profile.output_directory.clone(),
            file_name: profile.output_file_name.clone(),
            relocated: false,
        }
    }

    /// Move the location to another directory, returns None if already moved
    pub fn relocate(self, directory: impl Into<PathBuf>) -> Option<Self> {
        if self.relocated {
            return None;
        }
        Some(Self {
            directory: directory.into(),
            file_name: self.file_name,
            relocated: true,
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    pub fn is_relocated(&self) -> bool {
        self.relocated
    }
}

/// Result of a successful generation
#[derive(Debug)]
pub struct Generation {
    /// Directory the file was actually written to
    pub output_directory: PathBuf,
    /// Full path of the command file
    pub output_path: PathBuf,
    /// Whether the desktop fallback was used
    pub used_fallback: bool,
    /// Outcome of the additional-folder merge
    pub merge: MergeReport,
    /// Directories mirrored, including the root
    pub directories: usize,
    /// Files uploaded
    pub files: usize,
    /// Lines written to the command file
    pub lines_written: usize,
}

/// Writer producing FTP command files
pub struct ScriptWriter {
    /// Directory used when the configured one cannot be written
    fallback_dir: Option<PathBuf>,
}

impl Default for ScriptWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptWriter {
    /// Create a writer that falls back to the current user's desktop
    pub fn new() -> Self {
        Self {
            fallback_dir: dirs::desktop_dir(),
        }
    }

    /// Create a writer with an explicit fallback directory
    pub fn with_fallback_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            fallback_dir: Some(dir.into()),
        }
    }

    /// Generate the command file for `profile`
    pub fn generate(&self, profile: &ServerProfile) -> Result<Generation> {
        let root = std::path::absolute(&profile.local_root)?;
        if !root.is_dir() {
            return Err(FtpGenError::SourceTreeMissing(profile.local_root.clone()));
        }
        let marker = match root.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => return Err(FtpGenError::InvalidRoot(root)),
        };
        let offset = RootOffset::locate(&root, &marker);
        debug!("Root marker {:?} ends at byte {}", marker, offset.value());

        let (location, file) = self.open(OutputLocation::configured(profile))?;
        let mut writer = BufWriter::new(file);

        let mut lines_written = write_lines(
            &mut writer,
            &[
                emit(FtpCommand::OpenConnection, Some(&profile.address)),
                CommandLine::raw(profile.user.as_str()),
                CommandLine::raw(profile.password.as_str()),
            ],
        )?;

        let merge = merge_additional_folders(&root, &profile.additional_folders);
        if !merge.is_clean() {
            warn!(
                "{} additional-folder entries could not be merged",
                merge.failures.len()
            );
        }
        let tree = scan_tree(&root)?;

        lines_written += write_lines(&mut writer, &delete_pass(&tree, offset))?;
        lines_written += write_lines(&mut writer, &create_pass(&tree, offset))?;
        lines_written += write_lines(
            &mut writer,
            &[
                emit(FtpCommand::Disconnect, None),
                emit(FtpCommand::ReturnToSystem, None),
            ],
        )?;
        writer.flush()?;

        let output_path = location.path();
        info!("FTP command file generated at {}", location.directory().display());

        Ok(Generation {
            output_directory: location.directory().to_path_buf(),
            output_path,
            used_fallback: location.is_relocated(),
            merge,
            directories: tree.directory_count(),
            files: tree.file_count(),
            lines_written,
        })
    }

    /// Open the command file, relocating to the fallback directory once
    fn open(&self, location: OutputLocation) -> Result<(OutputLocation, File)> {
        let first_err = match create_script_file(&location.path()) {
            Ok(file) => return Ok((location, file)),
            Err(e) => e,
        };

        let failed_path = location.path();
        let Some(fallback) = self.fallback_dir.clone() else {
            return Err(FtpGenError::OutputPathUnwritable {
                path: failed_path,
                source: first_err,
            });
        };
        warn!(
            "Cannot create {} ({}), writing to {} instead",
            failed_path.display(),
            first_err,
            fallback.display()
        );

        let Some(location) = location.relocate(fallback) else {
            return Err(FtpGenError::OutputPathUnwritable {
                path: failed_path,
                source: first_err,
            });
        };

        match create_script_file(&location.path()) {
            Ok(file) => Ok((location, file)),
            Err(source) => Err(FtpGenError::OutputPathUnwritable {
                path: location.path(),
                source,
            }),
        }
    }
}

/// Write every line and return how many were written
fn write_lines<W: Write>(writer: &mut W, lines: &[CommandLine]) -> io::Result<usize> {
    for line in lines {
        line.write_to(writer)?;
    }
    Ok(lines.len())
}

/// Replace any existing file at `path` with a new empty one
fn create_script_file(path: &Path) -> io::Result<File> {
    if path.is_file() {
        fs::remove_file(path)?;
    }
    File::create(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> ServerProfile {
        ServerProfile {
            id: "prod".to_string(),
            address: "10.0.0.5".to_string(),
            user: "deploy".to_string(),
            password: "secret".to_string(),
            local_root: PathBuf::from("/srv/site"),
            output_directory: PathBuf::from("/srv/out"),
            output_file_name: "deploy.ftp".to_string(),
            additional_folders: vec![],
        }
    }

    #[test]
    fn test_output_location_relocates_once() {
        let location = OutputLocation::configured(&profile());
        assert_eq!(location.path(), PathBuf::from("/srv/out/deploy.ftp"));
        assert!(!location.is_relocated());

        let moved = location.relocate("/home/u/Desktop").unwrap();
        assert_eq!(moved.path(), PathBuf::from("/home/u/Desktop/deploy.ftp"));
        assert!(moved.is_relocated());

        assert!(moved.relocate("/tmp").is_none());
    }

    #[test]
    fn test_no_fallback_directory_fails_on_first_error() -> io::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let root = temp_dir.path().join("site");
        fs::create_dir_all(&root)?;
        let missing = temp_dir.path().join("missing");

        let mut profile = profile();
        profile.local_root = root;
        profile.output_directory = missing.clone();

        let writer = ScriptWriter { fallback_dir: None };
        let err = writer.generate(&profile).unwrap_err();

        match err {
            FtpGenError::OutputPathUnwritable { path, .. } => {
                assert_eq!(path, missing.join("deploy.ftp"));
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(!missing.exists());

        Ok(())
    }
}
