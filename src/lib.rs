/*!
 * ftpgen - Generate FTP command scripts that mirror a local directory tree
 *
 * This library turns a local directory into a command file for the classic
 * command-line FTP client: connect, log in, delete the remote mirror,
 * recreate it, upload every file and disconnect. No network connection is
 * ever opened.
 */

pub mod command;
pub mod config;
pub mod error;
pub mod merge;
pub mod report;
pub mod scanner;
pub mod sequencer;
pub mod types;
pub mod writer;


// Re-export main components for easier access
pub use command::{emit, CommandLine, FtpCommand, LINE_ENDING};
pub use config::{Config, ConfigFile, ProfileEntry};
pub use error::{FtpGenError, Result};
pub use merge::{merge_additional_folders, MergeReport};
pub use report::{GenerationReport, Reporter};
pub use scanner::scan_tree;
pub use sequencer::{create_pass, delete_pass, RootOffset};
pub use types::{DirectoryNode, ServerProfile};
pub use writer::{Generation, OutputLocation, ScriptWriter};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
