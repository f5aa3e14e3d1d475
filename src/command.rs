/*!
 * FTP command vocabulary and line rendering
 *
 * The literal tokens below are the contract with the downstream `ftp -s:`
 * client and must stay byte-for-byte identical.
 */

use std::fmt;
use std::io::{self, Write};

use strum::{Display, EnumIter, IntoStaticStr};

/// Line terminator appended to every command line
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
/// Line terminator appended to every command line
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Commands understood by the command-line FTP client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, IntoStaticStr)]
pub enum FtpCommand {
    #[strum(serialize = "open")]
    OpenConnection,
    #[strum(serialize = "mkdir")]
    CreateDirectory,
    #[strum(serialize = "rmdir")]
    DeleteDirectory,
    #[strum(serialize = "mput *")]
    CopyAllFiles,
    #[strum(serialize = "mdelete *")]
    DeleteAllFiles,
    #[strum(serialize = "disconnect")]
    Disconnect,
    #[strum(serialize = "cd")]
    ChangeRemoteFolder,
    #[strum(serialize = "lcd")]
    ChangeLocalFolder,
    #[strum(serialize = "bye")]
    ReturnToSystem,
}

impl FtpCommand {
    /// Literal token written to the command file
    pub fn token(self) -> &'static str {
        self.into()
    }

    /// Whether the command is followed by an argument
    pub fn takes_argument(self) -> bool {
        matches!(
            self,
            FtpCommand::OpenConnection
                | FtpCommand::CreateDirectory
                | FtpCommand::DeleteDirectory
                | FtpCommand::ChangeRemoteFolder
                | FtpCommand::ChangeLocalFolder
        )
    }
}

/// A single rendered line of the command file, without its terminator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    text: String,
}

impl CommandLine {
    /// Line carrying text with no command token, used for login credentials
    pub fn raw(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Text of the line
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Write the line followed by the platform line terminator
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.text.as_bytes())?;
        writer.write_all(LINE_ENDING.as_bytes())
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Render one command into its textual line
///
/// Commands without an argument always render as the bare token.
pub fn emit(kind: FtpCommand, argument: Option<&str>) -> CommandLine {
    match argument {
        Some(arg) if kind.takes_argument() => {
            CommandLine::raw(format!("{} {}", kind.token(), arg))
        }
        _ => CommandLine::raw(kind.token()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_token_table() {
        let expected = [
            (FtpCommand::OpenConnection, "open"),
            (FtpCommand::CreateDirectory, "mkdir"),
            (FtpCommand::DeleteDirectory, "rmdir"),
            (FtpCommand::CopyAllFiles, "mput *"),
            (FtpCommand::DeleteAllFiles, "mdelete *"),
            (FtpCommand::Disconnect, "disconnect"),
            (FtpCommand::ChangeRemoteFolder, "cd"),
            (FtpCommand::ChangeLocalFolder, "lcd"),
            (FtpCommand::ReturnToSystem, "bye"),
        ];

        assert_eq!(FtpCommand::iter().count(), expected.len());
        for (kind, token) in expected {
            assert_eq!(kind.token(), token);
            assert_eq!(kind.to_string(), token);
        }
    }

    #[test]
    fn test_emit_with_and_without_argument() {
        assert_eq!(
            emit(FtpCommand::OpenConnection, Some("10.0.0.5")).as_str(),
            "open 10.0.0.5"
        );
        assert_eq!(emit(FtpCommand::ChangeRemoteFolder, Some("/")).as_str(), "cd /");
        assert_eq!(emit(FtpCommand::CopyAllFiles, None).as_str(), "mput *");
        assert_eq!(emit(FtpCommand::ReturnToSystem, None).as_str(), "bye");
    }

    #[test]
    fn test_emit_drops_argument_of_bare_commands() {
        assert_eq!(emit(FtpCommand::CopyAllFiles, Some("x")).as_str(), "mput *");
        assert_eq!(emit(FtpCommand::DeleteAllFiles, Some("x")).as_str(), "mdelete *");
        assert_eq!(emit(FtpCommand::Disconnect, Some("now")).as_str(), "disconnect");
        assert_eq!(emit(FtpCommand::CreateDirectory, Some("css")).as_str(), "mkdir css");
    }

    #[test]
    fn test_write_appends_terminator() {
        let mut buf = Vec::new();
        CommandLine::raw("deploy").write_to(&mut buf).unwrap();
        emit(FtpCommand::Disconnect, None).write_to(&mut buf).unwrap();

        let expected = format!("deploy{0}disconnect{0}", LINE_ENDING);
        assert_eq!(String::from_utf8(buf).unwrap(), expected);
    }

    #[test]
    fn test_argument_commands() {
        let with_arg: Vec<_> = FtpCommand::iter().filter(|c| c.takes_argument()).collect();
        assert_eq!(with_arg.len(), 5);
        assert!(!FtpCommand::DeleteAllFiles.takes_argument());
    }
}
