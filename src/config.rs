/*!
 * Configuration handling for ftpgen
 *
 * Command-line arguments plus the XML file describing the FTP servers:
 *
 * ```xml
 * <ftpserverconfigurations>
 *   <ftpserverconfiguration id="prod" IP="10.0.0.5" User="deploy" Password="c2VjcmV0"
 *       LocalDirectoryPath="/srv/site" FtpCommandFileName="deploy.ftp"
 *       FtpFileOutputDirectory="/srv/out">
 *     <additionalfolders>
 *       <additionalfolder Path="/srv/shared/img"/>
 *     </additionalfolders>
 *   </ftpserverconfiguration>
 * </ftpserverconfigurations>
 * ```
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::str;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use clap::Parser;
use clap_complete::Shell;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{FtpGenError, Result};
use crate::types::ServerProfile;
use crate::{bail, ensure};

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "ftpconfig/ftpServerConfig.xml";

const PROFILE_ELEMENT: &str = "ftpserverconfiguration";

/// Command-line arguments for ftpgen
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "ftpgen",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate FTP command scripts that mirror a local directory tree",
    long_about = "Reads an FTP server profile and writes a command file for the command-line FTP client that deletes the remote mirror, recreates it and uploads every file of the local directory."
)]
pub struct Args {
    /// Id of the server profile to use (defaults to the first one)
    pub id: Option<String>,

    /// Path to the XML configuration file
    #[clap(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// List the configured profiles and exit
    #[clap(long)]
    pub list: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Do not print the summary report
    #[clap(short, long)]
    pub quiet: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Configuration file path
    pub config_path: PathBuf,

    /// Requested profile id
    pub profile_id: Option<String>,

    /// Only list profiles
    pub list: bool,

    /// Print the summary report
    pub report: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            config_path: resolve_config_path(&args.config),
            profile_id: args.id,
            list: args.list,
            report: !args.quiet,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.config_path.is_file(),
            Config,
            "Configuration file not found: {}",
            self.config_path.display()
        );
        Ok(())
    }
}

/// Relative paths missing from the working directory are looked up next to the executable
fn resolve_config_path(path: &Path) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(path)))
        .filter(|candidate| candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}

/// A profile as stored in the file, password still encoded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileEntry {
    pub id: String,
    pub address: String,
    pub user: String,
    pub encoded_password: String,
    pub local_directory: String,
    pub output_file_name: String,
    pub output_directory: String,
    pub additional_folders: Vec<String>,
}

impl ProfileEntry {
    /// Decode the password and build the runtime profile
    pub fn to_profile(&self) -> Result<ServerProfile> {
        let bytes = STANDARD
            .decode(self.encoded_password.trim())
            .map_err(|e| FtpGenError::PasswordDecode {
                id: self.id.clone(),
                reason: e.to_string(),
            })?;
        let password = String::from_utf8(bytes).map_err(|e| FtpGenError::PasswordDecode {
            id: self.id.clone(),
            reason: e.to_string(),
        })?;

        Ok(ServerProfile {
            id: self.id.clone(),
            address: self.address.clone(),
            user: self.user.clone(),
            password,
            local_root: PathBuf::from(&self.local_directory),
            output_directory: PathBuf::from(&self.output_directory),
            output_file_name: self.output_file_name.clone(),
            additional_folders: self.additional_folders.iter().map(PathBuf::from).collect(),
        })
    }
}

/// Parsed configuration file
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    entries: Vec<ProfileEntry>,
}

impl ConfigFile {
    /// Load and parse the file at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            FtpGenError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parse the XML document
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut entries = Vec::new();
        let mut current: Option<ProfileEntry> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    if is_profile(e) {
                        current = Some(parse_profile(e)?);
                    } else if let Some(entry) = current.as_mut() {
                        push_folder(e, entry)?;
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    if is_profile(e) {
                        entries.push(parse_profile(e)?);
                    } else if let Some(entry) = current.as_mut() {
                        push_folder(e, entry)?;
                    }
                }
                Ok(Event::End(ref e)) => {
                    if e.local_name().as_ref().eq_ignore_ascii_case(PROFILE_ELEMENT.as_bytes()) {
                        if let Some(entry) = current.take() {
                            entries.push(entry);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => bail!(
                    Config,
                    "XML error at position {}: {}",
                    reader.buffer_position(),
                    e
                ),
                _ => {}
            }
        }

        Ok(Self { entries })
    }

    /// Profiles in document order
    pub fn entries(&self) -> &[ProfileEntry] {
        &self.entries
    }

    /// Select a profile by id, or the first one when no id is given
    pub fn select(&self, id: Option<&str>) -> Result<ServerProfile> {
        let entry = match id {
            Some(id) => self.entries.iter().find(|entry| entry.id == id),
            None => self.entries.first(),
        };

        match entry {
            Some(entry) => entry.to_profile(),
            None => Err(FtpGenError::ConfigurationNotFound(
                id.unwrap_or("No id provided").to_string(),
            )),
        }
    }
}

fn unescape(attr: &Attribute) -> Result<String> {
    attr.unescape_value()
        .map(|value| value.to_string())
        .map_err(|e| FtpGenError::Config(e.to_string()))
}

fn is_profile(e: &BytesStart) -> bool {
    e.local_name()
        .as_ref()
        .eq_ignore_ascii_case(PROFILE_ELEMENT.as_bytes())
}

/// Parse `<ftpserverconfiguration>` attributes
fn parse_profile(e: &BytesStart) -> Result<ProfileEntry> {
    let mut entry = ProfileEntry::default();
    let mut seen = Vec::new();

    for attr in e.attributes() {
        let attr = attr?;
        let key = str::from_utf8(attr.key.as_ref()).unwrap_or("").to_ascii_lowercase();
        let val = unescape(&attr)?;

        let field = match key.as_str() {
            "id" => &mut entry.id,
            "ip" => &mut entry.address,
            "user" => &mut entry.user,
            "password" => &mut entry.encoded_password,
            "localdirectorypath" => &mut entry.local_directory,
            "ftpcommandfilename" => &mut entry.output_file_name,
            "ftpfileoutputdirectory" => &mut entry.output_directory,
            _ => continue,
        };
        *field = val;
        seen.push(key);
    }

    for required in [
        "ip",
        "user",
        "password",
        "localdirectorypath",
        "ftpcommandfilename",
        "ftpfileoutputdirectory",
    ] {
        ensure!(
            seen.iter().any(|key| key == required),
            Config,
            "Profile '{}' is missing attribute {}",
            entry.id,
            required
        );
    }

    Ok(entry)
}

/// Record the `Path` attribute of an element nested in a profile
fn push_folder(e: &BytesStart, entry: &mut ProfileEntry) -> Result<()> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref().eq_ignore_ascii_case(b"path") {
            entry.additional_folders.push(unescape(&attr)?);
        }
    }
    Ok(())
}
