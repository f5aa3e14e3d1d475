/*!
 * Integration tests for the ftpgen binary
 */

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

fn write_config(path: &Path, root: &Path, out: &Path) {
    let xml = format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<ftpserverconfigurations>
  <ftpserverconfiguration id="web" IP="10.1.1.1" User="publisher" Password="cGFzc3dvcmQ="
      LocalDirectoryPath="{}" FtpCommandFileName="web.ftp" FtpFileOutputDirectory="{}"/>
</ftpserverconfigurations>
"#,
        root.display(),
        out.display()
    );
    fs::write(path, xml).unwrap();
}

fn ftpgen(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ftpgen"))
        .args(args)
        .env("RUST_LOG", "info")
        .output()
        .unwrap()
}

#[test]
fn test_generates_command_file() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path().join("www");
    let out = temp_dir.path().join("out");
    fs::create_dir_all(&root).unwrap();
    fs::create_dir_all(&out).unwrap();
    let mut file = File::create(root.join("index.html")).unwrap();
    writeln!(file, "<html></html>").unwrap();

    let config = temp_dir.path().join("ftpServerConfig.xml");
    write_config(&config, &root, &out);

    let output = ftpgen(&["--config", &config.to_string_lossy(), "--quiet", "web"]);
    assert!(output.status.success());

    let script = fs::read_to_string(out.join("web.ftp")).unwrap();
    let lines: Vec<&str> = script.lines().collect();
    assert_eq!(lines[0], "open 10.1.1.1");
    assert_eq!(lines[1], "publisher");
    assert_eq!(lines[2], "password");
    assert!(lines.contains(&"mput *"));
    assert_eq!(lines[lines.len() - 2..], ["disconnect", "bye"]);
}

#[test]
fn test_unknown_profile_fails_cleanly() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path().join("www");
    let out = temp_dir.path().join("out");
    fs::create_dir_all(&root).unwrap();
    fs::create_dir_all(&out).unwrap();

    let config = temp_dir.path().join("ftpServerConfig.xml");
    write_config(&config, &root, &out);

    let output = ftpgen(&["--config", &config.to_string_lossy(), "missing"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Could not find FTP configuration with id: missing"));
    assert!(!out.join("web.ftp").exists());
}

#[test]
fn test_list_profiles() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path().join("www");
    let out = temp_dir.path().join("out");

    let config = temp_dir.path().join("ftpServerConfig.xml");
    write_config(&config, &root, &out);

    let output = ftpgen(&["--config", &config.to_string_lossy(), "--list"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("web"));
    assert!(stdout.contains("10.1.1.1"));
    assert!(!stdout.contains("cGFzc3dvcmQ="));
}
