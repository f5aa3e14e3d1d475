/*!
 * Command-line interface for ftpgen
 */

use std::io;
use std::process::ExitCode;
use std::time::Instant;

use clap::{CommandFactory, Parser};
use log::{info, LevelFilter};

use ftpgen::config::{Args, Config, ConfigFile};
use ftpgen::report::{GenerationReport, Reporter};
use ftpgen::writer::ScriptWriter;

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "ftpgen", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    init_logging(args.verbose);

    // Create configuration
    let config = Config::from_args(args);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> ftpgen::Result<()> {
    // Validate configuration
    config.validate()?;

    info!("Reading ftp server parameters from {}", config.config_path.display());
    let config_file = ConfigFile::load(&config.config_path)?;
    let reporter = Reporter::new();

    if config.list {
        reporter.print_profiles(config_file.entries());
        return Ok(());
    }

    let profile = config_file.select(config.profile_id.as_deref())?;
    info!(
        "Configuration: {} with IP Address: {}",
        profile.id, profile.address
    );
    info!("Generating ftp command file: {}", profile.output_file_name);

    let start_time = Instant::now();
    let generation = ScriptWriter::new().generate(&profile)?;
    let duration = start_time.elapsed();

    if config.report {
        reporter.print_report(&GenerationReport::new(&profile.id, &generation, duration));
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()))
        .format_target(false)
        .format_timestamp(None)
        .init();
}
