use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use vocab::cli::{self, Args, Command};
use vocab::core::audio::NoopAudio;
use vocab::core::config::{ResolvedConfig, VocabConfig, load_config, resolve};
use vocab::core::state::App;
use vocab::core::storage::FileStore;
use vocab::core::timer::NoopScheduler;

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    let file_config = load_config().unwrap_or_else(|e| {
        eprintln!("vocab: ignoring config file: {}", e);
        VocabConfig::default()
    });
    let config = resolve(&file_config, &args.overrides());

    init_logging(&config.data_dir);
    info!("Vocab starting up (data dir {})", config.data_dir.display());

    match args.command {
        None => vocab::tui::run(config),
        Some(command) => {
            if let Err(e) = run_batch(command, &config) {
                error!("Command failed: {}", e);
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

/// Initialize file logger - writes vocab.log in the data directory
fn init_logging(data_dir: &Path) {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Err(e) = fs::create_dir_all(data_dir) {
        eprintln!("vocab: cannot create {}: {}", data_dir.display(), e);
        return;
    }
    if let Ok(log_file) = File::create(data_dir.join("vocab.log")) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }
}

/// Batch commands run silently and untimed.
fn run_batch(command: Command, config: &ResolvedConfig) -> Result<(), cli::CliError> {
    let storage = FileStore::open(&config.data_dir).map_err(io::Error::other)?;
    let mut app = App::from_config(
        config,
        Arc::new(storage),
        Arc::new(NoopAudio),
        Arc::new(NoopScheduler),
    );
    let stdin = io::stdin();
    cli::execute(command, &mut app, &mut io::stdout(), &mut stdin.lock())
}
