use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use sonnic_tracker::cli::{App, Console};
use sonnic_tracker::config::{paths::DATA_DIR_ENV, SonnicPaths, Settings};
use sonnic_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "sonnic",
    version,
    about = "Terminal-based personal savings tracker",
    long_about = "Sonnic Tracker keeps a personal savings ledger. Register, log \
                  deposits and withdrawals, and watch your progress toward a \
                  savings target from an interactive menu."
)]
struct Cli {
    /// Directory holding users, session and ledger files
    #[arg(long, env = DATA_DIR_ENV, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => SonnicPaths::with_base_dir(dir),
        None => SonnicPaths::new()?,
    };

    let settings = Settings::load_or_create(&paths)?;
    if !paths.is_initialized() {
        settings.save(&paths)?;
        log::info!("Created settings at {}", paths.settings_file().display());
    }

    let storage = Storage::new(&paths)?;

    let stdin = io::stdin();
    let hide_passwords = stdin.is_terminal();
    let console = Console::new(stdin.lock(), io::stdout(), hide_passwords);

    App::new(&storage, &settings, console).run()?;

    Ok(())
}
