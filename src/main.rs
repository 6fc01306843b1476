use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use internship_assistant::core::config::{self, CliOverrides, EnvOverrides};
use internship_assistant::tui;

#[derive(Parser)]
#[command(
    name = "internship-assistant",
    version,
    about = "Ask questions about your university's internship regulations"
)]
struct Args {
    /// Base URL of the functions host (overrides config and ASSISTANT_BACKEND_URL)
    #[arg(long)]
    backend_url: Option<String>,

    /// Regulations page to load on startup
    #[arg(long)]
    url: Option<String>,

    /// Where to write the debug log
    #[arg(long, default_value = "internship-assistant.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Logging goes to a file; the terminal belongs to the TUI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Configuration error: {e}");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let cli = CliOverrides {
        base_url: args.backend_url,
        initial_url: args.url,
    };
    let resolved = match config::resolve(&file_config, &EnvOverrides::from_env(), &cli) {
        Ok(r) => r,
        Err(e) => {
            log::error!("Configuration error: {e}");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    log::info!(
        "Internship Assistant starting up (backend: {}, initial url: {:?})",
        resolved.base_url,
        resolved.initial_url
    );

    tui::run(resolved)
}
