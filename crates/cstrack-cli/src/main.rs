mod logging;
mod run;

use std::process::ExitCode;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "cstrack")]
#[command(about = "Copy a day's CS portal counters into the dashboard spreadsheet")]
struct Cli {
    /// Day to collect, as YYYY-MM-DD. Defaults to yesterday.
    date: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let program_dir = match cstrack_core::program_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("cstrack: {e}");
            return ExitCode::FAILURE;
        }
    };
    cstrack_core::load_dotenv(&program_dir);

    let log_settings = cstrack_core::load_log_settings(&program_dir);
    if let Err(e) = logging::init(&log_settings) {
        eprintln!("cstrack: {e:#}");
        return ExitCode::FAILURE;
    }

    match run::run(cli.date.as_deref(), &program_dir).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "daily tracking failed");
            ExitCode::FAILURE
        }
    }
}
