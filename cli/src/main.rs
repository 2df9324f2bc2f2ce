use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;

use mission_stats_cli::commands;
use mission_stats_cli::logging;
use mission_stats_cli::{Cli, Commands};

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    match respond(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn respond(cli: &Cli) -> Result<(), String> {
    let config = cli.resolve_config().map_err(|e| commands::describe(&e))?;
    let mut stdout = io::stdout().lock();

    match cli.selected_command() {
        Commands::Report => commands::generate_report(&config, &mut stdout)?,
        Commands::Summary => commands::show_summary(&config, &mut stdout)?,
        Commands::Config => commands::show_config(&config, &mut stdout)?,
    }
    stdout.flush().map_err(|e| e.to_string())
}
