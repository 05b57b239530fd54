//! Command-line entry point.

use clap::{Parser, Subcommand};
use inkboard_app::{RunOptions, ShortcutRegistry};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inkboard", version, about = "Infinite-canvas board editor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an input script against a board and save the result
    Replay {
        /// JSON config file
        #[arg(long, env = "INKBOARD_CONFIG")]
        config: Option<PathBuf>,
        /// Board to start from (defaults to an empty board)
        #[arg(long)]
        board: Option<PathBuf>,
        /// JSON array of input events
        #[arg(long)]
        script: Option<PathBuf>,
        /// Where to write the board (defaults to stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List keyboard shortcuts
    Shortcuts,
}

fn main() {
    env_logger::init();
    log::info!("Starting Inkboard");

    let cli = Cli::parse();
    match cli.command {
        Commands::Replay {
            config,
            board,
            script,
            out,
        } => {
            let options = RunOptions {
                config,
                board,
                script,
                out,
            };
            match inkboard_app::run(&options) {
                Ok(report) => {
                    eprintln!(
                        "{} events, {} elements, zoom {}%, {}",
                        report.events, report.elements, report.zoom_percent, report.scene
                    );
                    if let Some(json) = report.board_json {
                        println!("{}", json);
                    }
                }
                Err(e) => {
                    eprintln!("error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Shortcuts => ShortcutRegistry::print_all(),
    }
}
