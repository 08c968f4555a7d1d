use clap::Parser;
use linktree::cli::commands::Cli;
use linktree::cli::handlers;
use linktree::io::logging;

fn main() {
    let cli = Cli::parse();

    // Handle must outlive the run or buffered log lines are lost
    let _logger = match logging::init_logging(cli.verbose) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("warning: logging disabled: {}", e);
            None
        }
    };

    if let Err(e) = handlers::run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
