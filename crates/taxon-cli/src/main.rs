//! Taxon CLI main entry point

use anyhow::Result;
use clap::Parser;
use taxon_cli::{
    commands::{resolve_config, Cli, CommandExecutor},
    interactive::start_interactive,
};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // No arguments provided, start interactive mode
    if std::env::args().len() == 1 {
        start_interactive(CommandExecutor::new())?;
        return Ok(());
    }

    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref(), cli.max_depth)?;

    let mut executor = CommandExecutor::with_config(config);
    let result = executor.execute(cli.command)?;

    if !result.message.is_empty() {
        println!("{}", result.message);
    }

    // Exit with appropriate code
    if result.success {
        std::process::exit(0);
    } else {
        std::process::exit(1);
    }
}
