//! Interactive CLI mode

use crate::commands::{Cli, CommandExecutor};
use anyhow::Result;
use clap::Parser;
use std::io::{self, BufRead, Write};

/// Interactive CLI session
///
/// The executor lives for the whole session, so an ontology loaded with
/// `--file` stays available to later commands.
pub struct InteractiveSession {
    executor: CommandExecutor,
}

impl InteractiveSession {
    pub fn new(executor: CommandExecutor) -> Self {
        Self { executor }
    }

    /// Start interactive session
    pub fn run(&mut self) -> Result<()> {
        println!("Welcome to Taxon Interactive Mode");
        println!("Type 'help' for available commands, 'quit' to exit");
        println!("{}", "=".repeat(50));

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            print!("taxon> ");
            io::stdout().flush()?;

            let input = match lines.next() {
                Some(line) => line?,
                None => break,
            };
            let input = input.trim();

            if input.is_empty() {
                continue;
            }

            match input {
                "quit" | "exit" | "q" => {
                    println!("Goodbye!");
                    break;
                }
                "help" | "h" => {
                    self.show_help();
                }
                "clear" => {
                    print!("\x1B[2J\x1B[1;1H");
                }
                _ => match self.execute_line(input) {
                    Ok(Some(output)) => println!("{}", output),
                    Ok(None) => {}
                    Err(e) => eprintln!("Error: {:#}", e),
                },
            }
        }

        Ok(())
    }

    /// Run one command line and return what should be printed
    pub fn execute_line(&mut self, input: &str) -> Result<Option<String>> {
        let mut args = vec!["taxon".to_string()];
        args.extend(shell_words::split(input)?);

        let cli = match Cli::try_parse_from(args) {
            Ok(cli) => cli,
            Err(e) => return Ok(Some(e.to_string())),
        };

        if cli.config.is_some() || cli.max_depth.is_some() {
            let config = crate::commands::resolve_config(cli.config.as_deref(), cli.max_depth)?;
            self.executor.set_config(config);
        }

        let result = self.executor.execute(cli.command)?;
        if result.message.is_empty() {
            Ok(None)
        } else {
            Ok(Some(result.message))
        }
    }

    fn show_help(&self) {
        println!("Available commands:");
        println!("  classify [options]  Classify an ontology document");
        println!("  subsumes [options]  Check sub ⊑ sup");
        println!("  parse <expr>        Parse and print a concept expression");
        println!("  demo                Run the sample plant ontology");
        println!("  info                Show system information");
        println!("  help                Show this help");
        println!("  clear               Clear screen");
        println!("  quit                Exit interactive mode");
        println!();
        println!("Use '<command> --help' for detailed help on each command");
    }
}

impl Default for InteractiveSession {
    fn default() -> Self {
        Self::new(CommandExecutor::new())
    }
}

/// Start interactive mode
pub fn start_interactive(executor: CommandExecutor) -> Result<()> {
    let mut session = InteractiveSession::new(executor);
    session.run()
}
