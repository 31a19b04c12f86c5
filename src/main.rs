//! pubapi - browse the public APIs catalog from the terminal

use clap::{CommandFactory, Parser};
use clap_complete::CompleteEnv;

mod browser;
mod cache;
mod catalog;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;

use cli::{CacheCommands, Cli, Commands, GlobalOptions};
use error::Result;

#[tokio::main]
async fn main() {
    CompleteEnv::with_factory(Cli::command).complete();

    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// Warnings by default, debug with `--debug`; `RUST_LOG` wins when set
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let opts = GlobalOptions::from_cli(&cli);
    init_logging(opts.debug);
    log::debug!("Global options: {:?}", opts);

    match cli.command {
        Commands::List { filters } => cli::list::list(&opts, &filters).await,
        Commands::Dashboard => cli::list::dashboard(&opts).await,
        Commands::Categories => cli::list::categories(&opts).await,
        Commands::Open { name } => cli::open::run(&opts, name.as_deref()).await,
        Commands::Cache(cache_cmd) => {
            let format = opts.format.unwrap_or_default();
            match cache_cmd {
                CacheCommands::Status => cli::cache::status(&opts, format),
                CacheCommands::Clear => cli::cache::clear(&opts, format),
                CacheCommands::Path => cli::cache::path(&opts),
            }
        }
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("pubapi version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "pubapi", &mut std::io::stdout());
            Ok(())
        }
    }
}
