//! HBNB CLI
//!
//! Command-line front end over the configured storage engine

use clap::{Parser, Subcommand};
use hbnb_core::logging_facility::{self, Profile};
use hbnb_store::Config;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "hbnb")]
#[command(about = "HBNB - inspect and edit the storage engine", long_about = None)]
struct Cli {
    /// Human-readable debug logs on stderr
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print every stored entity, optionally of one type
    All(commands::query::AllArgs),
    /// Print one entity
    Show(commands::query::ShowArgs),
    /// Count stored entities, optionally of one type
    Count(commands::query::CountArgs),
    /// Create and save an entity from key=value pairs
    Create(commands::mutate::CreateArgs),
    /// Delete an entity
    Destroy(commands::mutate::DestroyArgs),
}

fn run(cli: Cli) -> anyhow::Result<String> {
    let config = Config::from_env()?;
    let mut storage = hbnb_store::open(&config)?;

    let output = match cli.command {
        Commands::All(args) => commands::query::all(args, &*storage),
        Commands::Show(args) => commands::query::show(args, &*storage),
        Commands::Count(args) => commands::query::count(args, &*storage),
        Commands::Create(args) => commands::mutate::create(args, &mut *storage),
        Commands::Destroy(args) => commands::mutate::destroy(args, &mut *storage),
    };

    storage.close()?;
    output
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging_facility::init(Profile::from_verbosity(cli.verbose));

    match run(cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
