use clap::{Parser as ClapParser, Subcommand};
use schema_lang::cli::{self, CheckOptions, CheckResult, CliError, Command};
use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "schema")]
#[command(about = "Parse, format and validate collection schemas")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the syntax of a schema
    Check {
        /// Schema file (reads from stdin if not provided)
        file: Option<PathBuf>,
    },

    /// Print the syntax tree as JSON
    Ast {
        /// Schema file (reads from stdin if not provided)
        file: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print the schema in canonical form
    Fmt {
        /// Schema file (reads from stdin if not provided)
        file: Option<PathBuf>,
    },

    /// Validate a JSON record against a collection
    Validate {
        /// Schema file (reads from stdin if not provided)
        file: Option<PathBuf>,

        /// Collection to validate against
        #[arg(short, long)]
        collection: String,

        /// JSON record
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let (file, command) = match cli.command {
        Commands::Check { file } => (file, Command::Check),
        Commands::Ast { file, pretty } => (file, Command::Ast { pretty }),
        Commands::Fmt { file } => (file, Command::Format),
        Commands::Validate {
            file,
            collection,
            input,
        } => (file, Command::Validate { collection, input }),
    };

    if let Err(e) = run(file, command) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_source(file: Option<PathBuf>) -> Result<String, CliError> {
    match file {
        Some(path) => Ok(fs::read_to_string(path)?),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        None => Err(CliError::NoSource),
    }
}

fn run(file: Option<PathBuf>, command: Command) -> Result<(), CliError> {
    let options = CheckOptions {
        source: read_source(file)?,
        command,
    };

    match cli::execute(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Ast(json) => println!("{}", json),
        CheckResult::Formatted(source) => println!("{}", source),
        CheckResult::RecordValid => println!("Record is valid"),
    }
    Ok(())
}
