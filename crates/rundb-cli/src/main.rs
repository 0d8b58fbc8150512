//! Developer CLI over the rundb library: inspect tables and schemas, run
//! filtered queries, or drop into an interactive shell.

mod output;
mod shell;
mod wherec;

use clap::{Parser, Subcommand};
use rundb::{Database, open};
use std::{path::PathBuf, process::ExitCode};

///
/// Cli
///

#[derive(Parser)]
#[command(name = "rundb", about = "Query simulation record stores", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the tables of a database
    Tables {
        /// Database file
        file: PathBuf,
    },

    /// Show the column schema of one table
    Schema {
        /// Database file
        file: PathBuf,
        /// Table name
        table: String,
        /// Emit JSON instead of aligned text
        #[arg(long)]
        json: bool,
    },

    /// Run a filtered query against one table
    Query {
        /// Database file
        file: PathBuf,
        /// Table name
        table: String,
        /// Filter clause like 'Kind==Region' or 'MassFrac<=0.0072'; repeatable
        #[arg(short = 'w', long = "where", value_name = "CLAUSE")]
        clauses: Vec<String>,
        /// Emit JSON instead of aligned text
        #[arg(long)]
        json: bool,
    },

    /// Interactive query shell
    Shell {
        /// Database file
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Tables { file } => {
            let db = open_db(&file)?;
            for table in db.tables().map_err(stringify)? {
                println!("{table}");
            }
        }

        Command::Schema { file, table, json } => {
            let db = open_db(&file)?;
            let schema = db.schema(&table).map_err(stringify)?;
            if json {
                println!("{}", output::schema_json(&schema));
            } else {
                print!("{}", output::schema_text(&schema));
            }
        }

        Command::Query {
            file,
            table,
            clauses,
            json,
        } => {
            let db = open_db(&file)?;
            let schema = db.schema(&table).map_err(stringify)?;
            let conditions = wherec::parse_clauses(&schema, &clauses)?;
            let result = db.query(&table, &conditions).map_err(stringify)?;
            if json {
                println!("{}", output::result_json(&result));
            } else {
                print!("{}", output::result_text(&result));
            }
        }

        Command::Shell { file } => {
            let db = open_db(&file)?;
            shell::run(&db).map_err(stringify)?;
        }
    }

    Ok(())
}

fn open_db(file: &std::path::Path) -> Result<Database, String> {
    open(file).map_err(stringify)
}

fn stringify(err: impl std::fmt::Display) -> String {
    err.to_string()
}
