//! Interactive query shell.
//!
//! Grammar, one command per line:
//!   tables
//!   schema <table>
//!   query <table> [clause ...]        e.g. query AgentEntry Kind==Region
//!   quit | exit

use crate::{output, wherec};
use rundb::Database;
use rustyline::{DefaultEditor, error::ReadlineError};

pub fn run(db: &Database) -> Result<(), ReadlineError> {
    let mut editor = DefaultEditor::new()?;
    println!("connected to {}; 'tables' to start, 'quit' to leave", db.name());

    loop {
        match editor.readline("rundb> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);

                if matches!(line, "quit" | "exit") {
                    break;
                }

                if let Err(message) = dispatch(db, line) {
                    eprintln!("error: {message}");
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err),
        }
    }

    Ok(())
}

fn dispatch(db: &Database, line: &str) -> Result<(), String> {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default();

    match command {
        "tables" => {
            for table in db.tables().map_err(|err| err.to_string())? {
                println!("{table}");
            }
            Ok(())
        }

        "schema" => {
            let table = words.next().ok_or("usage: schema <table>")?;
            let schema = db.schema(table).map_err(|err| err.to_string())?;
            print!("{}", output::schema_text(&schema));
            Ok(())
        }

        "query" => {
            let table = words.next().ok_or("usage: query <table> [clause ...]")?;
            let schema = db.schema(table).map_err(|err| err.to_string())?;

            let clauses: Vec<String> = words.map(str::to_string).collect();
            let conditions = wherec::parse_clauses(&schema, &clauses)?;

            let result = db.query(table, &conditions).map_err(|err| err.to_string())?;
            print!("{}", output::result_text(&result));
            Ok(())
        }

        other => Err(format!("unknown command '{other}'")),
    }
}
