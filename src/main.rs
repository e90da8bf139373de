mod cursor;
mod debug;
mod errors;
mod node;
mod pager;
mod row;
mod statement;
mod table;

use std::io::{self, Write};

use clap::Parser;
use log::info;

use errors::{ExecuteError, PrepareError};
use statement::Statement;
use table::Table;

/// A tiny single-table database with an interactive prompt.
#[derive(Parser)]
#[command(name = "btree-sqlite", version, about)]
struct Cli {
    /// Path to the database file. Created if it doesn't exist.
    filename: String,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    info!("opening database at {}", cli.filename);
    let mut table = Table::open(&cli.filename);
    let mut input_buffer = String::new();

    loop {
        print_prompt();
        read_input(&mut input_buffer);

        if input_buffer.is_empty() {
            continue;
        }

        if let Some(command) = input_buffer.strip_prefix('.') {
            match command {
                "exit" => return,
                "btree" => {
                    debug::print_tree(&mut table);
                    continue;
                }
                "constants" => {
                    debug::print_constants();
                    continue;
                }
                _ => {
                    println!("Unrecognized command '{input_buffer}'.");
                    continue;
                }
            }
        }

        let statement = match Statement::prepare(&input_buffer) {
            Ok(statement) => statement,
            Err(PrepareError::UnrecognizedCommand(input)) => {
                println!("Unrecognized command '{input}'.");
                continue;
            }
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match statement.execute(&mut table) {
            Ok(()) => println!("Executed."),
            Err(ExecuteError::DuplicateKey) => println!("{}", ExecuteError::DuplicateKey),
        }
    }
}

fn print_prompt() {
    print!("db > ");
    let _ = io::stdout().flush();
}

fn read_input(input_buffer: &mut String) {
    input_buffer.clear();
    if io::stdin().read_line(input_buffer).unwrap() == 0 {
        std::process::exit(0);
    }
    let trimmed_len = input_buffer.trim_end().len();
    input_buffer.truncate(trimmed_len);
}
