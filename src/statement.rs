//! Turns a prepared line of REPL input into a `Statement` and executes it
//! against a `Table`. This front-end layer is intentionally thin: parsing
//! and dispatch only, no B+ tree logic.
use crate::cursor::Cursor;
use crate::errors::{ExecuteError, PrepareError};
use crate::row::Row;
use crate::table::Table;

pub enum Statement {
    Select,
    Insert(Row),
}

impl Statement {
    pub fn prepare(input: &str) -> Result<Self, PrepareError> {
        match input {
            buffer if buffer == "select" => Ok(Statement::Select),
            buffer if buffer.starts_with("insert") => {
                let row = buffer[6..].trim_start().parse::<Row>()?;
                Ok(Statement::Insert(row))
            }
            _ => Err(PrepareError::UnrecognizedCommand(input.to_string())),
        }
    }

    pub fn execute(self, table: &mut Table) -> Result<(), ExecuteError> {
        match self {
            Statement::Select => Self::execute_select(table),
            Statement::Insert(row) => Self::execute_insert(row, table),
        }
    }

    fn execute_select(table: &mut Table) -> Result<(), ExecuteError> {
        let mut cursor = Cursor::table_start(table);
        while !cursor.end_of_table {
            let row = cursor.value().clone();
            println!("{row}");
            cursor.advance();
        }
        Ok(())
    }

    fn execute_insert(row: Row, table: &mut Table) -> Result<(), ExecuteError> {
        let key_to_insert = row.id;
        let mut cursor = Cursor::table_find(table, key_to_insert);
        cursor.leaf_insert(key_to_insert, row)
    }
}
