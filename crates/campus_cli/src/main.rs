//! CLI smoke entry point.
//!
//! Opens the store given as the first argument (in-memory when omitted),
//! ensures the schema and prints what the services see.

use campus_core::db::migrations::current_version;
use campus_core::db::{open_db, open_db_in_memory};
use campus_core::{core_version, Campus};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run(std::env::args().nth(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("campus_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(db_path: Option<String>) -> Result<(), Box<dyn Error>> {
    let conn = match db_path.as_deref() {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let campus = Campus::try_new(&conn)?;

    println!("campus_core version={}", core_version());
    println!("schema version={}", current_version(&conn)?);
    println!("universities={}", campus.universities().get()?.len());
    println!("departments={}", campus.departments().get()?.len());
    println!("professors={}", campus.professors().get()?.len());
    Ok(())
}
