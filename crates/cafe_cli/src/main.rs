//! CLI smoke entry point.
//!
//! # Responsibility
//! - Open the store described by `CAFE_*` environment variables.
//! - Print the café listing as JSON lines, optionally filtered by the first
//!   argument as a location substring.

use cafe_core::{bootstrap, CafeService, CoreConfig, SqliteCafeRepository};
use log::error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let location = std::env::args().nth(1);
    match run(location.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("cafe_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(location: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let config = CoreConfig::from_env();
    let conn = bootstrap(&config)?;
    let service = CafeService::new(SqliteCafeRepository::try_new(&conn)?);

    println!("cafe_core version={}", cafe_core::core_version());
    for cafe in service.list_cafes(location)? {
        println!("{}", serde_json::to_string(&cafe)?);
    }
    Ok(())
}
